//! Configuration for a battle.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for a battle.
#[derive(Debug, Clone)]
pub struct BattleConfig {
    /// RNG seed for reproducible battles. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Input attempts per question before the turn counts as wrong.
    pub max_attempts: u8,
    /// Inclusive range of question counts sampled for random battles.
    pub random_pool: (usize, usize),
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts: 3,
            random_pool: (10, 20),
        }
    }
}

impl BattleConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the random number generator for this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn default_config() {
        let cfg = BattleConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.random_pool, (10, 20));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let cfg = BattleConfig::default().with_seed(123);
        let a: u32 = cfg.rng().random_range(0..1_000_000);
        let b: u32 = cfg.rng().random_range(0..1_000_000);
        assert_eq!(a, b);
    }
}
