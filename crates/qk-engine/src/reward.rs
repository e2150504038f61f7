//! Victory rewards.

use log::info;
use rand::Rng;
use rand::rngs::StdRng;

use crate::difficulty::Difficulty;
use crate::enemy::Enemy;
use crate::item::CATALOG;
use crate::player::Player;
use crate::progression::item_drop_chance;

/// Gold added per player level on every victory.
pub const GOLD_PER_LEVEL: u64 = 3;

/// What a victory granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryReward {
    /// Experience gained.
    pub xp: u64,
    /// Gold from the enemy itself.
    pub base_gold: u64,
    /// Gold from the player's level.
    pub level_gold: u64,
    /// Gold from the player's gold bonus.
    pub bonus_gold: u64,
    /// Catalog key of a dropped item, if any.
    pub item: Option<&'static str>,
}

impl VictoryReward {
    /// Total gold gained.
    pub fn gold(&self) -> u64 {
        self.base_gold + self.level_gold + self.bonus_gold
    }
}

/// Apply the rewards for defeating `enemy` directly to `player`.
pub fn apply_victory(
    player: &mut Player,
    enemy: &Enemy,
    difficulty: Difficulty,
    rng: &mut StdRng,
) -> VictoryReward {
    let drop_roll: f64 = rng.random();
    let pick = rng.random_range(0..CATALOG.len());
    apply_victory_with_roll(player, enemy, difficulty, drop_roll, pick)
}

/// Apply victory rewards with a fixed drop roll in `[0, 1)` and catalog pick.
pub fn apply_victory_with_roll(
    player: &mut Player,
    enemy: &Enemy,
    difficulty: Difficulty,
    drop_roll: f64,
    pick: usize,
) -> VictoryReward {
    let xp = u64::from(enemy.xp_reward);
    player.xp = player.xp.saturating_add(xp);

    let mut reward = VictoryReward {
        xp,
        base_gold: enemy.gold_base.into(),
        level_gold: GOLD_PER_LEVEL * u64::from(player.level),
        bonus_gold: player.gold_bonus.into(),
        item: None,
    };
    player.gold = player.gold.saturating_add(reward.gold());

    if drop_roll < item_drop_chance(difficulty, player.level) {
        let item = &CATALOG[pick % CATALOG.len()];
        player.add_item(item.key, 1);
        reward.item = Some(item.key);
    }

    info!(
        "{} defeated {}: +{} xp, +{} gold, drop {:?}",
        player.name,
        enemy.name,
        reward.xp,
        reward.gold(),
        reward.item
    );
    reward
}
