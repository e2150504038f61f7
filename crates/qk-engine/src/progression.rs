//! Leveling and scaling curves.
//!
//! Pure functions: experience thresholds per level, the enemy scaling
//! factor, and item drop probabilities.

use crate::difficulty::Difficulty;

/// Threshold returned when the curve cannot be evaluated.
pub const XP_FALLBACK: u64 = 1000;

/// Upper bound of the polynomial part of the curve.
pub const XP_CAP: u64 = 1_000_000;

/// Experience needed to advance from `level` to `level + 1`.
///
/// Polynomial up to level 100, linear beyond. Levels below 1 are treated
/// as level 1.
pub fn xp_required(level: u32) -> u64 {
    let level = level.max(1);
    if level > 100 {
        return 50_000 + 1_000 * u64::from(level - 100);
    }

    let lvl = f64::from(level);
    let curve = 120.0 * lvl.powf(1.3) + 20.0 * lvl;
    let floor = 50.0 + 10.0 * lvl;
    let result = curve.max(floor).min(XP_CAP as f64).floor();
    if !result.is_finite() || result < 1.0 {
        return XP_FALLBACK;
    }
    result as u64
}

/// Multiplier applied to enemy templates for a player level.
///
/// 1.0 at level 1, +0.3 per level through 5, +0.25 per level through 10,
/// +0.2 per level after that.
pub fn level_scaling_factor(level: u32) -> f64 {
    let lvl = f64::from(level);
    match level {
        0..=1 => 1.0,
        2..=5 => 1.0 + (lvl - 1.0) * 0.3,
        6..=10 => 2.2 + (lvl - 5.0) * 0.25,
        _ => 3.45 + (lvl - 10.0) * 0.2,
    }
}

/// Probability of an item drop after a victory.
///
/// Values above 1.0 are possible and mean a guaranteed drop.
pub fn item_drop_chance(difficulty: Difficulty, level: u32) -> f64 {
    let base = match difficulty {
        Difficulty::Easy => 0.15,
        Difficulty::Medium | Difficulty::Random => 0.20,
        Difficulty::Hard => 0.25,
        Difficulty::Boss => 0.40,
    };
    base + (0.02 * f64::from(level)).min(0.20)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_thresholds() {
        // 120 * 1 + 20
        assert_eq!(xp_required(1), 140);
        // 120 * 2^1.3 + 40 = 335.5...
        assert_eq!(xp_required(2), 335);
        assert_eq!(xp_required(0), xp_required(1));
    }

    #[test]
    fn linear_beyond_one_hundred() {
        assert_eq!(xp_required(101), 51_000);
        assert_eq!(xp_required(150), 100_000);
        assert!(xp_required(100) <= xp_required(101));
    }

    #[test]
    fn scaling_is_continuous_at_breakpoints() {
        assert!((level_scaling_factor(1) - 1.0).abs() < 1e-9);
        assert!((level_scaling_factor(5) - 2.2).abs() < 1e-9);
        assert!((level_scaling_factor(6) - 2.45).abs() < 1e-9);
        assert!((level_scaling_factor(10) - 3.45).abs() < 1e-9);
        assert!((level_scaling_factor(11) - 3.65).abs() < 1e-9);
    }

    #[test]
    fn boss_drop_chance_at_level_one() {
        assert!((item_drop_chance(Difficulty::Boss, 1) - 0.42).abs() < 1e-9);
    }

    #[test]
    fn drop_bonus_caps_at_twenty_percent() {
        assert!((item_drop_chance(Difficulty::Easy, 10) - 0.35).abs() < 1e-9);
        assert!((item_drop_chance(Difficulty::Easy, 50) - 0.35).abs() < 1e-9);
        assert!(
            (item_drop_chance(Difficulty::Random, 3) - item_drop_chance(Difficulty::Medium, 3))
                .abs()
                < 1e-9
        );
    }

    proptest! {
        #[test]
        fn xp_required_is_monotonic(level in 1u32..5_000) {
            prop_assert!(xp_required(level) <= xp_required(level + 1));
        }

        #[test]
        fn xp_required_is_positive(level in 0u32..u32::MAX - 1) {
            prop_assert!(xp_required(level) >= 1);
        }

        #[test]
        fn scaling_never_shrinks(level in 1u32..1_000) {
            prop_assert!(level_scaling_factor(level) <= level_scaling_factor(level + 1));
        }
    }
}
