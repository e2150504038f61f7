//! Level-up resolution.
//!
//! Experience is drained one threshold at a time. Every level gained asks
//! the caller for exactly one upgrade and then fully heals the player.

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::player::Player;
use crate::progression::xp_required;

/// Max HP granted by [`Upgrade::MaxHp`].
pub const MAX_HP_STEP: u32 = 15;
/// Damage granted by [`Upgrade::Damage`].
pub const DAMAGE_STEP: u32 = 3;
/// Gold bonus granted by [`Upgrade::GoldBonus`].
pub const GOLD_BONUS_STEP: u32 = 2;

/// A stat upgrade chosen on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    /// +15 max HP.
    MaxHp,
    /// +3 damage.
    Damage,
    /// +2 gold per victory.
    GoldBonus,
}

impl Upgrade {
    /// Parse a menu choice (`1`-`3`) or upgrade name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "hp" | "max_hp" | "health" => Some(Self::MaxHp),
            "2" | "damage" | "dmg" => Some(Self::Damage),
            "3" | "gold" | "gold_bonus" => Some(Self::GoldBonus),
            _ => None,
        }
    }

    /// All upgrades in menu order.
    pub fn all() -> &'static [Self] {
        &[Self::MaxHp, Self::Damage, Self::GoldBonus]
    }

    fn apply(self, player: &mut Player) {
        match self {
            Self::MaxHp => player.max_hp = player.max_hp.saturating_add(MAX_HP_STEP),
            Self::Damage => player.damage = player.damage.saturating_add(DAMAGE_STEP),
            Self::GoldBonus => {
                player.gold_bonus = player.gold_bonus.saturating_add(GOLD_BONUS_STEP);
            }
        }
    }
}

impl std::fmt::Display for Upgrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaxHp => write!(f, "+{MAX_HP_STEP} Max HP"),
            Self::Damage => write!(f, "+{DAMAGE_STEP} Damage"),
            Self::GoldBonus => write!(f, "+{GOLD_BONUS_STEP} Gold per victory"),
        }
    }
}

impl std::str::FromStr for Upgrade {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| EngineError::InvalidUpgrade(s.to_string()))
    }
}

/// Chooses one upgrade per level gained.
pub trait UpgradePicker {
    /// Pick an upgrade for `player`, who just reached `new_level`.
    fn pick(&mut self, player: &Player, new_level: u32) -> Upgrade;
}

impl<F> UpgradePicker for F
where
    F: FnMut(&Player, u32) -> Upgrade,
{
    fn pick(&mut self, player: &Player, new_level: u32) -> Upgrade {
        self(player, new_level)
    }
}

/// One level gained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// The level reached.
    pub level: u32,
    /// The upgrade applied.
    pub upgrade: Upgrade,
    /// HP restored by the full heal.
    pub healed: u32,
    /// Experience needed for the following level.
    pub next_threshold: u64,
}

/// Drain experience into levels until the player is below the threshold.
pub fn resolve_level_ups(player: &mut Player, picker: &mut dyn UpgradePicker) -> Vec<LevelUp> {
    let mut gained = Vec::new();
    loop {
        let required = xp_required(player.level);
        if player.xp < required {
            break;
        }
        player.xp -= required;
        player.level = player.level.saturating_add(1);

        let upgrade = picker.pick(player, player.level);
        upgrade.apply(player);

        let before = player.hp;
        player.heal_full();

        info!("{} reached level {} and chose {upgrade}", player.name, player.level);
        gained.push(LevelUp {
            level: player.level,
            upgrade,
            healed: player.hp.saturating_sub(before),
            next_threshold: xp_required(player.level),
        });
    }
    gained
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(upgrade: Upgrade) -> impl FnMut(&Player, u32) -> Upgrade {
        move |_: &Player, _: u32| upgrade
    }

    #[test]
    fn below_threshold_does_nothing() {
        let mut p = Player {
            xp: 139,
            ..Player::default()
        };
        let ups = resolve_level_ups(&mut p, &mut always(Upgrade::Damage));
        assert!(ups.is_empty());
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 139);
    }

    #[test]
    fn exact_threshold_levels_once_and_heals() {
        let mut p = Player {
            xp: xp_required(1),
            hp: 20,
            ..Player::default()
        };
        let ups = resolve_level_ups(&mut p, &mut always(Upgrade::MaxHp));
        assert_eq!(ups.len(), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 0);
        assert_eq!(p.max_hp, 95);
        assert_eq!(p.hp, 95);
        assert_eq!(ups[0].healed, 75);
        assert_eq!(ups[0].next_threshold, xp_required(2));
    }

    #[test]
    fn large_gain_levels_repeatedly_with_one_choice_each() {
        let mut p = Player {
            xp: xp_required(1) + xp_required(2) + xp_required(3) + 5,
            ..Player::default()
        };
        let mut asked = Vec::new();
        let mut picker = |_: &Player, level: u32| {
            asked.push(level);
            Upgrade::Damage
        };
        let ups = resolve_level_ups(&mut p, &mut picker);
        assert_eq!(ups.len(), 3);
        assert_eq!(asked, vec![2, 3, 4]);
        assert_eq!(p.level, 4);
        assert_eq!(p.xp, 5);
        assert_eq!(p.damage, 8 + 9);
    }

    #[test]
    fn gold_bonus_upgrade() {
        let mut p = Player {
            xp: xp_required(1),
            ..Player::default()
        };
        resolve_level_ups(&mut p, &mut always(Upgrade::GoldBonus));
        assert_eq!(p.gold_bonus, 2);
    }

    #[test]
    fn parse_menu_choices() {
        assert_eq!(Upgrade::parse("1"), Some(Upgrade::MaxHp));
        assert_eq!(Upgrade::parse(" Damage "), Some(Upgrade::Damage));
        assert_eq!(Upgrade::parse("3"), Some(Upgrade::GoldBonus));
        assert_eq!(Upgrade::parse("4"), None);
        assert!("x".parse::<Upgrade>().is_err());
    }
}
