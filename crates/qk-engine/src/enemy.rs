//! Enemy templates and the scaled enemy factory.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::progression::level_scaling_factor;

/// Lower bound of the random stat variance.
pub const VARIANCE_MIN: f64 = 0.9;
/// Upper bound of the random stat variance.
pub const VARIANCE_MAX: f64 = 1.1;

/// Unscaled stats of an enemy family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    /// Family name, also the first rung of its naming ladder.
    pub name: &'static str,
    /// Base hit points.
    pub hp: u32,
    /// Base damage per hit.
    pub damage: u32,
    /// Base experience reward.
    pub xp_reward: u32,
    /// Base gold reward.
    pub gold_base: u32,
    /// Display names, indexed by player level.
    pub ladder: [&'static str; 10],
}

const SLIME: EnemyTemplate = EnemyTemplate {
    name: "Slime",
    hp: 35,
    damage: 6,
    xp_reward: 10,
    gold_base: 25,
    ladder: [
        "Slime",
        "Green Slime",
        "Acid Slime",
        "Giant Slime",
        "Toxic Slime",
        "Crystal Slime",
        "Shadow Slime",
        "Ancient Slime",
        "Void Slime",
        "Primordial Slime",
    ],
};

const GOBLIN: EnemyTemplate = EnemyTemplate {
    name: "Goblin",
    hp: 60,
    damage: 10,
    xp_reward: 20,
    gold_base: 40,
    ladder: [
        "Goblin",
        "Goblin Scout",
        "Goblin Warrior",
        "Goblin Berserker",
        "Goblin Champion",
        "Goblin Chieftain",
        "Goblin Warlord",
        "Goblin King",
        "Demon Goblin",
        "Goblin Overlord",
    ],
};

const ORC: EnemyTemplate = EnemyTemplate {
    name: "Orc",
    hp: 90,
    damage: 16,
    xp_reward: 35,
    gold_base: 65,
    ladder: [
        "Orc",
        "Orc Brute",
        "Orc Warrior",
        "Orc Savage",
        "Orc Destroyer",
        "Orc Warchief",
        "Orc Juggernaut",
        "Orc Warlord",
        "Demon Orc",
        "Orc Titan",
    ],
};

const DRAGON: EnemyTemplate = EnemyTemplate {
    name: "Dragon",
    hp: 150,
    damage: 25,
    xp_reward: 75,
    gold_base: 120,
    ladder: [
        "Dragon",
        "Young Dragon",
        "Adult Dragon",
        "Elder Dragon",
        "Ancient Dragon",
        "Wyrm Dragon",
        "Shadow Dragon",
        "Void Dragon",
        "Primordial Dragon",
        "Cosmic Dragon",
    ],
};

impl EnemyTemplate {
    /// The template fought at a difficulty. Random battles fight goblins.
    pub fn for_difficulty(difficulty: Difficulty) -> &'static Self {
        match difficulty {
            Difficulty::Easy => &SLIME,
            Difficulty::Medium | Difficulty::Random => &GOBLIN,
            Difficulty::Hard => &ORC,
            Difficulty::Boss => &DRAGON,
        }
    }

    /// Display name for a player level.
    ///
    /// One rung per level up to level 10, then `8 + (level - 10) / 3`,
    /// clamped to the last rung. Levels 11 and 12 step back to rung 8.
    pub fn name_for_level(&self, level: u32) -> &'static str {
        let last = self.ladder.len() - 1;
        let index = match level {
            0..=1 => 0,
            2..=10 => (level - 1) as usize,
            _ => 8 + ((level - 10) / 3) as usize,
        };
        self.ladder[index.min(last)]
    }
}

/// A scaled enemy, owned by a single battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Display name.
    pub name: String,
    /// Current hit points.
    pub hp: u32,
    /// Hit points at creation.
    pub max_hp: u32,
    /// Damage dealt on a wrong answer.
    pub damage: u32,
    /// Experience granted on defeat.
    pub xp_reward: u32,
    /// Gold granted on defeat, before level and bonus gold.
    pub gold_base: u32,
}

impl Enemy {
    /// Spawn an enemy for a difficulty and player level with random variance.
    pub fn spawn(difficulty: Difficulty, level: u32, rng: &mut StdRng) -> Self {
        let variance = rng.random_range(VARIANCE_MIN..=VARIANCE_MAX);
        Self::scaled(EnemyTemplate::for_difficulty(difficulty), level, variance)
    }

    /// Build an enemy from a template with a fixed variance.
    ///
    /// Combat stats never fall below the template values.
    pub fn scaled(template: &EnemyTemplate, level: u32, variance: f64) -> Self {
        let level = level.max(1);
        let scale = level_scaling_factor(level) * variance;
        let steps = f64::from(level - 1);

        let hp = scale_stat(template.hp, scale).max(template.hp).max(1);
        let damage = scale_stat(template.damage, scale).max(template.damage);

        Self {
            name: template.name_for_level(level).to_string(),
            hp,
            max_hp: hp,
            damage,
            xp_reward: scale_stat(template.xp_reward, 1.0 + 0.1 * steps),
            gold_base: scale_stat(template.gold_base, 1.0 + 0.15 * steps),
        }
    }

    /// Whether the enemy has been defeated.
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Apply damage, flooring hit points at zero. Returns the damage dealt.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }
}

fn scale_stat(base: u32, factor: f64) -> u32 {
    let scaled = (f64::from(base) * factor).round();
    if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else if scaled <= 0.0 {
        0
    } else {
        scaled as u32
    }
}
