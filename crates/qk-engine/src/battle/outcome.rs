//! Structured turn outcomes for the caller to render.

use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemUse};
use crate::level::LevelUp;
use crate::reward::VictoryReward;

/// The state of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleState {
    /// Both sides still standing.
    InProgress,
    /// The enemy was defeated.
    Victory,
    /// The player was defeated.
    Defeat,
    /// The player walked away.
    Forfeited,
}

impl BattleState {
    /// Whether no further action is accepted.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl std::fmt::Display for BattleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "In Progress"),
            Self::Victory => write!(f, "Victory"),
            Self::Defeat => write!(f, "Defeat"),
            Self::Forfeited => write!(f, "Forfeited"),
        }
    }
}

/// What happened during one action.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// The input matched no option; the same question stays pending.
    Retry {
        /// Attempts remaining on this question.
        attempts_left: u8,
        /// Why the input was rejected.
        hint: String,
    },
    /// A correct answer struck the enemy.
    Hit {
        /// Damage dealt, including the combo bonus.
        damage: u32,
        /// Combo bonus included in `damage`.
        combo_bonus: u32,
        /// Score gained.
        score_gained: u64,
        /// Enemy HP remaining.
        enemy_hp: u32,
    },
    /// A wrong answer, or the attempt budget ran out.
    Miss {
        /// The correct option.
        correct_answer: String,
        /// Whether the miss came from running out of attempts.
        out_of_attempts: bool,
        /// Whether a shield point absorbed the hit.
        blocked: bool,
        /// HP lost.
        damage_taken: u32,
    },
    /// An inventory item was used.
    ItemUsed(ItemUse),
    /// An item was bought from the shop.
    Purchased(&'static Item),
    /// The player forfeited.
    Forfeited,
}

/// Consequences of a defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefeatPenalty {
    /// Whether score and xp were restored to their pre-battle values.
    pub rolled_back: bool,
    /// Gold taken as a penalty.
    pub gold_lost: u64,
    /// HP after the partial recovery.
    pub recovered_hp: u32,
}

/// How a battle ended, if this action ended it.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Rewards applied for the win.
    Victory(VictoryReward),
    /// Penalties applied for the loss.
    Defeat(DefeatPenalty),
}

/// The full result of one action.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// What happened.
    pub event: TurnEvent,
    /// Levels gained during this action, in order.
    pub level_ups: Vec<LevelUp>,
    /// Set when this action ended the battle.
    pub resolution: Option<Resolution>,
    /// Battle state after the action.
    pub state: BattleState,
}

impl TurnOutcome {
    pub(crate) fn new(event: TurnEvent, state: BattleState) -> Self {
        Self {
            event,
            level_ups: Vec::new(),
            resolution: None,
            state,
        }
    }
}
