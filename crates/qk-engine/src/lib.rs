//! Battle and progression engine for Quicx Knight.
//!
//! Provides the leveling and reward mathematics, the enemy factory, the
//! player record normalization gate, the item catalog, and the turn-based
//! battle state machine. The engine performs no I/O: every decision comes
//! from the caller and every turn returns a structured outcome to render.

pub mod battle;
pub mod config;
pub mod difficulty;
pub mod enemy;
pub mod error;
pub mod item;
pub mod level;
pub mod player;
pub mod progression;
pub mod question;
pub mod reward;

pub use battle::{Action, Battle, BattleState, Resolution, TurnEvent, TurnOutcome};
pub use config::BattleConfig;
pub use difficulty::Difficulty;
pub use enemy::Enemy;
pub use error::{EngineError, EngineResult};
pub use item::{CATALOG, Item, ItemEffect};
pub use level::{LevelUp, Upgrade};
pub use player::Player;
pub use question::Question;
pub use reward::VictoryReward;
