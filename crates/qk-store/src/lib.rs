//! File-backed persistence for Quicx Knight.
//!
//! Every repository here is an explicitly owned value created from a
//! [`StoreConfig`]. Reads are lenient: missing or malformed files fall back
//! to defaults instead of failing. Writes go through a temporary file and a
//! rename so a crash never leaves a half-written save behind.

pub mod config;
pub mod error;
mod fsutil;
pub mod leaderboard;
pub mod players;
pub mod questions;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use players::PlayerStore;
pub use questions::QuestionStore;
