//! The high-score table.

use std::path::PathBuf;

use log::{info, warn};
use qk_engine::Player;
use qk_engine::player::coerce_int;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::fsutil::{read_json, write_json_atomic};

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name.
    pub name: String,
    /// Score at the time of recording.
    pub score: u64,
    /// Level at the time of recording.
    pub level: u32,
    /// Experience at the time of recording.
    pub xp: u64,
}

impl LeaderboardEntry {
    /// Snapshot a player.
    pub fn from_player(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            score: player.score,
            level: player.level,
            xp: player.xp,
        }
    }

    /// Normalize a raw record. Returns `None` for records without a name or
    /// with numeric fields that cannot be read as integers.
    pub fn normalize(raw: &Value) -> Option<Self> {
        let fields = raw.as_object()?;
        let name = match fields.get("name")? {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let int = |key: &str, default: i128| match fields.get(key) {
            None | Some(Value::Null) => Some(default),
            Some(value) => coerce_int(value),
        };

        Some(Self {
            name,
            score: int("score", 0)?.clamp(0, u64::MAX.into()) as u64,
            level: int("level", 1)?.clamp(1, u32::MAX.into()) as u32,
            xp: int("xp", 0)?.clamp(0, u64::MAX.into()) as u64,
        })
    }
}

/// The top scores, highest first, one row per name.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    capacity: usize,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// An empty leaderboard backed by the configured file.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.leaderboard_path(),
            capacity: config.leaderboard_capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Load the leaderboard. A missing or malformed file loads as empty.
    pub fn load(config: &StoreConfig) -> StoreResult<Self> {
        let mut board = Self::new(config);
        let raw = match read_json(&board.path) {
            Ok(raw) => raw,
            Err(StoreError::Json(e)) => {
                warn!("{} is not valid JSON ({e}), starting empty", board.path.display());
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(Value::Array(records)) = raw {
            board.entries = records
                .iter()
                .filter_map(LeaderboardEntry::normalize)
                .collect();
            board.entries.truncate(board.capacity);
        }
        Ok(board)
    }

    /// Rows in rank order.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Whether no score has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1-based rank of a name, if listed.
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name).map(|i| i + 1)
    }

    /// Replace the player's row with a fresh snapshot and re-rank.
    ///
    /// Ties keep their previous order, with the new row after existing
    /// rows of the same score.
    pub fn record(&mut self, player: &Player) {
        self.entries.retain(|e| e.name != player.name);
        self.entries.push(LeaderboardEntry::from_player(player));
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }

    /// Write the leaderboard file.
    pub fn save(&self) -> StoreResult<()> {
        write_json_atomic(&self.path, &self.entries)?;
        info!("leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Load, record the player and save in one step.
    pub fn update(config: &StoreConfig, player: &Player) -> StoreResult<Self> {
        let mut board = Self::load(config)?;
        board.record(player);
        board.save()?;
        Ok(board)
    }
}
