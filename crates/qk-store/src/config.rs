//! Storage configuration and file layout.

use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};

/// Characters replaced with `_` when a player name becomes a file name.
const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Where game files live.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for all game files.
    pub data_dir: PathBuf,
    /// Entries kept on the leaderboard.
    pub leaderboard_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            leaderboard_capacity: 10,
        }
    }
}

impl StoreConfig {
    /// Configuration rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Directory holding one save file per player.
    pub fn saves_dir(&self) -> PathBuf {
        self.data_dir.join("saves")
    }

    /// Save file for a player name.
    pub fn save_path(&self, name: &str) -> StoreResult<PathBuf> {
        let file = sanitize_name(name)?;
        Ok(self.saves_dir().join(format!("{file}.json")))
    }

    /// The question bank.
    pub fn questions_path(&self) -> PathBuf {
        self.data_dir.join("questions.json")
    }

    /// The leaderboard file.
    pub fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join("leaderboard.json")
    }
}

/// Turn a player name into a file stem.
///
/// Path separators and characters reserved on common filesystems become
/// `_`. Blank names and the relative path names `.` and `..` are rejected.
pub fn sanitize_name(name: &str) -> StoreResult<String> {
    if name.trim().is_empty() || name == "." || name == ".." {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(name
        .chars()
        .map(|c| {
            if UNSAFE_FILENAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect())
}
