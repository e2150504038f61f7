//! Player save files.

use std::path::PathBuf;

use log::{debug, info, warn};
use qk_engine::Player;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::fsutil::{read_json, write_json_atomic};

/// Reads and writes one JSON save file per player.
#[derive(Debug, Clone)]
pub struct PlayerStore {
    config: StoreConfig,
}

impl PlayerStore {
    /// Create a store over the configured save directory.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Path of the save file for `name`.
    pub fn path(&self, name: &str) -> StoreResult<PathBuf> {
        self.config.save_path(name)
    }

    /// Whether a save exists for `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_ok_and(|p| p.is_file())
    }

    /// Load a player, creating a fresh one for first-time names.
    ///
    /// A save that is not valid JSON is logged and replaced by a fresh
    /// player rather than failing. The loaded player always carries
    /// `name`, so the next save lands in the same file.
    pub fn load(&self, name: &str) -> StoreResult<Player> {
        let path = self.path(name)?;
        let raw = match read_json(&path) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("no save for {name}, starting a new player");
                return Ok(Player::named(name));
            }
            Err(StoreError::Json(e)) => {
                warn!("save {} is corrupt ({e}), starting fresh", path.display());
                return Ok(Player::named(name));
            }
            Err(e) => return Err(e),
        };

        let mut player = Player::normalize(&raw);
        if player.name != name {
            debug!("save {} names {:?}, using {name:?}", path.display(), player.name);
            player.name = name.to_string();
        }
        Ok(player)
    }

    /// Write the normalized record to the player's save file.
    ///
    /// On failure the file keeps its previous contents and the caller's
    /// player is untouched, so saving can be retried.
    pub fn save(&self, player: &Player) -> StoreResult<PathBuf> {
        let path = self.path(&player.name)?;
        write_json_atomic(&path, &player.normalized())?;
        info!("saved {} to {}", player.name, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store() -> (TempDir, PlayerStore) {
        let dir = TempDir::new().unwrap();
        let store = PlayerStore::new(StoreConfig::new(dir.path()));
        (dir, store)
    }

    #[test]
    fn first_load_creates_named_player() {
        let (_dir, store) = store();
        let p = store.load("Ayla").unwrap();
        assert_eq!(p, Player::named("Ayla"));
        assert!(!store.exists("Ayla"));
    }

    #[test]
    fn save_then_load_preserves_progress() {
        let (_dir, store) = store();
        let mut p = Player::named("Ayla");
        p.level = 4;
        p.gold = 321;
        p.add_item("potion", 2);
        p.story_shown = true;

        store.save(&p).unwrap();
        assert!(store.exists("Ayla"));
        assert_eq!(store.load("Ayla").unwrap(), p);
    }

    #[test]
    fn save_normalizes_out_of_range_values() {
        let (_dir, store) = store();
        let p = Player {
            name: "Ayla".into(),
            hp: 500,
            ..Player::default()
        };
        store.save(&p).unwrap();
        assert_eq!(store.load("Ayla").unwrap().hp, 80);
    }

    #[test]
    fn corrupt_save_falls_back_to_fresh_player() {
        let (_dir, store) = store();
        let path = store.path("Ayla").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{\"level\": 3,").unwrap();
        assert_eq!(store.load("Ayla").unwrap(), Player::named("Ayla"));
    }

    #[test]
    fn undecodable_save_falls_back_to_fresh_player() {
        let (_dir, store) = store();
        let path = store.path("Ayla").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{\"level\": 3, \"name\": \"\xff\xfe\"}").unwrap();
        assert_eq!(store.load("Ayla").unwrap(), Player::named("Ayla"));
    }

    #[test]
    fn login_name_overrides_the_stored_name() {
        let (_dir, store) = store();
        let path = store.path("Ayla").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"name": "Someone Else", "level": 5}"#).unwrap();

        let p = store.load("Ayla").unwrap();
        assert_eq!(p.name, "Ayla");
        assert_eq!(p.level, 5);
        assert_eq!(store.save(&p).unwrap(), path);
    }

    #[test]
    fn malformed_fields_are_normalized_on_load() {
        let (_dir, store) = store();
        let path = store.path("Ayla").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"level": "7", "hp": -5, "gold": 12.9, "shield_active": true}"#,
        )
        .unwrap();

        let p = store.load("Ayla").unwrap();
        assert_eq!(p.name, "Ayla");
        assert_eq!(p.level, 7);
        assert_eq!(p.hp, 0);
        assert_eq!(p.gold, 12);
    }

    #[test]
    fn names_are_sanitized_into_file_names() {
        let (dir, store) = store();
        store.save(&Player::named("a/b")).unwrap();
        assert!(dir.path().join("saves").join("a_b.json").is_file());
        assert_eq!(store.load("a/b").unwrap().name, "a/b");
    }

    #[test]
    fn blank_names_are_rejected() {
        let (_dir, store) = store();
        assert!(matches!(store.load(" "), Err(StoreError::InvalidName(_))));
    }
}
