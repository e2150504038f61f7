//! The persisted player record and its normalization gate.
//!
//! Every record read from or written to storage passes through
//! [`Player::normalize`]. It accepts any JSON value, fills missing fields
//! from defaults, coerces numeric fields, and clamps them into range.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name given to records without a usable name.
pub const DEFAULT_NAME: &str = "Hero";
/// Starting and default maximum hit points.
pub const DEFAULT_MAX_HP: u32 = 80;
/// Starting and default damage per correct answer.
pub const DEFAULT_DAMAGE: u32 = 8;

/// A player's persistent progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name. Never blank.
    pub name: String,
    /// Current level (at least 1).
    pub level: u32,
    /// Experience toward the next level.
    pub xp: u64,
    /// Current hit points, at most `max_hp`.
    pub hp: u32,
    /// Maximum hit points (at least 1).
    pub max_hp: u32,
    /// Base damage per correct answer (at least 1).
    pub damage: u32,
    /// Accumulated score.
    pub score: u64,
    /// Consecutive correct answers.
    pub combo: u32,
    /// Gold held.
    pub gold: u64,
    /// Flat gold added to every victory.
    pub gold_bonus: u32,
    /// Item counts keyed by catalog key.
    pub inventory: BTreeMap<String, u32>,
    /// Wrong answers that will be absorbed without damage.
    pub shield_points: u32,
    /// Whether the intro story was already shown.
    pub story_shown: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            level: 1,
            xp: 0,
            hp: DEFAULT_MAX_HP,
            max_hp: DEFAULT_MAX_HP,
            damage: DEFAULT_DAMAGE,
            score: 0,
            combo: 0,
            gold: 0,
            gold_bonus: 0,
            inventory: BTreeMap::new(),
            shield_points: 0,
            story_shown: false,
        }
    }
}

impl Player {
    /// A fresh level 1 player with the given name.
    pub fn named(name: &str) -> Self {
        let mut player = Self::default();
        if !name.trim().is_empty() {
            player.name = name.to_string();
        }
        player
    }

    /// Build a valid player from an arbitrary, possibly malformed record.
    ///
    /// Total and idempotent: any input yields a player satisfying every
    /// range invariant, and normalizing a normalized record changes nothing.
    pub fn normalize(raw: &Value) -> Self {
        let defaults = Self::default();
        let empty = serde_json::Map::new();
        let fields = raw.as_object().unwrap_or(&empty);

        let name = match fields.get("name") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => defaults.name,
        };

        let max_hp = int_field(fields, "max_hp", defaults.max_hp.into(), 1, u32::MAX.into()) as u32;
        let hp = int_field(fields, "hp", defaults.hp.into(), 0, max_hp.into()) as u32;

        let inventory = match fields.get("inventory") {
            Some(Value::Object(items)) => items
                .iter()
                .map(|(key, count)| {
                    let count =
                        coerce_int(count).map_or(0, |c| c.clamp(0, u32::MAX.into()) as u32);
                    (key.clone(), count)
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        Self {
            name,
            level: u32_field(fields, "level", defaults.level, 1),
            xp: u64_field(fields, "xp", defaults.xp),
            hp,
            max_hp,
            damage: u32_field(fields, "damage", defaults.damage, 1),
            score: u64_field(fields, "score", defaults.score),
            combo: u32_field(fields, "combo", defaults.combo, 0),
            gold: u64_field(fields, "gold", defaults.gold),
            gold_bonus: u32_field(fields, "gold_bonus", defaults.gold_bonus, 0),
            inventory,
            shield_points: u32_field(fields, "shield_points", defaults.shield_points, 0),
            story_shown: fields
                .get("story_shown")
                .map_or(defaults.story_shown, truthy),
        }
    }

    /// Re-apply the range invariants to an in-memory record.
    pub fn normalized(&self) -> Self {
        match serde_json::to_value(self) {
            Ok(value) => Self::normalize(&value),
            Err(_) => self.clone(),
        }
    }

    /// Whether the player can still fight.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Restore hit points to the maximum.
    pub fn heal_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Count of an item in the inventory.
    pub fn item_count(&self, key: &str) -> u32 {
        self.inventory.get(key).copied().unwrap_or(0)
    }

    /// Add items to the inventory.
    pub fn add_item(&mut self, key: &str, quantity: u32) {
        let count = self.inventory.entry(key.to_string()).or_insert(0);
        *count = count.saturating_add(quantity);
    }
}

/// Coerce a JSON value to an integer the way a lenient loader would:
/// integers as-is, finite floats truncated, numeric strings parsed,
/// booleans as 0/1. Anything else is not coercible.
pub fn coerce_int(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.into())
            } else if let Some(u) = n.as_u64() {
                Some(u.into())
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i128)
            }
        }
        Value::String(s) => s.trim().parse::<i128>().ok(),
        Value::Bool(b) => Some(i128::from(*b)),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn int_field(
    fields: &serde_json::Map<String, Value>,
    key: &str,
    default: i128,
    min: i128,
    max: i128,
) -> i128 {
    fields
        .get(key)
        .and_then(coerce_int)
        .unwrap_or(default)
        .clamp(min, max)
}

fn u32_field(fields: &serde_json::Map<String, Value>, key: &str, default: u32, min: u32) -> u32 {
    int_field(fields, key, default.into(), min.into(), u32::MAX.into()) as u32
}

fn u64_field(fields: &serde_json::Map<String, Value>, key: &str, default: u64) -> u64 {
    int_field(fields, key, default.into(), 0, u64::MAX.into()) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn assert_invariants(p: &Player) {
        assert!(!p.name.trim().is_empty());
        assert!(p.level >= 1);
        assert!(p.max_hp >= 1);
        assert!(p.hp <= p.max_hp);
        assert!(p.damage >= 1);
    }

    #[test]
    fn empty_input_yields_defaults() {
        assert_eq!(Player::normalize(&Value::Null), Player::default());
        assert_eq!(Player::normalize(&json!({})), Player::default());
        assert_eq!(Player::normalize(&json!([1, 2, 3])), Player::default());
    }

    #[test]
    fn missing_fields_filled_from_defaults() {
        let p = Player::normalize(&json!({"name": "Ayla", "gold": 120}));
        assert_eq!(p.name, "Ayla");
        assert_eq!(p.gold, 120);
        assert_eq!(p.level, 1);
        assert_eq!(p.hp, 80);
        assert_eq!(p.damage, 8);
    }

    #[test]
    fn values_are_clamped() {
        let p = Player::normalize(&json!({
            "level": -4,
            "max_hp": 0,
            "hp": 500,
            "damage": 0,
            "score": -10,
            "combo": -1,
            "gold": -3,
            "gold_bonus": -2,
            "shield_points": -7,
        }));
        assert_eq!(p.level, 1);
        assert_eq!(p.max_hp, 1);
        assert_eq!(p.hp, 1);
        assert_eq!(p.damage, 1);
        assert_eq!(p.score, 0);
        assert_eq!(p.combo, 0);
        assert_eq!(p.gold, 0);
        assert_eq!(p.gold_bonus, 0);
        assert_eq!(p.shield_points, 0);
    }

    #[test]
    fn lenient_coercion() {
        let p = Player::normalize(&json!({
            "level": "7",
            "xp": 12.9,
            "gold": true,
            "damage": "sharp",
        }));
        assert_eq!(p.level, 7);
        assert_eq!(p.xp, 12);
        assert_eq!(p.gold, 1);
        assert_eq!(p.damage, 8);
    }

    #[test]
    fn blank_or_non_string_name_becomes_hero() {
        assert_eq!(Player::normalize(&json!({"name": "   "})).name, "Hero");
        assert_eq!(Player::normalize(&json!({"name": 42})).name, "Hero");
        assert_eq!(Player::named("").name, "Hero");
    }

    #[test]
    fn inventory_counts_are_sanitized() {
        let p = Player::normalize(&json!({
            "inventory": {"potion": 2, "shield": -1, "junk": "lots", "elixir": "3"}
        }));
        assert_eq!(p.item_count("potion"), 2);
        assert_eq!(p.item_count("shield"), 0);
        assert_eq!(p.item_count("junk"), 0);
        assert_eq!(p.item_count("elixir"), 3);

        let p = Player::normalize(&json!({"inventory": ["potion"]}));
        assert!(p.inventory.is_empty());
    }

    #[test]
    fn legacy_shield_flag_is_ignored() {
        let p = Player::normalize(&json!({"shield_active": true, "shield_points": 2}));
        assert_eq!(p.shield_points, 2);
    }

    #[test]
    fn normalized_round_trips_through_json() {
        let mut p = Player::named("Kael");
        p.hp = 200;
        let fixed = p.normalized();
        assert_eq!(fixed.hp, fixed.max_hp);
        let json = serde_json::to_value(&fixed).unwrap();
        assert_eq!(Player::normalize(&json), fixed);
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|i| json!(i)),
            (-1.0e12f64..1.0e12).prop_map(|f| json!(f)),
            "[a-z0-9 ]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map(
                    prop_oneof![
                        Just("name".to_string()),
                        Just("level".to_string()),
                        Just("xp".to_string()),
                        Just("hp".to_string()),
                        Just("max_hp".to_string()),
                        Just("damage".to_string()),
                        Just("gold".to_string()),
                        Just("inventory".to_string()),
                        Just("story_shown".to_string()),
                        "[a-z]{1,6}",
                    ],
                    inner,
                    0..8,
                )
                .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn normalize_is_total_and_idempotent(raw in arb_json()) {
            let once = Player::normalize(&raw);
            assert_invariants(&once);
            let again = Player::normalize(&serde_json::to_value(&once).unwrap());
            prop_assert_eq!(once, again);
        }
    }
}
