//! The item catalog, item use, and the shop.

use log::debug;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::player::Player;

/// What an item does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemEffect {
    /// Restore up to this many hit points.
    Heal(u32),
    /// Set shield points to this value. Fails while a shield is up.
    Shield(u32),
}

/// A static catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Inventory key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short description for menus.
    pub description: &'static str,
    /// Shop price in gold.
    pub price: u64,
    /// Effect on use.
    pub effect: ItemEffect,
}

/// Every item that can drop or be bought.
pub const CATALOG: &[Item] = &[
    Item {
        key: "potion",
        name: "Healing Potion",
        description: "Restores 30 HP",
        price: 50,
        effect: ItemEffect::Heal(30),
    },
    Item {
        key: "shield",
        name: "Shield",
        description: "Provides 3 shield points to block hits",
        price: 100,
        effect: ItemEffect::Shield(3),
    },
];

/// Look up a catalog entry by key.
pub fn find(key: &str) -> EngineResult<&'static Item> {
    CATALOG
        .iter()
        .find(|item| item.key == key)
        .ok_or_else(|| EngineError::UnknownItem(key.to_string()))
}

/// The result of using an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUse {
    /// Hit points actually restored.
    Healed {
        /// HP gained.
        amount: u32,
        /// HP after healing.
        hp: u32,
    },
    /// A shield was raised.
    Shielded {
        /// Shield points now active.
        points: u32,
    },
}

/// Use one item from the player's inventory.
///
/// Zero-count entries are removed from the inventory afterwards.
pub fn use_item(player: &mut Player, key: &str) -> EngineResult<ItemUse> {
    let item = find(key)?;
    if player.item_count(key) == 0 {
        return Err(EngineError::ItemUnavailable(item.name.to_string()));
    }

    let outcome = match item.effect {
        ItemEffect::Heal(amount) => {
            if player.hp >= player.max_hp {
                return Err(EngineError::ItemNotUsable(
                    "your HP is already full".to_string(),
                ));
            }
            let before = player.hp;
            player.hp = player.hp.saturating_add(amount).min(player.max_hp);
            ItemUse::Healed {
                amount: player.hp - before,
                hp: player.hp,
            }
        }
        ItemEffect::Shield(points) => {
            if player.shield_points > 0 {
                return Err(EngineError::ItemNotUsable(
                    "a shield is already active".to_string(),
                ));
            }
            player.shield_points = points;
            ItemUse::Shielded { points }
        }
    };

    if let Some(count) = player.inventory.get_mut(key) {
        *count -= 1;
        if *count == 0 {
            player.inventory.remove(key);
        }
    }
    debug!("{} used {}: {:?}", player.name, item.key, outcome);
    Ok(outcome)
}

/// Buy one item from the shop.
pub fn buy_item(player: &mut Player, key: &str) -> EngineResult<&'static Item> {
    let item = find(key)?;
    if player.gold < item.price {
        return Err(EngineError::InsufficientGold {
            price: item.price,
            gold: player.gold,
        });
    }
    player.gold -= item.price;
    player.add_item(item.key, 1);
    debug!("{} bought {} for {} gold", player.name, item.key, item.price);
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            assert!(CATALOG.iter().skip(i + 1).all(|b| b.key != a.key));
        }
        assert_eq!(find("potion").unwrap().price, 50);
        assert!(matches!(find("sword"), Err(EngineError::UnknownItem(_))));
    }

    #[test]
    fn potion_heals_up_to_max() {
        let mut p = Player {
            hp: 70,
            ..Player::default()
        };
        p.add_item("potion", 2);
        let used = use_item(&mut p, "potion").unwrap();
        assert_eq!(used, ItemUse::Healed { amount: 10, hp: 80 });
        assert_eq!(p.item_count("potion"), 1);
    }

    #[test]
    fn potion_refused_at_full_hp() {
        let mut p = Player::default();
        p.add_item("potion", 1);
        assert!(matches!(
            use_item(&mut p, "potion"),
            Err(EngineError::ItemNotUsable(_))
        ));
        assert_eq!(p.item_count("potion"), 1);
    }

    #[test]
    fn shield_sets_points_and_removes_empty_entry() {
        let mut p = Player::default();
        p.add_item("shield", 1);
        assert_eq!(
            use_item(&mut p, "shield").unwrap(),
            ItemUse::Shielded { points: 3 }
        );
        assert_eq!(p.shield_points, 3);
        assert!(!p.inventory.contains_key("shield"));
    }

    #[test]
    fn shield_refused_while_active() {
        let mut p = Player {
            shield_points: 1,
            ..Player::default()
        };
        p.add_item("shield", 1);
        assert!(use_item(&mut p, "shield").is_err());
    }

    #[test]
    fn using_missing_item_fails() {
        let mut p = Player {
            hp: 10,
            ..Player::default()
        };
        assert!(matches!(
            use_item(&mut p, "potion"),
            Err(EngineError::ItemUnavailable(_))
        ));
    }

    #[test]
    fn buying_deducts_gold() {
        let mut p = Player {
            gold: 120,
            ..Player::default()
        };
        buy_item(&mut p, "shield").unwrap();
        assert_eq!(p.gold, 20);
        assert_eq!(p.item_count("shield"), 1);
        let err = buy_item(&mut p, "potion").unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientGold { price: 50, gold: 20 }
        ));
    }
}
