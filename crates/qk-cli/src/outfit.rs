//! Inventory and shop menus, usable from the main menu or mid-battle.

use colored::Colorize;
use qk_engine::item::{self, CATALOG, Item, ItemUse};
use qk_engine::{Battle, EngineResult, Player};

use crate::prompt::Prompt;
use crate::render::{health_bar, item_use_line};

/// Something that owns a player's inventory and gold.
pub trait Outfitter {
    fn player(&self) -> &Player;
    fn use_item(&mut self, key: &str) -> EngineResult<ItemUse>;
    fn buy(&mut self, key: &str) -> EngineResult<&'static Item>;
}

impl Outfitter for Player {
    fn player(&self) -> &Player {
        self
    }

    fn use_item(&mut self, key: &str) -> EngineResult<ItemUse> {
        item::use_item(self, key)
    }

    fn buy(&mut self, key: &str) -> EngineResult<&'static Item> {
        item::buy_item(self, key)
    }
}

impl Outfitter for Battle<'_> {
    fn player(&self) -> &Player {
        Battle::player(self)
    }

    fn use_item(&mut self, key: &str) -> EngineResult<ItemUse> {
        Battle::use_item(self, key)
    }

    fn buy(&mut self, key: &str) -> EngineResult<&'static Item> {
        Battle::buy(self, key)
    }
}

/// Show the inventory and let the player use items until they press Enter.
pub fn inventory_menu(prompt: &mut Prompt, owner: &mut dyn Outfitter) -> Result<(), String> {
    loop {
        let player = owner.player();
        println!();
        println!("  {}", "Inventory".bold());
        let owned: Vec<(&'static Item, u32)> = CATALOG
            .iter()
            .map(|item| (item, player.item_count(item.key)))
            .filter(|(_, count)| *count > 0)
            .collect();

        if owned.is_empty() {
            println!("  Empty");
        }
        for (i, (item, count)) in owned.iter().enumerate() {
            println!(
                "  [{}] {}: {count} - {}",
                menu_letter(i),
                item.name,
                item.description
            );
        }
        println!();
        println!("  Gold: {}", player.gold);
        println!("  {}", health_bar(player.hp, player.max_hp, 15));
        if player.shield_points > 0 {
            println!("  Shield points: {}", player.shield_points);
        }
        if owned.is_empty() {
            return Ok(());
        }

        let Some(choice) = prompt.ask("  Item letter to use, or Enter to go back: ")? else {
            return Ok(());
        };
        if choice.is_empty() {
            return Ok(());
        }
        let Some((item, _)) = letter_index(&choice).and_then(|i| owned.get(i)) else {
            println!("  {}", "Invalid selection.".yellow());
            continue;
        };
        match owner.use_item(item.key) {
            Ok(used) => println!("  {}", item_use_line(&used)),
            Err(e) => println!("  {}", e.to_string().yellow()),
        }
    }
}

/// The shop: buy catalog items until the player enters 0.
pub fn shop_menu(prompt: &mut Prompt, owner: &mut dyn Outfitter) -> Result<(), String> {
    loop {
        println!();
        println!("  {}", "Adventure Shop".bold());
        for (i, item) in CATALOG.iter().enumerate() {
            println!("  {}. {:<15} - {}", i + 1, item.name, item.description);
            println!("     Price: {} gold", item.price);
        }
        println!("  0. Exit shop");
        println!("  Your gold: {}", owner.player().gold);

        let Some(choice) = prompt.ask("  Item number to buy (0 to exit): ")? else {
            return Ok(());
        };
        if choice == "0" || choice.is_empty() {
            return Ok(());
        }
        let Some(item) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| CATALOG.get(i))
        else {
            println!("  {}", "Invalid item number.".yellow());
            continue;
        };

        if owner.player().gold < item.price {
            println!("  {}", "Not enough gold!".yellow());
            continue;
        }
        if !prompt.confirm(&format!("  Buy {} for {} gold?", item.name, item.price), true)? {
            println!("  Purchase cancelled.");
            continue;
        }
        match owner.buy(item.key) {
            Ok(bought) => println!("  {}", format!("Purchased {}!", bought.name).green()),
            Err(e) => println!("  {}", e.to_string().yellow()),
        }
    }
}

fn menu_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

fn letter_index(choice: &str) -> Option<usize> {
    let mut chars = choice.chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !c.is_ascii_uppercase() {
        return None;
    }
    Some(usize::from(c as u8 - b'A'))
}
