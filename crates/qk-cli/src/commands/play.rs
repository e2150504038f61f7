//! The interactive game: main menu, battle menu and the battle loop.

use colored::Colorize;
use log::warn;
use qk_engine::level::UpgradePicker;
use qk_engine::progression::xp_required;
use qk_engine::{
    Action, Battle, BattleConfig, BattleState, Difficulty, Player, Question, TurnEvent, Upgrade,
};
use qk_store::{Leaderboard, PlayerStore, QuestionStore, StoreConfig};

use crate::outfit::{inventory_menu, shop_menu};
use crate::prompt::Prompt;
use crate::render::{health_bar, shield_bar, turn_lines};
use crate::story::{INTRO, chapter_for};

pub fn run(config: &StoreConfig, name: &str, seed: Option<u64>) -> Result<(), String> {
    let players = PlayerStore::new(config.clone());
    let returning = players.exists(name);
    let mut player = players
        .load(name)
        .map_err(|e| format!("cannot load {name}: {e}"))?;
    let questions = QuestionStore::new(config)
        .load()
        .map_err(|e| format!("cannot load questions: {e}"))?;

    let mut game = Game {
        config,
        players: &players,
        questions: &questions,
        seed,
        battles: 0,
        prompt: Prompt::stdin(),
    };

    if !returning {
        println!("  {}", format!("A new knight, {name}, takes the oath!").green());
    }
    if !player.story_shown {
        show_intro();
        player.story_shown = true;
        game.save(&player);
    }

    game.main_menu(&mut player)
}

/// What the player chose after a battle.
enum AfterBattle {
    BattleMenu,
    MainMenu,
    Quit,
}

struct Game<'a> {
    config: &'a StoreConfig,
    players: &'a PlayerStore,
    questions: &'a [Question],
    seed: Option<u64>,
    battles: u64,
    prompt: Prompt,
}

impl Game<'_> {
    fn main_menu(&mut self, player: &mut Player) -> Result<(), String> {
        loop {
            show_status(player);
            println!("  1. Battle enemies");
            println!("  2. View leaderboard");
            println!("  3. Inventory");
            println!("  4. Visit shop");
            println!("  5. Read story intro");
            println!("  6. Save & quit");

            let Some(choice) = self.prompt.ask("\n  Choose your action: ")? else {
                return self.save_and_quit(player);
            };
            match choice.as_str() {
                "1" => {
                    if let AfterBattle::Quit = self.battle_menu(player)? {
                        return self.save_and_quit(player);
                    }
                }
                "2" => super::leaderboard::run(self.config)?,
                "3" => {
                    inventory_menu(&mut self.prompt, player)?;
                    self.save(player);
                }
                "4" => {
                    shop_menu(&mut self.prompt, player)?;
                    self.save(player);
                }
                "5" => show_intro(),
                "6" => return self.save_and_quit(player),
                _ => println!("  {}", "Invalid choice.".yellow()),
            }
        }
    }

    fn battle_menu(&mut self, player: &mut Player) -> Result<AfterBattle, String> {
        loop {
            println!();
            println!("  {}", "Choose your battle!".bold());
            println!("  1. Easy battle    (Slimes)");
            println!("  2. Medium battle  (Goblins)");
            println!("  3. Hard battle    (Orcs)");
            println!("  4. Boss battle    (Dragons)");
            println!("  5. Random mix     (Mystery)");
            println!("  6. Return to main menu");
            println!(
                "\n  Lv.{} | {}",
                player.level,
                health_bar(player.hp, player.max_hp, 12)
            );

            let Some(choice) = self.prompt.ask("  Choose your challenge: ")? else {
                return Ok(AfterBattle::Quit);
            };
            if choice == "6" {
                return Ok(AfterBattle::MainMenu);
            }
            let Some(difficulty) = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| Difficulty::all().get(i).copied())
            else {
                println!("  {}", "Invalid choice.".yellow());
                continue;
            };

            let next = self.fight(player, difficulty)?;
            match next {
                Some(AfterBattle::BattleMenu) | None => {}
                Some(other) => return Ok(other),
            }
        }
    }

    /// Run one encounter. `None` returns to the battle menu without a
    /// battle having taken place.
    fn fight(
        &mut self,
        player: &mut Player,
        difficulty: Difficulty,
    ) -> Result<Option<AfterBattle>, String> {
        if !player.is_alive() {
            println!("  {}", "You need to heal before battling!".yellow());
            return Ok(None);
        }

        let battle_config = self.battle_config();
        self.battles += 1;

        let chapter = chapter_for(player.level);
        println!();
        println!("  {}", chapter.name.bold());
        println!("  {}", chapter.line(difficulty));

        let mut battle = match Battle::encounter(player, difficulty, self.questions, &battle_config)
        {
            Ok(battle) => battle,
            Err(e) => {
                println!("  {}", format!("Cannot start battle: {e}").yellow());
                return Ok(None);
            }
        };

        let enemy = battle.enemy().clone();
        println!();
        println!("  Preparing {difficulty} battle against {}...", enemy.name);
        if difficulty == Difficulty::Random {
            println!("  This battle mixes easy, medium and hard questions!");
        }
        println!(
            "  Enemy: {} | Damage {}",
            health_bar(enemy.hp, enemy.max_hp, 12),
            enemy.damage
        );
        if !self.prompt.confirm("  Ready to fight?", true)? {
            println!("  Battle cancelled.");
            return Ok(None);
        }

        let interrupted = self.battle_loop(&mut battle)?;
        let state = battle.state();
        let answered = battle.answered();
        drop(battle);

        println!("  Questions answered: {answered}");
        self.save(player);
        match Leaderboard::update(self.config, player) {
            Ok(board) => {
                if let Some(rank) = board.rank_of(&player.name) {
                    println!("  Leaderboard rank: #{rank}");
                }
            }
            Err(e) => warn!("leaderboard update failed: {e}"),
        }

        if interrupted {
            return Ok(Some(AfterBattle::Quit));
        }
        match state {
            BattleState::Victory if difficulty == Difficulty::Boss => {
                println!("  {}", "You've defeated a mighty boss!".green().bold());
                Ok(Some(AfterBattle::MainMenu))
            }
            BattleState::Victory => self.after_victory().map(Some),
            BattleState::Defeat => {
                println!("  Perhaps try an easier difficulty or heal up first...");
                Ok(Some(AfterBattle::MainMenu))
            }
            BattleState::Forfeited | BattleState::InProgress => Ok(Some(AfterBattle::MainMenu)),
        }
    }

    /// Drive a battle to its end. Returns `true` when input ran out.
    fn battle_loop(&mut self, battle: &mut Battle<'_>) -> Result<bool, String> {
        while !battle.is_over() {
            show_battle(battle);
            println!("  [A] Answer question  [I] Inventory  [S] Shop  [Q] Forfeit");
            let Some(choice) = self.prompt.ask("  Choose (Enter to answer): ")? else {
                self.forfeit(battle)?;
                return Ok(true);
            };

            match choice.to_lowercase().as_str() {
                "i" => inventory_menu(&mut self.prompt, battle)?,
                "s" => shop_menu(&mut self.prompt, battle)?,
                "q" => {
                    if self.prompt.confirm("  Are you sure you want to forfeit?", false)? {
                        self.forfeit(battle)?;
                    }
                }
                "" | "a" => {
                    if !self.ask_question(battle)? {
                        self.forfeit(battle)?;
                        return Ok(true);
                    }
                }
                _ => println!("  {}", "Invalid choice.".yellow()),
            }
        }
        Ok(false)
    }

    /// Ask the pending question until the turn resolves. Returns `false`
    /// when input ran out.
    fn ask_question(&mut self, battle: &mut Battle<'_>) -> Result<bool, String> {
        let question = battle.question().map_err(|e| e.to_string())?;
        println!();
        println!("  {}", question.prompt.bold());
        for (i, option) in question.options.iter().enumerate() {
            println!("    {}. {option}", i + 1);
        }
        let max_attempts = battle.attempts_left();

        loop {
            let attempt = max_attempts - battle.attempts_left() + 1;
            let label = format!("  Your answer (attempt {attempt}/{max_attempts}): ");
            let Some(answer) = self.prompt.ask(&label)? else {
                return Ok(false);
            };

            let enemy_name = battle.enemy().name.clone();
            let mut picker = UpgradeMenu {
                prompt: &mut self.prompt,
            };
            let outcome = battle
                .act(Action::Answer(answer), &mut picker)
                .map_err(|e| e.to_string())?;
            for line in turn_lines(&outcome, &enemy_name) {
                println!("  {line}");
            }
            if !matches!(outcome.event, TurnEvent::Retry { .. }) {
                return Ok(true);
            }
        }
    }

    fn forfeit(&mut self, battle: &mut Battle<'_>) -> Result<(), String> {
        let enemy_name = battle.enemy().name.clone();
        let mut picker = UpgradeMenu {
            prompt: &mut self.prompt,
        };
        let outcome = battle
            .act(Action::Forfeit, &mut picker)
            .map_err(|e| e.to_string())?;
        for line in turn_lines(&outcome, &enemy_name) {
            println!("  {line}");
        }
        Ok(())
    }

    fn after_victory(&mut self) -> Result<AfterBattle, String> {
        loop {
            println!();
            println!("  What would you like to do next?");
            println!("  1. Choose a different difficulty");
            println!("  2. Return to main menu");
            match self.prompt.ask("  Choose: ")?.as_deref() {
                None => return Ok(AfterBattle::Quit),
                Some("1") => return Ok(AfterBattle::BattleMenu),
                Some("2") => return Ok(AfterBattle::MainMenu),
                Some(_) => println!("  {}", "Invalid choice.".yellow()),
            }
        }
    }

    fn battle_config(&self) -> BattleConfig {
        match self.seed {
            Some(seed) => BattleConfig::default().with_seed(seed.wrapping_add(self.battles)),
            None => BattleConfig::default(),
        }
    }

    fn save(&self, player: &Player) {
        if let Err(e) = self.players.save(player) {
            println!("  {}", format!("Error saving game: {e}").red());
        }
    }

    fn save_and_quit(&self, player: &Player) -> Result<(), String> {
        println!("  Saving your progress...");
        self.players
            .save(player)
            .map_err(|e| format!("cannot save {}: {e}", player.name))?;
        if let Err(e) = Leaderboard::update(self.config, player) {
            warn!("leaderboard update failed: {e}");
        }
        println!("  {}", "Game saved successfully!".green());
        println!("  See you next time!");
        Ok(())
    }
}

/// Asks the player for an upgrade on every level gained.
struct UpgradeMenu<'a> {
    prompt: &'a mut Prompt,
}

impl UpgradePicker for UpgradeMenu<'_> {
    fn pick(&mut self, player: &Player, new_level: u32) -> Upgrade {
        println!();
        println!(
            "  {} {} is now level {new_level}!",
            "Level up!".yellow().bold(),
            player.name
        );
        println!("  Choose your upgrade:");
        for (i, upgrade) in Upgrade::all().iter().enumerate() {
            println!("    {}) {upgrade}", i + 1);
        }
        loop {
            match self.prompt.ask("  Choose (1, 2, or 3): ") {
                Ok(Some(choice)) => match Upgrade::parse(&choice) {
                    Some(upgrade) => return upgrade,
                    None => println!("  {}", "Please enter 1, 2, or 3.".yellow()),
                },
                Ok(None) | Err(_) => return Upgrade::MaxHp,
            }
        }
    }
}

fn show_intro() {
    println!();
    println!("  {}", "Quicx Knight: The Astral Oath".bold());
    println!();
    for line in INTRO.lines() {
        println!("  {line}");
    }
}

fn show_status(player: &Player) {
    let required = xp_required(player.level);
    let percent = player.xp as f64 / required as f64 * 100.0;
    println!();
    println!("  {}", format!("Welcome back, {}!", player.name).bold());
    println!(
        "  Level: {} | XP: {}/{required} ({percent:.1}%)",
        player.level, player.xp
    );
    println!("  {}", health_bar(player.hp, player.max_hp, 15));
    println!("  Gold: {} | Score: {}", player.gold, player.score);
    println!("  Current chapter: {}", chapter_for(player.level).name);
    println!();
}

fn show_battle(battle: &Battle<'_>) {
    let player = battle.player();
    let enemy = battle.enemy();
    println!();
    println!("  {}", format!("Battle vs {}", enemy.name).bold());
    println!("  {}", player.name);
    println!("    {}", health_bar(player.hp, player.max_hp, 20));
    println!(
        "    Damage: {} | Combo: {} | XP: {}",
        player.damage, player.combo, player.xp
    );
    if player.shield_points > 0 {
        println!("    {}", shield_bar(player.shield_points));
    }
    println!("  {}", enemy.name);
    println!("    {}", health_bar(enemy.hp, enemy.max_hp, 20));
    println!("    Damage: {}", enemy.damage);
    println!();
}
