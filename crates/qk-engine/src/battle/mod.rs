//! The battle state machine.
//!
//! A battle owns its enemy and borrows the player exclusively until it is
//! dropped. The caller drives it one [`Action`] at a time; each call
//! returns a [`TurnOutcome`] describing what changed.
//!
//! ```text
//!              answer / item / shop
//!             +-----------------+
//!             v                 |
//!        InProgress ------------+
//!          |   |   |
//!   enemy 0|   |   |forfeit
//!          v   |   v
//!    Victory   |  Forfeited
//!              |player 0
//!              v
//!           Defeat
//! ```

pub mod deck;
pub mod outcome;

pub use deck::QuestionDeck;
pub use outcome::{BattleState, DefeatPenalty, Resolution, TurnEvent, TurnOutcome};

use log::{debug, info};
use rand::rngs::StdRng;

use crate::config::BattleConfig;
use crate::difficulty::Difficulty;
use crate::enemy::Enemy;
use crate::error::{EngineError, EngineResult};
use crate::item::{self, Item, ItemUse};
use crate::level::{UpgradePicker, resolve_level_ups};
use crate::player::Player;
use crate::question::{AnswerCheck, Question, eligible_pool, retain_valid};
use crate::reward::apply_victory;

/// Highest combo that still adds damage and score.
pub const COMBO_CAP: u32 = 10;
/// Score for every correct answer before the combo bonus.
pub const BASE_SCORE: u64 = 50;
/// Score per point of combo bonus.
pub const SCORE_PER_COMBO: u64 = 5;
/// Most gold a defeat can cost.
pub const MAX_GOLD_PENALTY: u64 = 100;

/// Something the player does on their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Answer the pending question with an option number or option text.
    Answer(String),
    /// Use an inventory item by key.
    UseItem(String),
    /// Buy an item from the shop by key.
    Buy(String),
    /// Give up the encounter.
    Forfeit,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    index: usize,
    attempts_used: u8,
}

/// One encounter between a player and an enemy.
pub struct Battle<'p> {
    player: &'p mut Player,
    enemy: Enemy,
    difficulty: Difficulty,
    deck: QuestionDeck,
    pending: Option<Pending>,
    state: BattleState,
    start_score: u64,
    start_xp: u64,
    max_attempts: u8,
    answered: u32,
    rng: StdRng,
}

impl<'p> Battle<'p> {
    /// Start a battle against a prepared enemy with a prepared question pool.
    ///
    /// Invalid questions are dropped. Fails if the player or the enemy has
    /// no HP, or no valid question remains.
    pub fn start(
        player: &'p mut Player,
        enemy: Enemy,
        difficulty: Difficulty,
        questions: Vec<Question>,
        config: &BattleConfig,
    ) -> EngineResult<Self> {
        Self::build(player, enemy, difficulty, questions, config, config.rng())
    }

    /// Spawn an enemy and build the question pool for `difficulty`, then
    /// start the battle.
    pub fn encounter(
        player: &'p mut Player,
        difficulty: Difficulty,
        questions: &[Question],
        config: &BattleConfig,
    ) -> EngineResult<Self> {
        if !player.is_alive() {
            return Err(EngineError::PlayerDown(player.name.clone()));
        }
        let mut rng = config.rng();
        let pool = eligible_pool(questions, difficulty, config, &mut rng)?;
        let enemy = Enemy::spawn(difficulty, player.level, &mut rng);
        Self::build(player, enemy, difficulty, pool, config, rng)
    }

    fn build(
        player: &'p mut Player,
        enemy: Enemy,
        difficulty: Difficulty,
        questions: Vec<Question>,
        config: &BattleConfig,
        mut rng: StdRng,
    ) -> EngineResult<Self> {
        if !player.is_alive() {
            return Err(EngineError::PlayerDown(player.name.clone()));
        }
        if enemy.is_defeated() {
            return Err(EngineError::EnemyDown(enemy.name));
        }
        let questions = retain_valid(questions);
        if questions.is_empty() {
            return Err(EngineError::NoQuestions(difficulty.as_str().to_string()));
        }

        info!(
            "{} (level {}) engages {} ({} HP) on {difficulty} with {} questions",
            player.name,
            player.level,
            enemy.name,
            enemy.hp,
            questions.len()
        );

        Ok(Self {
            start_score: player.score,
            start_xp: player.xp,
            player,
            enemy,
            difficulty,
            deck: QuestionDeck::new(questions, &mut rng),
            pending: None,
            state: BattleState::InProgress,
            max_attempts: config.max_attempts.max(1),
            answered: 0,
            rng,
        })
    }

    /// The current state.
    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Whether the battle has ended.
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// The player.
    pub fn player(&self) -> &Player {
        self.player
    }

    /// The enemy.
    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// The encounter difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Questions answered (right or wrong) so far.
    pub fn answered(&self) -> u32 {
        self.answered
    }

    /// Input attempts left on the pending question.
    pub fn attempts_left(&self) -> u8 {
        let used = self.pending.map_or(0, |p| p.attempts_used);
        self.max_attempts.saturating_sub(used)
    }

    /// The question awaiting an answer, drawing the next one if needed.
    pub fn question(&mut self) -> EngineResult<&Question> {
        let index = self.pending_index()?;
        self.deck
            .get(index)
            .ok_or_else(|| EngineError::NoQuestions(self.difficulty.as_str().to_string()))
    }

    fn pending_index(&mut self) -> EngineResult<usize> {
        self.ensure_in_progress()?;
        if let Some(pending) = self.pending {
            return Ok(pending.index);
        }
        let index = self
            .deck
            .draw(&mut self.rng)
            .ok_or_else(|| EngineError::NoQuestions(self.difficulty.as_str().to_string()))?;
        self.pending = Some(Pending {
            index,
            attempts_used: 0,
        });
        Ok(index)
    }

    fn ensure_in_progress(&self) -> EngineResult<()> {
        if self.state.is_terminal() {
            Err(EngineError::BattleOver)
        } else {
            Ok(())
        }
    }

    /// Perform one action.
    ///
    /// `picker` is consulted once for every level gained during the action.
    pub fn act(
        &mut self,
        action: Action,
        picker: &mut dyn UpgradePicker,
    ) -> EngineResult<TurnOutcome> {
        self.ensure_in_progress()?;
        match action {
            Action::Answer(input) => self.answer(&input, picker),
            Action::UseItem(key) => {
                let used = self.use_item(&key)?;
                Ok(TurnOutcome::new(TurnEvent::ItemUsed(used), self.state))
            }
            Action::Buy(key) => {
                let bought = self.buy(&key)?;
                Ok(TurnOutcome::new(TurnEvent::Purchased(bought), self.state))
            }
            Action::Forfeit => {
                self.state = BattleState::Forfeited;
                self.pending = None;
                info!("{} forfeited against {}", self.player.name, self.enemy.name);
                Ok(TurnOutcome::new(TurnEvent::Forfeited, self.state))
            }
        }
    }

    /// Use an inventory item. Does not spend a turn.
    pub fn use_item(&mut self, key: &str) -> EngineResult<ItemUse> {
        self.ensure_in_progress()?;
        item::use_item(self.player, key)
    }

    /// Buy one item from the shop. Does not spend a turn.
    pub fn buy(&mut self, key: &str) -> EngineResult<&'static Item> {
        self.ensure_in_progress()?;
        item::buy_item(self.player, key)
    }

    fn answer(&mut self, input: &str, picker: &mut dyn UpgradePicker) -> EngineResult<TurnOutcome> {
        let index = self.pending_index()?;
        let question = self
            .deck
            .get(index)
            .ok_or_else(|| EngineError::NoQuestions(self.difficulty.as_str().to_string()))?;
        let correct_answer = question.answer.clone();

        let (correct, out_of_attempts) = match question.check(input) {
            AnswerCheck::Correct => (true, false),
            AnswerCheck::Incorrect => (false, false),
            AnswerCheck::Unrecognized(hint) => {
                let used = self.pending.map_or(0, |p| p.attempts_used) + 1;
                if used < self.max_attempts {
                    self.pending = Some(Pending {
                        index,
                        attempts_used: used,
                    });
                    debug!("unrecognized answer {input:?}, {} attempts left", self.max_attempts - used);
                    return Ok(TurnOutcome::new(
                        TurnEvent::Retry {
                            attempts_left: self.max_attempts - used,
                            hint,
                        },
                        self.state,
                    ));
                }
                (false, true)
            }
        };

        self.pending = None;
        self.answered += 1;

        let mut outcome = if correct {
            self.strike(picker)
        } else {
            self.suffer(correct_answer, out_of_attempts)
        };

        if self.enemy.is_defeated() {
            self.state = BattleState::Victory;
            let reward = apply_victory(self.player, &self.enemy, self.difficulty, &mut self.rng);
            outcome
                .level_ups
                .extend(resolve_level_ups(self.player, picker));
            outcome.resolution = Some(Resolution::Victory(reward));
        } else if !self.player.is_alive() {
            self.state = BattleState::Defeat;
            outcome.resolution = Some(Resolution::Defeat(self.apply_defeat()));
        }

        outcome.state = self.state;
        Ok(outcome)
    }

    fn strike(&mut self, picker: &mut dyn UpgradePicker) -> TurnOutcome {
        let combo_bonus = self.player.combo.min(COMBO_CAP);
        let damage = self.player.damage.saturating_add(combo_bonus);
        self.enemy.take_damage(damage);
        self.player.combo = self.player.combo.saturating_add(1);

        let score_gained = BASE_SCORE + SCORE_PER_COMBO * u64::from(combo_bonus);
        self.player.score = self.player.score.saturating_add(score_gained);

        debug!(
            "correct: {damage} damage to {}, {} HP left, combo {}",
            self.enemy.name, self.enemy.hp, self.player.combo
        );

        let mut outcome = TurnOutcome::new(
            TurnEvent::Hit {
                damage,
                combo_bonus,
                score_gained,
                enemy_hp: self.enemy.hp,
            },
            self.state,
        );
        outcome.level_ups = resolve_level_ups(self.player, picker);
        outcome
    }

    fn suffer(&mut self, correct_answer: String, out_of_attempts: bool) -> TurnOutcome {
        self.player.combo = 0;

        let (blocked, damage_taken) = if self.player.shield_points > 0 {
            self.player.shield_points -= 1;
            (true, 0)
        } else {
            let taken = self.enemy.damage.min(self.player.hp);
            self.player.hp -= taken;
            (false, taken)
        };

        debug!(
            "wrong: blocked={blocked}, {damage_taken} damage, {} HP left",
            self.player.hp
        );

        TurnOutcome::new(
            TurnEvent::Miss {
                correct_answer,
                out_of_attempts,
                blocked,
                damage_taken,
            },
            self.state,
        )
    }

    fn apply_defeat(&mut self) -> DefeatPenalty {
        let rolled_back = self.difficulty.penalizes_defeat();
        let mut gold_lost = 0;
        if rolled_back {
            self.player.score = self.start_score;
            self.player.xp = self.start_xp;
            gold_lost = (self.player.gold / 4).min(MAX_GOLD_PENALTY);
            self.player.gold -= gold_lost;
        }
        self.player.hp = self.player.max_hp / 4;

        info!(
            "{} was defeated by {}: rollback={rolled_back}, -{gold_lost} gold",
            self.player.name, self.enemy.name
        );

        DefeatPenalty {
            rolled_back,
            gold_lost,
            recovered_hp: self.player.hp,
        }
    }
}
