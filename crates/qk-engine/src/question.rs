//! Trivia questions, answer matching, and per-difficulty question pools.

use log::warn;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::BattleConfig;
use crate::difficulty::Difficulty;
use crate::error::{EngineError, EngineResult};

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt text.
    #[serde(rename = "question")]
    pub prompt: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// The correct option.
    pub answer: String,
    /// Tier used to build question pools.
    pub difficulty: Difficulty,
}

/// How a line of player input relates to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerCheck {
    /// The input selects the correct option.
    Correct,
    /// The input selects a wrong option.
    Incorrect,
    /// The input is blank or selects nothing; the player may try again.
    Unrecognized(String),
}

impl Question {
    /// Create a question.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            answer: answer.into(),
            difficulty,
        }
    }

    /// Check that the question is well-formed.
    pub fn validate(&self) -> EngineResult<()> {
        let reject = |reason: &str| {
            Err(EngineError::InvalidQuestion {
                prompt: self.prompt.clone(),
                reason: reason.to_string(),
            })
        };

        if self.prompt.trim().is_empty() {
            return reject("empty prompt");
        }
        if self.options.len() < 2 {
            return reject("fewer than two options");
        }
        for (i, option) in self.options.iter().enumerate() {
            if self.options[i + 1..].contains(option) {
                return reject("duplicate option");
            }
        }
        if self.answer.trim().is_empty() {
            return reject("empty answer");
        }
        if !self.options.contains(&self.answer) {
            return reject("answer is not one of the options");
        }
        if self.difficulty == Difficulty::Random {
            return reject("random is not a question tier");
        }
        Ok(())
    }

    /// Match player input against the options.
    ///
    /// Accepts a 1-based option number or the option text, compared
    /// case-insensitively after trimming.
    pub fn check(&self, input: &str) -> AnswerCheck {
        let input = input.trim();
        if input.is_empty() {
            return AnswerCheck::Unrecognized("please enter an answer".to_string());
        }

        if input.chars().all(|c| c.is_ascii_digit()) {
            return match input.parse::<usize>() {
                Ok(n) if (1..=self.options.len()).contains(&n) => {
                    self.grade(&self.options[n - 1])
                }
                _ => AnswerCheck::Unrecognized(format!(
                    "enter a number between 1 and {}",
                    self.options.len()
                )),
            };
        }

        let wanted = input.to_lowercase();
        if self.answer.trim().to_lowercase() == wanted {
            return AnswerCheck::Correct;
        }
        match self
            .options
            .iter()
            .find(|o| o.trim().to_lowercase() == wanted)
        {
            Some(option) => self.grade(option),
            None => AnswerCheck::Unrecognized(
                "use an option number or the exact option text".to_string(),
            ),
        }
    }

    fn grade(&self, option: &str) -> AnswerCheck {
        if option == self.answer {
            AnswerCheck::Correct
        } else {
            AnswerCheck::Incorrect
        }
    }
}

/// Drop invalid questions, logging each one.
pub fn retain_valid(questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|q| match q.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("skipping question: {e}");
                false
            }
        })
        .collect()
}

/// Select the questions eligible for an encounter.
///
/// Easy draws easy questions, medium draws easy and medium, hard draws
/// medium and hard, boss draws boss only. Random samples a handful from
/// the three lower tiers. Easy, medium and hard fall back to the whole
/// list when their tiers are empty; boss and random do not.
pub fn eligible_pool(
    questions: &[Question],
    difficulty: Difficulty,
    config: &BattleConfig,
    rng: &mut StdRng,
) -> EngineResult<Vec<Question>> {
    let tiers: &[Difficulty] = match difficulty {
        Difficulty::Easy => &[Difficulty::Easy],
        Difficulty::Medium => &[Difficulty::Easy, Difficulty::Medium],
        Difficulty::Hard => &[Difficulty::Medium, Difficulty::Hard],
        Difficulty::Boss => &[Difficulty::Boss],
        Difficulty::Random => &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
    };

    let mut pool: Vec<Question> = questions
        .iter()
        .filter(|q| tiers.contains(&q.difficulty))
        .cloned()
        .collect();

    match difficulty {
        Difficulty::Random if !pool.is_empty() => {
            let (low, high) = config.random_pool;
            let wanted = rng.random_range(low.min(high)..=high.max(low));
            pool.shuffle(rng);
            pool.truncate(wanted.clamp(1, pool.len()));
        }
        Difficulty::Easy | Difficulty::Medium | Difficulty::Hard if pool.is_empty() => {
            warn!("no {difficulty} questions found, using the full question list");
            pool = questions.to_vec();
        }
        _ => {}
    }

    if pool.is_empty() {
        return Err(EngineError::NoQuestions(difficulty.as_str().to_string()));
    }
    Ok(pool)
}

/// The built-in question set used when no question file exists.
pub fn sample_questions() -> Vec<Question> {
    let q = |prompt: &str, options: [&str; 4], answer: &str, difficulty| {
        Question::new(
            prompt,
            options.iter().map(|o| o.to_string()).collect(),
            answer,
            difficulty,
        )
    };
    vec![
        q("What is 2 + 2?", ["3", "4", "5", "6"], "4", Difficulty::Easy),
        q(
            "What is the capital of France?",
            ["London", "Berlin", "Paris", "Madrid"],
            "Paris",
            Difficulty::Easy,
        ),
        q("What is 15 × 8?", ["110", "120", "130", "140"], "120", Difficulty::Medium),
        q(
            "Which planet is known as the Red Planet?",
            ["Venus", "Mars", "Jupiter", "Saturn"],
            "Mars",
            Difficulty::Medium,
        ),
        q(
            "What is the square root of 144?",
            ["11", "12", "13", "14"],
            "12",
            Difficulty::Hard,
        ),
        q(
            "Who wrote 'To Kill a Mockingbird'?",
            ["Harper Lee", "Mark Twain", "Ernest Hemingway", "F. Scott Fitzgerald"],
            "Harper Lee",
            Difficulty::Hard,
        ),
        q(
            "What is the chemical symbol for Gold?",
            ["Go", "Gd", "Au", "Ag"],
            "Au",
            Difficulty::Boss,
        ),
        q(
            "In which year did World War II end?",
            ["1944", "1945", "1946", "1947"],
            "1945",
            Difficulty::Boss,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn capital() -> Question {
        Question::new(
            "What is the capital of France?",
            vec!["London".into(), "Berlin".into(), "Paris".into()],
            "Paris",
            Difficulty::Easy,
        )
    }

    #[test]
    fn samples_are_valid() {
        let samples = sample_questions();
        assert_eq!(samples.len(), 8);
        assert!(samples.iter().all(|q| q.validate().is_ok()));
    }

    #[test]
    fn validation_rejects_malformed_records() {
        let mut q = capital();
        q.answer = "Rome".into();
        assert!(q.validate().is_err());

        let mut q = capital();
        q.options = vec!["Paris".into()];
        assert!(q.validate().is_err());

        let mut q = capital();
        q.options.push("Paris".into());
        assert!(q.validate().is_err());

        let mut q = capital();
        q.prompt = " ".into();
        assert!(q.validate().is_err());
    }

    #[test]
    fn check_by_number_and_text() {
        let q = capital();
        assert_eq!(q.check("3"), AnswerCheck::Correct);
        assert_eq!(q.check("1"), AnswerCheck::Incorrect);
        assert_eq!(q.check("  pArIs "), AnswerCheck::Correct);
        assert_eq!(q.check("berlin"), AnswerCheck::Incorrect);
    }

    #[test]
    fn digits_are_read_as_option_numbers_first() {
        let q = Question::new("2 + 2?", vec!["3".into(), "4".into()], "4", Difficulty::Easy);
        assert!(matches!(q.check("4"), AnswerCheck::Unrecognized(_)));
        assert_eq!(q.check("2"), AnswerCheck::Correct);
        assert_eq!(q.check("1"), AnswerCheck::Incorrect);
    }

    #[test]
    fn check_flags_unusable_input() {
        let q = capital();
        assert!(matches!(q.check(""), AnswerCheck::Unrecognized(_)));
        assert!(matches!(q.check("0"), AnswerCheck::Unrecognized(_)));
        assert!(matches!(q.check("9"), AnswerCheck::Unrecognized(_)));
        assert!(matches!(q.check("Madrid"), AnswerCheck::Unrecognized(_)));
    }

    #[test]
    fn retain_valid_drops_bad_questions() {
        let mut bad = capital();
        bad.answer = "Lyon".into();
        let kept = retain_valid(vec![capital(), bad]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn pools_follow_tier_rules() {
        let all = sample_questions();
        let config = BattleConfig::default();
        let mut rng = StdRng::seed_from_u64(42);

        let medium = eligible_pool(&all, Difficulty::Medium, &config, &mut rng).unwrap();
        assert_eq!(medium.len(), 4);
        assert!(medium.iter().all(|q| q.difficulty != Difficulty::Hard));

        let hard = eligible_pool(&all, Difficulty::Hard, &config, &mut rng).unwrap();
        assert!(hard.iter().all(|q| matches!(
            q.difficulty,
            Difficulty::Medium | Difficulty::Hard
        )));

        let boss = eligible_pool(&all, Difficulty::Boss, &config, &mut rng).unwrap();
        assert_eq!(boss.len(), 2);
    }

    #[test]
    fn random_pool_is_capped_by_available_questions() {
        let all = sample_questions();
        let mut rng = StdRng::seed_from_u64(7);
        let pool = eligible_pool(&all, Difficulty::Random, &BattleConfig::default(), &mut rng)
            .unwrap();
        assert_eq!(pool.len(), 6);
        assert!(pool.iter().all(|q| q.difficulty != Difficulty::Boss));
    }

    #[test]
    fn boss_without_boss_questions_refuses() {
        let only_easy = vec![capital()];
        let mut rng = StdRng::seed_from_u64(1);
        let config = BattleConfig::default();
        assert!(matches!(
            eligible_pool(&only_easy, Difficulty::Boss, &config, &mut rng),
            Err(EngineError::NoQuestions(_))
        ));
        let hard = eligible_pool(&only_easy, Difficulty::Hard, &config, &mut rng).unwrap();
        assert_eq!(hard.len(), 1);
    }
}
