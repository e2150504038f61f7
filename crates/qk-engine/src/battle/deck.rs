//! Per-battle question cycling.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::question::Question;

/// A shuffled, non-repeating cycle over a battle's question pool.
///
/// Every question is drawn once per pass. When a pass is exhausted the
/// order is reshuffled and a new pass begins.
#[derive(Debug, Clone)]
pub struct QuestionDeck {
    questions: Vec<Question>,
    order: Vec<usize>,
    cursor: usize,
}

impl QuestionDeck {
    /// Create a deck and shuffle the first pass.
    pub fn new(questions: Vec<Question>, rng: &mut StdRng) -> Self {
        let mut order: Vec<usize> = (0..questions.len()).collect();
        order.shuffle(rng);
        Self {
            questions,
            order,
            cursor: 0,
        }
    }

    /// Draw the index of the next question, reshuffling when exhausted.
    /// Returns `None` only for an empty deck.
    pub fn draw(&mut self, rng: &mut StdRng) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        if self.cursor >= self.order.len() {
            self.order.shuffle(rng);
            self.cursor = 0;
        }
        let index = self.order[self.cursor];
        self.cursor += 1;
        Some(index)
    }

    /// The question at an index returned by [`draw`](Self::draw).
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions in the pool.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::sample_questions;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn one_pass_draws_every_question_once() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut deck = QuestionDeck::new(sample_questions(), &mut rng);
        let drawn: HashSet<usize> = (0..deck.len())
            .map(|_| deck.draw(&mut rng).unwrap())
            .collect();
        assert_eq!(drawn.len(), 8);
    }

    #[test]
    fn exhausted_deck_starts_a_new_pass() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut deck = QuestionDeck::new(sample_questions(), &mut rng);
        for _ in 0..8 {
            deck.draw(&mut rng);
        }
        let second: HashSet<usize> = (0..8).map(|_| deck.draw(&mut rng).unwrap()).collect();
        assert_eq!(second.len(), 8);
    }

    #[test]
    fn empty_deck_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut deck = QuestionDeck::new(Vec::new(), &mut rng);
        assert!(deck.is_empty());
        assert_eq!(deck.draw(&mut rng), None);
    }
}
