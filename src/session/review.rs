//! Review run over learned words.

use crate::queries;
use crate::types::VocabularyWord;

/// A flashcard review of words already learned.
///
/// Review is self-scored and read-only: it does not touch the store.
#[derive(Clone, Debug)]
pub struct ReviewSession {
    queue: Vec<VocabularyWord>,
    index: usize,
    revealed: bool,
    score: u32,
    answered: u32,
}

impl ReviewSession {
    pub fn new(words: &[VocabularyWord]) -> Self {
        Self {
            queue: queries::learned_words(words).cloned().collect(),
            index: 0,
            revealed: false,
            score: 0,
            answered: 0,
        }
    }

    /// The card on screen, `None` when nothing is left to review.
    pub fn current(&self) -> Option<&VocabularyWord> {
        self.queue.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// (1-based card number, queue length).
    pub fn position(&self) -> (usize, usize) {
        (self.index.min(self.queue.len().saturating_sub(1)) + 1, self.queue.len())
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn know_it(&mut self) {
        if self.current().is_some() {
            self.score += 1;
            self.answer();
        }
    }

    pub fn dont_know(&mut self) {
        if self.current().is_some() {
            self.answer();
        }
    }

    /// (known, answered).
    pub fn score(&self) -> (u32, u32) {
        (self.score, self.answered)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.queue.len()
    }

    fn answer(&mut self) {
        self.answered += 1;
        self.index += 1;
        self.revealed = false;
    }
}
