//! Learning run over unlearned words.

use crate::queries;
use crate::store::Store;
use crate::types::VocabularyWord;

/// A flashcard run over the words not yet learned.
#[derive(Clone, Debug)]
pub struct LearnSession {
    queue: Vec<VocabularyWord>,
    index: usize,
    revealed: bool,
    complete: bool,
    words_learned: u32,
    skipped: u32,
}

impl LearnSession {
    /// Snapshot the unlearned words without touching the store.
    pub fn new(words: &[VocabularyWord]) -> Self {
        let queue: Vec<_> = queries::unlearned_words(words).cloned().collect();
        let complete = queue.is_empty();
        Self {
            queue,
            index: 0,
            revealed: false,
            complete,
            words_learned: 0,
            skipped: 0,
        }
    }

    /// Open a learning session in the store and snapshot its queue.
    pub fn begin(store: &Store) -> Self {
        store.start_learning_session();
        store.read(|s| Self::new(&s.current_words))
    }

    /// The card on screen, `None` once the run is complete.
    pub fn current(&self) -> Option<&VocabularyWord> {
        if self.complete {
            None
        } else {
            self.queue.get(self.index)
        }
    }

    /// (1-based card number, queue length).
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.queue.len())
    }

    /// Fraction of the queue reached, in [0, 1].
    pub fn progress_ratio(&self) -> f64 {
        if self.queue.is_empty() {
            return 1.0;
        }
        (self.index + 1) as f64 / self.queue.len() as f64
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Words marked learned during this run.
    pub fn words_learned(&self) -> u32 {
        self.words_learned
    }

    /// "I know this": mark the current word learned and move on.
    pub fn mark_learned(&mut self, store: &Store) {
        let Some(word) = self.current() else {
            return;
        };
        store.mark_word_as_learned(&word.id);
        self.words_learned += 1;

        if self.index + 1 < self.queue.len() {
            self.advance();
        } else {
            self.complete = true;
        }
    }

    /// "Need more practice": move on without marking. Stays on the last card.
    pub fn skip(&mut self) {
        if self.complete {
            return;
        }
        self.skipped += 1;
        if self.index + 1 < self.queue.len() {
            self.advance();
        }
    }

    /// Start over from the words that are still unlearned.
    pub fn restart(&mut self, store: &Store) {
        let words_learned = self.words_learned;
        let skipped = self.skipped;
        *self = store.read(|s| Self::new(&s.current_words));
        self.words_learned = words_learned;
        self.skipped = skipped;
    }

    /// Share of answered cards that were marked learned, as a percentage.
    pub fn accuracy(&self) -> f64 {
        let answered = self.words_learned + self.skipped;
        if answered == 0 {
            return 0.0;
        }
        (self.words_learned as f64 * 100.0 / answered as f64).round()
    }

    /// Close the store's learning session with this run's results.
    pub fn finish(self, store: &Store, time_spent: u32) {
        store.end_learning_session(self.words_learned, time_spent, self.accuracy());
    }

    fn advance(&mut self) {
        self.index += 1;
        self.revealed = false;
    }
}
