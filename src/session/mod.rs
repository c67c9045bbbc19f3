//! Flashcard flows over the store.
//!
//! Both sessions take a snapshot of their card queue when they start, so
//! marking a word learned mid-run does not reshuffle the remaining cards.

mod learn;
mod review;

pub use learn::LearnSession;
pub use review::ReviewSession;
