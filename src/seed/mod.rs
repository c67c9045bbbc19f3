//! Reference catalog and seed content.
//!
//! The store consumes these as read-only inputs when it builds a fresh
//! state. Nothing here validates profile or word data against the catalog.

mod languages;
mod words;

pub use languages::{
    available_languages, find_language, native_languages, DAILY_WORDS_OPTIONS,
    DEFAULT_DAILY_TARGET, LANGUAGE_LEVELS,
};
pub use words::{initial_progress, seed_sessions, seed_words};
