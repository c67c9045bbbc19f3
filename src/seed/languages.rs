//! Supported languages, level tiers and daily-target choices.

use crate::types::{Language, LanguageLevel};

/// (code, name, flag) for languages that can be learned.
const LEARNING_LANGUAGES: &[(&str, &str, &str)] = &[
    ("en", "English", "🇺🇸"),
    ("es", "Spanish", "🇪🇸"),
    ("fr", "French", "🇫🇷"),
    ("de", "German", "🇩🇪"),
    ("it", "Italian", "🇮🇹"),
    ("pt", "Portuguese", "🇵🇹"),
    ("ja", "Japanese", "🇯🇵"),
    ("ko", "Korean", "🇰🇷"),
    ("zh", "Chinese", "🇨🇳"),
];

/// (code, name, flag) for languages a learner can declare as native.
const NATIVE_LANGUAGE_TABLE: &[(&str, &str, &str)] = &[
    ("en", "English", "🇺🇸"),
    ("es", "Spanish", "🇪🇸"),
    ("fr", "French", "🇫🇷"),
    ("de", "German", "🇩🇪"),
    ("zh", "Chinese", "🇨🇳"),
    ("ja", "Japanese", "🇯🇵"),
    ("ru", "Russian", "🇷🇺"),
    ("ar", "Arabic", "🇸🇦"),
];

/// Level tiers offered during onboarding, lowest first.
pub const LANGUAGE_LEVELS: [LanguageLevel; 6] = LanguageLevel::TIERS;

/// Daily word targets offered during onboarding.
pub const DAILY_WORDS_OPTIONS: [u32; 6] = [5, 10, 15, 20, 30, 50];

/// Target shown when no profile has been set up yet.
pub const DEFAULT_DAILY_TARGET: u32 = 20;

fn build(table: &[(&str, &str, &str)]) -> Vec<Language> {
    table
        .iter()
        .map(|(code, name, flag)| Language::new(code, name, flag))
        .collect()
}

/// Languages available for learning.
pub fn available_languages() -> Vec<Language> {
    build(LEARNING_LANGUAGES)
}

/// Languages available as the learner's native language.
pub fn native_languages() -> Vec<Language> {
    build(NATIVE_LANGUAGE_TABLE)
}

/// Look up a catalog entry by code in either list.
pub fn find_language(code: &str) -> Option<Language> {
    LEARNING_LANGUAGES
        .iter()
        .chain(NATIVE_LANGUAGE_TABLE.iter())
        .find(|(c, _, _)| *c == code)
        .map(|(c, name, flag)| Language::new(c, name, flag))
}
