//! Core types for the vocabulary store.
//!
//! Wire names are camelCase so a persisted record written by the mobile
//! client decodes unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An account holder, created by the simulated login or registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub is_authenticated: bool,
}

/// A language from the reference catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-1 code, e.g. "es".
    pub code: String,
    /// Display name, e.g. "Spanish".
    pub name: String,
    /// Flag glyph.
    pub flag: String,
}

impl Language {
    pub fn new(code: &str, name: &str, flag: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            flag: flag.to_string(),
        }
    }
}

/// Proficiency tier on the CEFR-style scale.
///
/// The six known tiers are ordered A1 < ... < C2. Any other label is kept
/// verbatim in `Other` because the level setter accepts arbitrary strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    Other(String),
}

impl LanguageLevel {
    /// The known tiers, lowest first.
    pub const TIERS: [LanguageLevel; 6] = [
        LanguageLevel::A1,
        LanguageLevel::A2,
        LanguageLevel::B1,
        LanguageLevel::B2,
        LanguageLevel::C1,
        LanguageLevel::C2,
    ];

    /// Parse a label. Unknown labels become `Other`.
    pub fn parse(label: &str) -> Self {
        match label {
            "A1" => LanguageLevel::A1,
            "A2" => LanguageLevel::A2,
            "B1" => LanguageLevel::B1,
            "B2" => LanguageLevel::B2,
            "C1" => LanguageLevel::C1,
            "C2" => LanguageLevel::C2,
            other => LanguageLevel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LanguageLevel::A1 => "A1",
            LanguageLevel::A2 => "A2",
            LanguageLevel::B1 => "B1",
            LanguageLevel::B2 => "B2",
            LanguageLevel::C1 => "C1",
            LanguageLevel::C2 => "C2",
            LanguageLevel::Other(label) => label,
        }
    }

    /// Position on the scale (0 = A1), `None` for unknown labels.
    pub fn rank(&self) -> Option<u8> {
        match self {
            LanguageLevel::A1 => Some(0),
            LanguageLevel::A2 => Some(1),
            LanguageLevel::B1 => Some(2),
            LanguageLevel::B2 => Some(3),
            LanguageLevel::C1 => Some(4),
            LanguageLevel::C2 => Some(5),
            LanguageLevel::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.rank().is_some()
    }
}

impl From<String> for LanguageLevel {
    fn from(label: String) -> Self {
        match LanguageLevel::parse(&label) {
            LanguageLevel::Other(_) => LanguageLevel::Other(label),
            known => known,
        }
    }
}

impl From<&str> for LanguageLevel {
    fn from(label: &str) -> Self {
        LanguageLevel::parse(label)
    }
}

impl From<LanguageLevel> for String {
    fn from(level: LanguageLevel) -> Self {
        match level {
            LanguageLevel::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Onboarding profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub selected_language: Language,
    pub level: LanguageLevel,
    /// Words per day. Expected to be positive; not enforced.
    pub daily_words_target: u32,
    pub native_language: Language,
}

/// A single vocabulary entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
    pub id: String,
    pub word: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub example: String,
    pub example_translation: String,
    pub level: LanguageLevel,
    /// Language code of `word`.
    pub language: String,
    pub date_added: DateTime<Utc>,
    pub is_learned: bool,
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

/// A completed (or in-progress) learning session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSession {
    pub id: String,
    pub date: DateTime<Utc>,
    pub words_learned: u32,
    /// Minutes.
    pub time_spent: u32,
    /// Percentage, expected in [0, 100]; not enforced.
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub accuracy: f64,
}

/// Aggregate progress statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub total_words_learned: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub sessions_completed: u32,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub average_accuracy: f64,
    /// Most recent sessions, oldest first, at most seven.
    pub weekly_progress: Vec<LearningSession>,
}

/// JSON has no NaN or infinity and writes them as `null`. Reading `null`
/// back as NaN keeps the rest of the record decodable.
mod lenient_f64 {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// Word list filter used by the word browser.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordFilter {
    #[default]
    All,
    Learned,
    Unlearned,
}

impl WordFilter {
    pub fn matches(self, word: &VocabularyWord) -> bool {
        match self {
            WordFilter::All => true,
            WordFilter::Learned => word.is_learned,
            WordFilter::Unlearned => !word.is_learned,
        }
    }
}
