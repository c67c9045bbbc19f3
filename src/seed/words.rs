//! Seed vocabulary, session history and progress for a fresh store.

use crate::types::{LanguageLevel, LearningSession, UserProgress, VocabularyWord};
use chrono::{DateTime, NaiveDate, Utc};

/// One row of the seed vocabulary.
struct SeedWord {
    id: &'static str,
    word: &'static str,
    translation: &'static str,
    phonetic: Option<&'static str>,
    example: &'static str,
    example_translation: &'static str,
    level: LanguageLevel,
    learned: bool,
    reviews: u32,
}

const SEED_LANGUAGE: &str = "es";

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .map(|n| n.and_utc())
        .unwrap_or_default()
}

const SEED_WORDS: [SeedWord; 10] = [
    SeedWord {
        id: "1",
        word: "hola",
        translation: "hello",
        phonetic: Some("/ˈo.la/"),
        example: "Hola, ¿cómo estás?",
        example_translation: "Hello, how are you?",
        level: LanguageLevel::A1,
        learned: true,
        reviews: 3,
    },
    SeedWord {
        id: "2",
        word: "gracias",
        translation: "thank you",
        phonetic: Some("/ˈɡɾa.sjas/"),
        example: "Muchas gracias por tu ayuda.",
        example_translation: "Thank you very much for your help.",
        level: LanguageLevel::A1,
        learned: true,
        reviews: 5,
    },
    SeedWord {
        id: "3",
        word: "biblioteca",
        translation: "library",
        phonetic: Some("/bi.βljoˈte.ka/"),
        example: "Estudio en la biblioteca.",
        example_translation: "I study at the library.",
        level: LanguageLevel::A2,
        learned: false,
        reviews: 0,
    },
    SeedWord {
        id: "4",
        word: "desarrollar",
        translation: "to develop",
        phonetic: Some("/de.sa.roˈʎaɾ/"),
        example: "Queremos desarrollar una aplicación.",
        example_translation: "We want to develop an app.",
        level: LanguageLevel::B1,
        learned: false,
        reviews: 1,
    },
    SeedWord {
        id: "5",
        word: "aprovechar",
        translation: "to take advantage of",
        phonetic: None,
        example: "Hay que aprovechar el buen tiempo.",
        example_translation: "We have to take advantage of the good weather.",
        level: LanguageLevel::B1,
        learned: true,
        reviews: 2,
    },
    SeedWord {
        id: "6",
        word: "madrugada",
        translation: "early morning",
        phonetic: Some("/ma.ðɾuˈɣa.ða/"),
        example: "Llegamos de madrugada.",
        example_translation: "We arrived in the early morning.",
        level: LanguageLevel::B2,
        learned: false,
        reviews: 0,
    },
    SeedWord {
        id: "7",
        word: "imprescindible",
        translation: "essential",
        phonetic: None,
        example: "El agua es imprescindible para vivir.",
        example_translation: "Water is essential for living.",
        level: LanguageLevel::B2,
        learned: false,
        reviews: 0,
    },
    SeedWord {
        id: "8",
        word: "sobremesa",
        translation: "after-meal conversation",
        phonetic: None,
        example: "La sobremesa duró dos horas.",
        example_translation: "The after-meal conversation lasted two hours.",
        level: LanguageLevel::C1,
        learned: false,
        reviews: 0,
    },
    SeedWord {
        id: "9",
        word: "desenvolverse",
        translation: "to manage oneself",
        phonetic: None,
        example: "Sabe desenvolverse en cualquier situación.",
        example_translation: "She knows how to manage in any situation.",
        level: LanguageLevel::C1,
        learned: false,
        reviews: 0,
    },
    SeedWord {
        id: "10",
        word: "idiosincrasia",
        translation: "idiosyncrasy",
        phonetic: None,
        example: "Cada país tiene su idiosincrasia.",
        example_translation: "Every country has its idiosyncrasy.",
        level: LanguageLevel::C2,
        learned: false,
        reviews: 0,
    },
];

/// Seed vocabulary used when a store starts without persisted words.
pub fn seed_words() -> Vec<VocabularyWord> {
    SEED_WORDS
        .iter()
        .enumerate()
        .map(|(i, row)| VocabularyWord {
            id: row.id.to_string(),
            word: row.word.to_string(),
            translation: row.translation.to_string(),
            phonetic: row.phonetic.map(str::to_string),
            audio_url: None,
            image_url: None,
            example: row.example.to_string(),
            example_translation: row.example_translation.to_string(),
            level: row.level.clone(),
            language: SEED_LANGUAGE.to_string(),
            date_added: day(2024, 1, 10 + i as u32),
            is_learned: row.learned,
            review_count: row.reviews,
            last_reviewed: (row.reviews > 0).then(|| day(2024, 1, 21)),
        })
        .collect()
}

/// A week of historical sessions, oldest first.
pub fn seed_sessions() -> Vec<LearningSession> {
    let rows: [(u32, u32, f64); 7] = [
        (8, 15, 85.0),
        (12, 20, 90.0),
        (5, 10, 80.0),
        (15, 25, 92.0),
        (10, 18, 88.0),
        (0, 0, 0.0),
        (9, 14, 86.0),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (words, minutes, accuracy))| LearningSession {
            id: format!("seed-{}", i + 1),
            date: day(2024, 1, 15 + i as u32),
            words_learned: *words,
            time_spent: *minutes,
            accuracy: *accuracy,
        })
        .collect()
}

/// Aggregate progress shown before the learner's first session.
pub fn initial_progress() -> UserProgress {
    UserProgress {
        total_words_learned: 45,
        current_streak: 7,
        longest_streak: 12,
        sessions_completed: 23,
        average_accuracy: 87.0,
        weekly_progress: seed_sessions(),
    }
}
