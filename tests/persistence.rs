//! Persistence round-trip and rehydration tests.

use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use vocab_store::persist::{self, DEFAULT_NAMESPACE};
use vocab_store::{
    auth, seed, AppState, FileStorage, LanguageLevel, MemoryStorage, PersistedState,
    StateStorage, StorageEncoding, Store, StoreConfig, StoreError, UserProfile,
};

const FLUSH: Duration = Duration::from_secs(5);

fn config(dir: &TempDir, encoding: StorageEncoding) -> StoreConfig {
    StoreConfig {
        encoding,
        ..StoreConfig::in_dir(dir.path().join("store"))
    }
}

fn profile() -> UserProfile {
    UserProfile {
        selected_language: seed::find_language("de").unwrap(),
        level: LanguageLevel::C1,
        daily_words_target: 50,
        native_language: seed::find_language("fr").unwrap(),
    }
}

/// Drive a store through every persisted field.
fn exercise(store: &Store) {
    store.set_first_launch(false);
    store.set_user(Some(auth::login("ana@example.com", "secret").unwrap()));
    store.set_user_profile(profile());
    store.update_language_level("C2");
    store.mark_word_as_learned("4");
    store.start_learning_session();
    store.end_learning_session(6, 14, 95.0);
    store.toggle_dark_mode();
    store.toggle_notifications();
}

#[test]
fn test_round_trip_across_restart() {
    for encoding in [StorageEncoding::Json, StorageEncoding::MessagePack] {
        let dir = TempDir::new().unwrap();

        let before = {
            let store = Store::open(config(&dir, encoding)).unwrap();
            exercise(&store);
            assert!(store.flush(FLUSH));
            store.persisted()
        };

        let store = Store::open(config(&dir, encoding)).unwrap();
        assert_eq!(store.persisted(), before, "encoding {:?}", encoding);
    }
}

#[test]
fn test_words_and_session_are_not_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let store = Store::open(config(&dir, StorageEncoding::Json)).unwrap();
        store.mark_word_as_learned("3");
        store.start_learning_session();
    }

    let store = Store::open(config(&dir, StorageEncoding::Json)).unwrap();
    let state = store.snapshot();
    assert!(state.today_session.is_none());
    assert_eq!(state.current_words, seed::seed_words());
    // progress did persist
    assert_eq!(
        state.progress.total_words_learned,
        seed::initial_progress().total_words_learned + 1
    );
}

#[test]
fn test_drop_drains_pending_writes() {
    let dir = TempDir::new().unwrap();
    {
        let store = Store::open(config(&dir, StorageEncoding::Json)).unwrap();
        for _ in 0..101 {
            store.toggle_dark_mode();
        }
        // no flush: dropping the store must still write the last change
    }

    let store = Store::open(config(&dir, StorageEncoding::Json)).unwrap();
    assert!(store.is_dark_mode());
}

#[test]
fn test_switching_encoding_reads_old_record() {
    let dir = TempDir::new().unwrap();
    {
        let store = Store::open(config(&dir, StorageEncoding::MessagePack)).unwrap();
        store.set_first_launch(false);
    }

    let store = Store::open(config(&dir, StorageEncoding::Json)).unwrap();
    assert!(!store.is_first_launch());
}

#[test]
fn test_malformed_record_falls_back_to_defaults() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set_item(DEFAULT_NAMESPACE, b"{\"state\": {\"progress\": 12}")
        .unwrap();

    let store = Store::with_storage(storage, StoreConfig::default()).unwrap();
    assert_eq!(store.snapshot(), AppState::default());
}

#[test]
fn test_corrupted_frame_falls_back_to_defaults() {
    let storage = Arc::new(MemoryStorage::new());
    let state = PersistedState {
        is_dark_mode: Some(true),
        ..Default::default()
    };
    let mut bytes = persist::encode(&state, StorageEncoding::MessagePack).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x55;
    storage.set_item(DEFAULT_NAMESPACE, &bytes).unwrap();

    let store = Store::with_storage(storage, StoreConfig::default()).unwrap();
    assert!(!store.is_dark_mode());
}

#[test]
fn test_namespace_isolates_records() {
    let storage = Arc::new(MemoryStorage::new());
    {
        let store = Store::with_storage(
            storage.clone(),
            StoreConfig {
                namespace: "profile-a".into(),
                ..Default::default()
            },
        )
        .unwrap();
        store.toggle_dark_mode();
    }

    let other = Store::with_storage(storage.clone(), StoreConfig::default()).unwrap();
    assert!(!other.is_dark_mode());

    let same = Store::with_storage(
        storage,
        StoreConfig {
            namespace: "profile-a".into(),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(same.is_dark_mode());
}

#[test]
fn test_store_directory_is_exclusive() {
    let dir = TempDir::new().unwrap();
    let _store = Store::open(config(&dir, StorageEncoding::Json)).unwrap();

    let second = Store::open(config(&dir, StorageEncoding::Json));
    assert!(matches!(second, Err(StoreError::Locked)));
}

#[test]
fn test_cleared_record_restarts_fresh() {
    let dir = TempDir::new().unwrap();
    {
        let store = Store::open(config(&dir, StorageEncoding::Json)).unwrap();
        exercise(&store);
        store.clear_persisted().unwrap();
    }

    let storage = FileStorage::open(dir.path().join("store")).unwrap();
    assert!(storage.get_item(DEFAULT_NAMESPACE).unwrap().is_none());
    drop(storage);

    let store = Store::open(config(&dir, StorageEncoding::Json)).unwrap();
    assert_eq!(store.snapshot(), AppState::default());
}

#[test]
fn test_non_finite_accuracy_keeps_record() {
    for encoding in [StorageEncoding::Json, StorageEncoding::MessagePack] {
        for accuracy in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let dir = TempDir::new().unwrap();
            {
                let store = Store::open(config(&dir, encoding)).unwrap();
                store.set_user(Some(auth::login("ana@example.com", "secret").unwrap()));
                store.set_first_launch(false);
                store.toggle_dark_mode();
                store.end_learning_session(1, 1, accuracy);
                assert!(store.flush(FLUSH));
                assert_eq!(store.failed_writes(), 0);
            }

            let store = Store::open(config(&dir, encoding)).unwrap();
            let label = format!("{:?} / {}", encoding, accuracy);
            assert_eq!(
                store.user().map(|u| u.email).as_deref(),
                Some("ana@example.com"),
                "{}",
                label
            );
            assert!(!store.is_first_launch(), "{}", label);
            assert!(store.is_dark_mode(), "{}", label);

            let progress = store.progress();
            let last = progress.weekly_progress.last().unwrap();
            assert_eq!(last.words_learned, 1, "{}", label);
            match encoding {
                // JSON has no representation for non-finite numbers
                StorageEncoding::Json => {
                    assert!(progress.average_accuracy.is_nan(), "{}", label);
                    assert!(last.accuracy.is_nan(), "{}", label);
                }
                StorageEncoding::MessagePack => {
                    assert_eq!(last.accuracy.to_bits(), accuracy.to_bits(), "{}", label);
                }
            }
        }
    }
}
