//! Integration tests for the vocabulary store.

use vocab_store::queries::{self, DailyGoal, LaunchRoute, WeeklySummary};
use vocab_store::{
    auth, seed, ActionKind, LanguageLevel, LearnSession, ReviewSession, Store, StoreConfig,
    StoreEvent, SubscriptionConfig, SubscriptionFilter, UserLifecycle, UserProfile, WordFilter,
};
use std::time::Duration;
use tempfile::TempDir;

fn test_store(dir: &TempDir) -> Store {
    // Route store logs through the test harness; repeat inits are ignored.
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
    Store::open(StoreConfig::in_dir(dir.path().join("store"))).unwrap()
}

fn spanish_profile() -> UserProfile {
    UserProfile {
        selected_language: seed::find_language("es").unwrap(),
        level: LanguageLevel::A2,
        daily_words_target: 15,
        native_language: seed::find_language("en").unwrap(),
    }
}

// --- Realistic Workflow Tests ---

#[test]
fn test_onboarding_workflow() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    assert_eq!(store.read(LaunchRoute::resolve), LaunchRoute::Welcome);

    // Welcome screen dismissed
    store.set_first_launch(false);
    assert_eq!(store.read(LaunchRoute::resolve), LaunchRoute::Login);

    // Sign in
    store.set_user(Some(auth::login("ana@example.com", "secret").unwrap()));
    assert_eq!(store.read(|s| s.lifecycle()), UserLifecycle::AuthenticatedNoProfile);
    assert_eq!(store.read(LaunchRoute::resolve), LaunchRoute::ProfileSetup);

    // Profile setup
    store.set_user_profile(spanish_profile());
    assert_eq!(store.read(|s| s.lifecycle()), UserLifecycle::Ready);
    assert_eq!(store.read(LaunchRoute::resolve), LaunchRoute::Home);

    // Settings screens
    store.update_daily_target(30);
    store.update_language_level("B1");
    let profile = store.user_profile().unwrap();
    assert_eq!(profile.daily_words_target, 30);
    assert_eq!(profile.level, LanguageLevel::B1);
}

#[test]
fn test_learning_then_review_workflow() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);
    let before = store.progress();

    let mut run = LearnSession::begin(&store);
    run.reveal();
    run.mark_learned(&store);
    run.reveal();
    run.mark_learned(&store);
    run.skip();
    run.finish(&store, 12);

    let progress = store.progress();
    assert_eq!(progress.total_words_learned, before.total_words_learned + 2);
    assert_eq!(progress.sessions_completed, before.sessions_completed + 1);
    assert_eq!(progress.current_streak, before.current_streak + 1);
    assert_eq!(progress.weekly_progress.len(), 7);
    assert_eq!(progress.weekly_progress.last().unwrap().time_spent, 12);

    // Newly learned words join the review queue
    let words = store.current_words();
    let learned = queries::learned_words(&words).count();
    let mut review = ReviewSession::new(&words);
    assert_eq!(review.len(), learned);

    while !review.is_finished() {
        review.reveal();
        review.know_it();
    }
    assert_eq!(review.score(), (learned as u32, learned as u32));
}

#[test]
fn test_word_browser_and_summaries() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);
    store.set_user_profile(spanish_profile());

    let words = store.current_words();
    let all = queries::filter_words(&words, "", WordFilter::All);
    let learned = queries::filter_words(&words, "", WordFilter::Learned);
    let unlearned = queries::filter_words(&words, "", WordFilter::Unlearned);
    assert_eq!(all.len(), learned.len() + unlearned.len());

    let summary = store.read(WeeklySummary::for_state);
    assert_eq!(summary.weekly_target, 15 * 7);

    let goal = store.read(DailyGoal::today);
    assert_eq!(goal.target, 15);
}

#[test]
fn test_logout_keeps_learning_data() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    store.set_user(Some(auth::login("ana@example.com", "secret").unwrap()));
    store.set_user_profile(spanish_profile());
    store.mark_word_as_learned("3");
    store.start_learning_session();
    let total = store.progress().total_words_learned;

    store.logout();

    assert!(store.user().is_none());
    assert!(store.user_profile().is_none());
    assert!(store.today_session().is_none());
    assert_eq!(store.progress().total_words_learned, total);
    assert!(store.snapshot().word("3").unwrap().is_learned);
}

#[test]
fn test_reset_progress_scope() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    store.mark_word_as_learned("3");
    store.end_learning_session(4, 10, 80.0);
    store.reset_progress();

    let progress = store.progress();
    assert_eq!(progress.total_words_learned, 0);
    assert_eq!(progress.current_streak, 0);
    assert_eq!(progress.longest_streak, 0);
    assert_eq!(progress.sessions_completed, 0);
    assert_eq!(progress.average_accuracy, 0.0);
    assert!(progress.weekly_progress.is_empty());

    for (word, seeded) in store.current_words().iter().zip(seed::seed_words()) {
        assert!(!word.is_learned);
        assert_eq!(word.review_count, 0);
        assert_eq!(word.word, seeded.word);
        assert_eq!(word.translation, seeded.translation);
        assert_eq!(word.level, seeded.level);
        assert_eq!(word.example, seeded.example);
    }
}

#[test]
fn test_filtered_subscription() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    let handle = store.subscribe(SubscriptionConfig {
        filter: SubscriptionFilter::actions(vec![ActionKind::EndLearningSession]),
        ..Default::default()
    });

    store.toggle_dark_mode();
    store.start_learning_session();
    store.end_learning_session(3, 6, 100.0);

    match handle.recv_timeout(Duration::from_secs(1)).unwrap() {
        StoreEvent::Changed {
            sequence,
            action,
            persisted,
        } => {
            assert_eq!(sequence, 3);
            assert_eq!(action, ActionKind::EndLearningSession);
            let progress = persisted.progress.unwrap();
            assert_eq!(progress.weekly_progress.last().unwrap().words_learned, 3);
        }
        other => panic!("Expected Changed event, got {:?}", other),
    }
    assert!(handle.recv_timeout(Duration::from_millis(50)).is_err());
}
