//! # Vocabulary Store
//!
//! Application state for a vocabulary-learning client: account and
//! onboarding profile, a word collection, learning sessions, aggregate
//! progress and settings, persisted to device storage.
//!
//! ## Core Concepts
//!
//! - **State**: plain data changed only by applying an [`Action`]
//! - **Store**: owns the state, applies actions in order, publishes changes
//! - **Persistence**: a background subscriber writes the durable subset;
//!   an unreadable record falls back to defaults on open
//! - **Sessions**: flashcard learn/review runs driving the store
//!
//! ## Example
//!
//! ```ignore
//! use vocab_store::{auth, Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::in_dir("./app-data"))?;
//!
//! store.set_first_launch(false);
//! store.set_user(Some(auth::login("ana@example.com", "secret")?));
//!
//! store.start_learning_session();
//! store.mark_word_as_learned("3");
//! store.end_learning_session(1, 5, 100.0);
//! ```

pub mod auth;
pub mod error;
pub mod persist;
pub mod queries;
pub mod seed;
pub mod session;
pub mod state;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{Result, StoreError};
pub use persist::{FileStorage, MemoryStorage, StateStorage, StorageEncoding};
pub use queries::{DailyGoal, LaunchRoute, WeeklySummary};
pub use session::{LearnSession, ReviewSession};
pub use state::{
    apply_action, Action, ActionKind, AppState, PersistedState, UserLifecycle,
    WEEKLY_HISTORY_LIMIT,
};
pub use store::{Store, StoreConfig};
pub use subscriptions::{
    DropReason, OverflowPolicy, StoreEvent, SubscriptionConfig, SubscriptionFilter,
    SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
pub use types::*;
