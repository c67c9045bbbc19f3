//! Main Store struct tying all components together.

use crate::error::Result;
use crate::persist::{
    codec, FileStorage, MemoryStorage, Persister, StateStorage, StorageEncoding,
    DEFAULT_NAMESPACE,
};
use crate::state::{apply_action, Action, AppState, PersistedState};
use crate::subscriptions::{
    OverflowPolicy, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
    SubscriptionManager,
};
use crate::types::{
    LanguageLevel, LearningSession, User, UserProfile, UserProgress, VocabularyWord,
};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Directory for durable storage. `None` keeps everything in memory.
    pub storage_dir: Option<PathBuf>,

    /// Storage key of the persisted record.
    pub namespace: String,

    /// Encoding used when writing the persisted record.
    pub encoding: StorageEncoding,

    /// Queue length between the store and the persister.
    pub event_buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            encoding: StorageEncoding::Json,
            event_buffer_size: 1024,
        }
    }
}

impl StoreConfig {
    /// File-backed storage in `dir`, other settings default.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: Some(dir.into()),
            ..Default::default()
        }
    }
}

/// State plus the count of actions applied to it.
struct Inner {
    state: AppState,
    sequence: u64,
}

/// The application store.
///
/// Owns the state, applies actions one at a time, and publishes every
/// change. A [`Persister`] subscribed at construction writes the persisted
/// subset in the background; mutations never wait on storage.
pub struct Store {
    /// Store configuration.
    config: StoreConfig,

    /// Current state. Actions are applied and broadcast under this lock.
    inner: Mutex<Inner>,

    /// Device storage.
    storage: Arc<dyn StateStorage>,

    /// Change subscribers.
    subscriptions: SubscriptionManager,

    /// Background writer.
    persister: Persister,

    /// The persister's subscription.
    persister_id: SubscriptionId,
}

impl Store {
    /// Open a store, rehydrating from storage.
    ///
    /// Only storage setup can fail (directory not creatable, lock held).
    /// An unreadable persisted record falls back to defaults.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let storage: Arc<dyn StateStorage> = match &config.storage_dir {
            Some(dir) => Arc::new(FileStorage::open(dir)?),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::with_storage(storage, config)
    }

    /// A store backed by volatile memory.
    pub fn in_memory() -> Result<Self> {
        Self::open(StoreConfig::default())
    }

    /// Open a store over an existing storage backend.
    pub fn with_storage(storage: Arc<dyn StateStorage>, config: StoreConfig) -> Result<Self> {
        let state = Self::rehydrate(storage.as_ref(), &config.namespace);

        let subscriptions = SubscriptionManager::new();
        let handle = subscriptions.subscribe(SubscriptionConfig {
            buffer_size: config.event_buffer_size,
            overflow: OverflowPolicy::Block,
            filter: SubscriptionFilter::all(),
        });
        let persister_id = handle.id;
        let persister = Persister::spawn(
            Arc::clone(&storage),
            config.namespace.clone(),
            config.encoding,
            handle,
        )?;

        Ok(Self {
            config,
            inner: Mutex::new(Inner { state, sequence: 0 }),
            storage,
            subscriptions,
            persister,
            persister_id,
        })
    }

    /// Load the persisted subset over defaults. Never fails.
    fn rehydrate(storage: &dyn StateStorage, key: &str) -> AppState {
        let bytes = match storage.get_item(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(key, "no persisted state, starting fresh");
                return AppState::default();
            }
            Err(e) => {
                tracing::warn!(key, "failed to read persisted state, using defaults: {e}");
                return AppState::default();
            }
        };

        match codec::decode(&bytes) {
            Ok(persisted) => {
                tracing::debug!(key, encoding = ?codec::detect(&bytes), "rehydrated state");
                persisted.rehydrate()
            }
            Err(e) => {
                tracing::warn!(key, "discarding unreadable persisted state: {e}");
                AppState::default()
            }
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // --- Dispatch ---

    /// Apply an action and publish the change. Returns its sequence number.
    pub fn dispatch(&self, action: Action) -> u64 {
        let kind = action.kind();
        let mut inner = self.inner.lock();

        apply_action(&mut inner.state, action);
        inner.sequence += 1;
        let sequence = inner.sequence;

        tracing::debug!(sequence, action = %kind, "applied action");

        // Broadcast under the lock so subscribers see changes in order.
        let persisted = PersistedState::from_state(&inner.state);
        self.subscriptions.broadcast_change(sequence, kind, &persisted);

        sequence
    }

    // --- User & Auth ---

    pub fn set_user(&self, user: Option<User>) {
        self.dispatch(Action::SetUser { user });
    }

    pub fn set_first_launch(&self, is_first_launch: bool) {
        self.dispatch(Action::SetFirstLaunch { is_first_launch });
    }

    /// Clear user, profile and any in-progress session. Words and progress
    /// are kept.
    pub fn logout(&self) {
        self.dispatch(Action::Logout);
    }

    // --- Profile ---

    pub fn set_user_profile(&self, profile: UserProfile) {
        self.dispatch(Action::SetUserProfile { profile });
    }

    /// No-op without a profile. The target is not range-checked.
    pub fn update_daily_target(&self, target: u32) {
        self.dispatch(Action::UpdateDailyTarget { target });
    }

    /// No-op without a profile. Accepts any label.
    pub fn update_language_level(&self, level: impl Into<LanguageLevel>) {
        self.dispatch(Action::UpdateLanguageLevel {
            level: level.into(),
        });
    }

    // --- Learning ---

    /// Mark a word learned. Repeated calls count again.
    pub fn mark_word_as_learned(&self, word_id: &str) {
        self.dispatch(Action::MarkWordAsLearned {
            word_id: word_id.to_string(),
        });
    }

    pub fn start_learning_session(&self) {
        self.dispatch(Action::start_learning_session());
    }

    pub fn end_learning_session(&self, words_learned: u32, time_spent: u32, accuracy: f64) {
        self.dispatch(Action::end_learning_session(words_learned, time_spent, accuracy));
    }

    pub fn reset_progress(&self) {
        self.dispatch(Action::ResetProgress);
    }

    // --- Settings ---

    pub fn toggle_dark_mode(&self) {
        self.dispatch(Action::ToggleDarkMode);
    }

    pub fn toggle_notifications(&self) {
        self.dispatch(Action::ToggleNotifications);
    }

    // --- Reads ---

    /// Run `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.lock().state)
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> AppState {
        self.read(AppState::clone)
    }

    /// The persisted subset of the current state.
    pub fn persisted(&self) -> PersistedState {
        self.read(PersistedState::from_state)
    }

    /// Number of actions applied since open.
    pub fn sequence(&self) -> u64 {
        self.inner.lock().sequence
    }

    pub fn user(&self) -> Option<User> {
        self.read(|s| s.user.clone())
    }

    pub fn user_profile(&self) -> Option<UserProfile> {
        self.read(|s| s.user_profile.clone())
    }

    pub fn progress(&self) -> UserProgress {
        self.read(|s| s.progress.clone())
    }

    pub fn current_words(&self) -> Vec<VocabularyWord> {
        self.read(|s| s.current_words.clone())
    }

    pub fn today_session(&self) -> Option<LearningSession> {
        self.read(|s| s.today_session.clone())
    }

    pub fn is_first_launch(&self) -> bool {
        self.read(|s| s.is_first_launch)
    }

    pub fn is_dark_mode(&self) -> bool {
        self.read(|s| s.is_dark_mode)
    }

    pub fn notifications_enabled(&self) -> bool {
        self.read(|s| s.notifications_enabled)
    }

    // --- Subscriptions ---

    /// Subscribe to state changes.
    ///
    /// Do not combine [`OverflowPolicy::Block`] with a consumer that calls
    /// back into this store while draining.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id);
    }

    // --- Persistence ---

    /// Wait until every change so far has been written, up to `timeout`.
    pub fn flush(&self, timeout: Duration) -> bool {
        self.persister.wait_for(self.sequence(), timeout)
    }

    /// Number of background writes that failed since open.
    pub fn failed_writes(&self) -> u64 {
        self.persister.failed_writes()
    }

    /// Remove the persisted record. The in-memory state is untouched; the
    /// next change writes a new record.
    pub fn clear_persisted(&self) -> Result<()> {
        if !self.flush(Duration::from_secs(5)) {
            tracing::warn!("clearing persisted state with writes still pending");
        }
        self.storage.remove_item(&self.config.namespace)
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        // Closing the subscription lets the writer drain its queue and exit.
        self.subscriptions.unsubscribe(self.persister_id);
        self.persister.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::StoreEvent;
    use crate::types::Language;

    fn profile() -> UserProfile {
        UserProfile {
            selected_language: Language::new("fr", "French", "🇫🇷"),
            level: LanguageLevel::B1,
            daily_words_target: 10,
            native_language: Language::new("en", "English", "🇺🇸"),
        }
    }

    #[test]
    fn test_fresh_store_has_seed_state() {
        let store = Store::in_memory().unwrap();
        assert_eq!(store.snapshot(), AppState::default());
        assert_eq!(store.sequence(), 0);
    }

    #[test]
    fn test_dispatch_assigns_sequences() {
        let store = Store::in_memory().unwrap();
        assert_eq!(store.dispatch(Action::ToggleDarkMode), 1);
        assert_eq!(store.dispatch(Action::ToggleDarkMode), 2);
        assert!(!store.is_dark_mode());
    }

    #[test]
    fn test_update_level_accepts_strings() {
        let store = Store::in_memory().unwrap();
        store.set_user_profile(profile());
        store.update_language_level("C1");
        assert_eq!(store.user_profile().unwrap().level, LanguageLevel::C1);
        store.update_language_level(String::from("Z9"));
        assert_eq!(
            store.user_profile().unwrap().level,
            LanguageLevel::Other("Z9".into())
        );
    }

    #[test]
    fn test_subscribers_see_changes() {
        let store = Store::in_memory().unwrap();
        let handle = store.subscribe(SubscriptionConfig::default());

        store.toggle_notifications();

        match handle.recv_timeout(Duration::from_secs(1)).unwrap() {
            StoreEvent::Changed { persisted, .. } => {
                assert_eq!(persisted.notifications_enabled, Some(false));
            }
            other => panic!("Expected Changed event, got {:?}", other),
        }
    }

    #[test]
    fn test_flush_reaches_memory_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Store::with_storage(storage.clone(), StoreConfig::default()).unwrap();

        store.set_first_launch(false);
        assert!(store.flush(Duration::from_secs(5)));

        let bytes = storage.get_item(DEFAULT_NAMESPACE).unwrap().unwrap();
        let persisted = codec::decode(&bytes).unwrap();
        assert_eq!(persisted.is_first_launch, Some(false));
    }

    #[test]
    fn test_clear_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Store::with_storage(storage.clone(), StoreConfig::default()).unwrap();

        store.toggle_dark_mode();
        store.clear_persisted().unwrap();

        assert!(storage.get_item(DEFAULT_NAMESPACE).unwrap().is_none());
        assert!(store.is_dark_mode());
    }
}
