//! Background writer for the persisted record.

use crate::error::Result;
use crate::state::PersistedState;
use crate::subscriptions::{StoreEvent, SubscriptionHandle};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::codec::{encode, StorageEncoding};
use super::storage::StateStorage;

/// Highest sequence the writer has handled, with a wakeup for waiters.
#[derive(Default)]
struct WriteProgress {
    handled: Mutex<u64>,
    changed: Condvar,
    failures: AtomicU64,
}

impl WriteProgress {
    fn advance(&self, sequence: u64) {
        let mut handled = self.handled.lock();
        if sequence > *handled {
            *handled = sequence;
        }
        self.changed.notify_all();
    }
}

/// Writes the persisted subset on a dedicated thread.
///
/// Callers never wait on a write: each change is queued on the subscription
/// channel and the thread stores only the newest queued snapshot. Write
/// failures are logged and counted, never returned.
pub struct Persister {
    thread: Option<JoinHandle<()>>,
    progress: Arc<WriteProgress>,
}

impl Persister {
    /// Start writing events from `events` to `storage` under `key`.
    pub fn spawn(
        storage: Arc<dyn StateStorage>,
        key: String,
        encoding: StorageEncoding,
        events: SubscriptionHandle,
    ) -> Result<Self> {
        let progress = Arc::new(WriteProgress::default());
        let worker_progress = Arc::clone(&progress);

        let thread = thread::Builder::new()
            .name("vocab-persister".into())
            .spawn(move || run(storage, key, encoding, events, worker_progress))?;

        Ok(Self {
            thread: Some(thread),
            progress,
        })
    }

    /// Number of writes that failed.
    pub fn failed_writes(&self) -> u64 {
        self.progress.failures.load(Ordering::Relaxed)
    }

    /// Block until `sequence` has been handled or `timeout` elapses.
    pub fn wait_for(&self, sequence: u64, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut handled = self.progress.handled.lock();
        while *handled < sequence {
            if self
                .progress
                .changed
                .wait_until(&mut handled, deadline)
                .timed_out()
            {
                return *handled >= sequence;
            }
        }
        true
    }

    /// Wait for the writer to drain and exit.
    ///
    /// The subscription must already be closed, otherwise this blocks.
    pub fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("persister thread panicked");
            }
        }
    }
}

fn run(
    storage: Arc<dyn StateStorage>,
    key: String,
    encoding: StorageEncoding,
    events: SubscriptionHandle,
    progress: Arc<WriteProgress>,
) {
    while let Ok(event) = events.recv() {
        let (mut sequence, mut latest) = match event {
            StoreEvent::Changed {
                sequence,
                persisted,
                ..
            } => (sequence, persisted),
            StoreEvent::Dropped { reason } => {
                tracing::debug!(?reason, "persister subscription closed");
                break;
            }
        };

        // Coalesce a backlog down to its newest snapshot.
        let mut closed = false;
        while let Ok(next) = events.try_recv() {
            match next {
                StoreEvent::Changed {
                    sequence: next_seq,
                    persisted,
                    ..
                } => {
                    sequence = next_seq;
                    latest = persisted;
                }
                StoreEvent::Dropped { .. } => {
                    closed = true;
                    break;
                }
            }
        }

        write(storage.as_ref(), &key, encoding, &latest, sequence, &progress);
        progress.advance(sequence);

        if closed {
            break;
        }
    }
}

fn write(
    storage: &dyn StateStorage,
    key: &str,
    encoding: StorageEncoding,
    state: &PersistedState,
    sequence: u64,
    progress: &WriteProgress,
) {
    let result = encode(state, encoding).and_then(|bytes| storage.set_item(key, &bytes));
    match result {
        Ok(()) => tracing::debug!(sequence, key, "persisted state"),
        Err(e) => {
            progress.failures.fetch_add(1, Ordering::Relaxed);
            tracing::error!(sequence, key, "failed to persist state: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{decode, MemoryStorage};
    use crate::state::ActionKind;
    use crate::subscriptions::{OverflowPolicy, SubscriptionConfig, SubscriptionManager};

    fn blocking_config() -> SubscriptionConfig {
        SubscriptionConfig {
            overflow: OverflowPolicy::Block,
            ..Default::default()
        }
    }

    #[test]
    fn test_writes_latest_snapshot() {
        let manager = SubscriptionManager::new();
        let storage = Arc::new(MemoryStorage::new());
        let handle = manager.subscribe(blocking_config());
        let id = handle.id;
        let mut persister =
            Persister::spawn(storage.clone(), "k".into(), StorageEncoding::Json, handle).unwrap();

        for seq in 1..=5u64 {
            let state = PersistedState {
                is_dark_mode: Some(seq % 2 == 1),
                ..Default::default()
            };
            manager.broadcast_change(seq, ActionKind::ToggleDarkMode, &state);
        }

        assert!(persister.wait_for(5, Duration::from_secs(5)));
        let stored = decode(&storage.get_item("k").unwrap().unwrap()).unwrap();
        assert_eq!(stored.is_dark_mode, Some(true));

        manager.unsubscribe(id);
        persister.join();
        assert_eq!(persister.failed_writes(), 0);
    }

    #[test]
    fn test_wait_times_out_without_events() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(blocking_config());
        let id = handle.id;
        let mut persister = Persister::spawn(
            Arc::new(MemoryStorage::new()),
            "k".into(),
            StorageEncoding::Json,
            handle,
        )
        .unwrap();

        assert!(!persister.wait_for(1, Duration::from_millis(20)));
        assert!(persister.wait_for(0, Duration::from_millis(1)));

        manager.unsubscribe(id);
        persister.join();
    }
}
