//! Subscription types for state-change events.

use crate::state::{ActionKind, PersistedState};
use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events.
    /// Default: 1024
    pub buffer_size: usize,

    /// What happens when the buffer is full.
    pub overflow: OverflowPolicy,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1024,
            overflow: OverflowPolicy::Drop,
            filter: SubscriptionFilter::default(),
        }
    }
}

/// Behaviour of a full subscriber buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Remove the subscriber (slow consumer).
    #[default]
    Drop,
    /// Wait for the subscriber to make room. Only for consumers that never
    /// call back into the store while draining.
    Block,
}

/// Filter criteria for subscriptions.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// Only these action kinds (None = all).
    pub actions: Option<Vec<ActionKind>>,
}

impl SubscriptionFilter {
    /// Subscribe to every change.
    pub fn all() -> Self {
        Self::default()
    }

    /// Subscribe to specific action kinds.
    pub fn actions(kinds: Vec<ActionKind>) -> Self {
        Self {
            actions: Some(kinds),
        }
    }

    pub(crate) fn matches(&self, kind: ActionKind) -> bool {
        match &self.actions {
            Some(kinds) => kinds.contains(&kind),
            None => true,
        }
    }
}

/// Events emitted by subscriptions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// An action was applied.
    Changed {
        /// Position of the action in the store's history, starting at 1.
        sequence: u64,
        action: ActionKind,
        /// Persisted subset after the action.
        persisted: PersistedState,
    },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Receiver went away.
    Disconnected,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to manage a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<StoreEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<StoreEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<StoreEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<StoreEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
