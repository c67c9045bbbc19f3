//! Subscription system for state changes.
//!
//! Every applied action is published as a [`StoreEvent::Changed`] carrying
//! the persisted subset of the new state. The persister is one subscriber;
//! presentation code can add its own to re-render.
//!
//! Subscriptions support:
//! - Filtering by action kind
//! - Bounded buffers that either drop slow subscribers or apply backpressure
//!
//! # Example
//!
//! ```ignore
//! let handle = store.subscribe(SubscriptionConfig {
//!     filter: SubscriptionFilter::actions(vec![ActionKind::EndLearningSession]),
//!     ..Default::default()
//! });
//!
//! while let Ok(event) = handle.recv() {
//!     match event {
//!         StoreEvent::Changed { persisted, .. } => render(&persisted),
//!         StoreEvent::Dropped { .. } => break,
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    DropReason, OverflowPolicy, StoreEvent, SubscriptionConfig, SubscriptionFilter,
    SubscriptionHandle, SubscriptionId,
};
