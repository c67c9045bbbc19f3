//! Application state and its transitions.
//!
//! `AppState` is plain data. Every mutation is an [`Action`] applied by the
//! pure [`apply_action`]; I/O happens elsewhere, driven by the events the
//! store publishes after each transition.

mod app;
mod operations;
mod persisted;

pub use app::{AppState, UserLifecycle};
pub use operations::{apply_action, Action, ActionKind, WEEKLY_HISTORY_LIMIT};
pub use persisted::PersistedState;
