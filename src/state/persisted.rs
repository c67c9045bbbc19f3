//! The durable subset of the application state.

use crate::types::{User, UserProfile, UserProgress};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Fields written to device storage after every change.
///
/// Words and the in-progress session are excluded and come back as seed data
/// and `None` on a fresh process. Every field is optional on decode; a
/// missing field keeps the default when merged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_first_launch: Option<bool>,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<UserProgress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dark_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
}

impl PersistedState {
    /// Capture the persisted subset of a state.
    pub fn from_state(state: &AppState) -> Self {
        Self {
            user: state.user.clone(),
            is_first_launch: Some(state.is_first_launch),
            user_profile: state.user_profile.clone(),
            progress: Some(state.progress.clone()),
            is_dark_mode: Some(state.is_dark_mode),
            notifications_enabled: Some(state.notifications_enabled),
        }
    }

    /// Overlay the persisted fields on a state (shallow merge).
    ///
    /// `user` and `userProfile` always overwrite; a stored `null` means
    /// signed out. The flags and progress only overwrite when present.
    pub fn merge_into(self, state: &mut AppState) {
        state.user = self.user;
        state.user_profile = self.user_profile;
        if let Some(flag) = self.is_first_launch {
            state.is_first_launch = flag;
        }
        if let Some(progress) = self.progress {
            state.progress = progress;
        }
        if let Some(flag) = self.is_dark_mode {
            state.is_dark_mode = flag;
        }
        if let Some(flag) = self.notifications_enabled {
            state.notifications_enabled = flag;
        }
    }

    /// Build a full state from defaults plus this subset.
    pub fn rehydrate(self) -> AppState {
        let mut state = AppState::default();
        self.merge_into(&mut state);
        state
    }
}
