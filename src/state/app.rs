//! The in-memory application state.

use crate::seed;
use crate::types::{LearningSession, User, UserProfile, UserProgress, VocabularyWord};
use serde::{Deserialize, Serialize};

use super::operations::{apply_action, Action};

/// Where the account is in the sign-in/onboarding chain.
///
/// `is_first_launch` is orthogonal and not part of this chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserLifecycle {
    Anonymous,
    AuthenticatedNoProfile,
    Ready,
}

/// Single source of truth for account, onboarding, learning and settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    // User & auth
    pub user: Option<User>,
    pub is_first_launch: bool,

    // Profile
    pub user_profile: Option<UserProfile>,

    // Learning
    pub current_words: Vec<VocabularyWord>,
    pub today_session: Option<LearningSession>,
    pub progress: UserProgress,

    // Settings
    pub is_dark_mode: bool,
    pub notifications_enabled: bool,
}

impl Default for AppState {
    /// A fresh store: seed content, nobody signed in, onboarding not yet seen.
    fn default() -> Self {
        Self {
            user: None,
            is_first_launch: true,
            user_profile: None,
            current_words: seed::seed_words(),
            today_session: None,
            progress: seed::initial_progress(),
            is_dark_mode: false,
            notifications_enabled: true,
        }
    }
}

impl AppState {
    /// Apply an action and return the resulting state.
    pub fn reduce(mut self, action: Action) -> Self {
        apply_action(&mut self, action);
        self
    }

    /// Look up a word by id.
    pub fn word(&self, id: &str) -> Option<&VocabularyWord> {
        self.current_words.iter().find(|w| w.id == id)
    }

    pub fn lifecycle(&self) -> UserLifecycle {
        match (&self.user, &self.user_profile) {
            (None, _) => UserLifecycle::Anonymous,
            (Some(_), None) => UserLifecycle::AuthenticatedNoProfile,
            (Some(_), Some(_)) => UserLifecycle::Ready,
        }
    }
}
