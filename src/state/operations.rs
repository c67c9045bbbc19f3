//! State transition application.

use crate::types::{LanguageLevel, LearningSession, User, UserProfile, UserProgress};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::AppState;

/// Number of sessions kept in the weekly history.
pub const WEEKLY_HISTORY_LIMIT: usize = 7;

/// A named mutation of [`AppState`].
///
/// Actions that need an id or a timestamp carry them, so applying an action
/// never reads the clock. Use the constructors to fill them from "now".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Replace the signed-in user (or sign out with `None`).
    SetUser { user: Option<User> },

    /// Set the onboarding-seen flag.
    SetFirstLaunch { is_first_launch: bool },

    /// Replace the profile wholesale.
    SetUserProfile { profile: UserProfile },

    /// Set the daily word target if a profile exists.
    UpdateDailyTarget { target: u32 },

    /// Set the profile level if a profile exists.
    UpdateLanguageLevel { level: LanguageLevel },

    /// Mark a word learned and bump its review count.
    MarkWordAsLearned { word_id: String },

    /// Open a fresh in-progress session, replacing any existing one.
    StartLearningSession {
        session_id: String,
        started_at: DateTime<Utc>,
    },

    /// Close the in-progress session and fold it into progress.
    EndLearningSession {
        words_learned: u32,
        time_spent: u32,
        accuracy: f64,
        session_id: String,
        ended_at: DateTime<Utc>,
    },

    ToggleDarkMode,

    ToggleNotifications,

    /// Zero all progress and unlearn every word.
    ResetProgress,

    /// Drop identity, profile and any in-progress session.
    Logout,
}

impl Action {
    /// Start a session stamped with the current time and a fresh id.
    pub fn start_learning_session() -> Self {
        Action::StartLearningSession {
            session_id: new_session_id(),
            started_at: Utc::now(),
        }
    }

    /// End a session stamped with the current time and a fresh id.
    pub fn end_learning_session(words_learned: u32, time_spent: u32, accuracy: f64) -> Self {
        Action::EndLearningSession {
            words_learned,
            time_spent,
            accuracy,
            session_id: new_session_id(),
            ended_at: Utc::now(),
        }
    }

    /// Parse a level label leniently; unknown labels are kept verbatim.
    pub fn update_language_level(level: &str) -> Self {
        Action::UpdateLanguageLevel {
            level: LanguageLevel::parse(level),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SetUser { .. } => ActionKind::SetUser,
            Action::SetFirstLaunch { .. } => ActionKind::SetFirstLaunch,
            Action::SetUserProfile { .. } => ActionKind::SetUserProfile,
            Action::UpdateDailyTarget { .. } => ActionKind::UpdateDailyTarget,
            Action::UpdateLanguageLevel { .. } => ActionKind::UpdateLanguageLevel,
            Action::MarkWordAsLearned { .. } => ActionKind::MarkWordAsLearned,
            Action::StartLearningSession { .. } => ActionKind::StartLearningSession,
            Action::EndLearningSession { .. } => ActionKind::EndLearningSession,
            Action::ToggleDarkMode => ActionKind::ToggleDarkMode,
            Action::ToggleNotifications => ActionKind::ToggleNotifications,
            Action::ResetProgress => ActionKind::ResetProgress,
            Action::Logout => ActionKind::Logout,
        }
    }
}

/// Discriminant of an [`Action`], used for filtering and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SetUser,
    SetFirstLaunch,
    SetUserProfile,
    UpdateDailyTarget,
    UpdateLanguageLevel,
    MarkWordAsLearned,
    StartLearningSession,
    EndLearningSession,
    ToggleDarkMode,
    ToggleNotifications,
    ResetProgress,
    Logout,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::SetUser => "set_user",
            ActionKind::SetFirstLaunch => "set_first_launch",
            ActionKind::SetUserProfile => "set_user_profile",
            ActionKind::UpdateDailyTarget => "update_daily_target",
            ActionKind::UpdateLanguageLevel => "update_language_level",
            ActionKind::MarkWordAsLearned => "mark_word_as_learned",
            ActionKind::StartLearningSession => "start_learning_session",
            ActionKind::EndLearningSession => "end_learning_session",
            ActionKind::ToggleDarkMode => "toggle_dark_mode",
            ActionKind::ToggleNotifications => "toggle_notifications",
            ActionKind::ResetProgress => "reset_progress",
            ActionKind::Logout => "logout",
        };
        f.write_str(name)
    }
}

fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Round half away from negative infinity, matching `Math.round`.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Apply an action to the state.
///
/// Total over every input: preconditions that fail (no profile, unknown word)
/// leave the affected part unchanged. Numeric arguments are stored as given.
pub fn apply_action(state: &mut AppState, action: Action) {
    match action {
        Action::SetUser { user } => {
            state.user = user;
        }

        Action::SetFirstLaunch { is_first_launch } => {
            state.is_first_launch = is_first_launch;
        }

        Action::SetUserProfile { profile } => {
            state.user_profile = Some(profile);
        }

        Action::UpdateDailyTarget { target } => {
            if let Some(profile) = state.user_profile.as_mut() {
                profile.daily_words_target = target;
            }
        }

        Action::UpdateLanguageLevel { level } => {
            if let Some(profile) = state.user_profile.as_mut() {
                profile.level = level;
            }
        }

        Action::MarkWordAsLearned { word_id } => {
            // Not idempotent: a learned word is counted again.
            if let Some(word) = state.current_words.iter_mut().find(|w| w.id == word_id) {
                word.is_learned = true;
                word.review_count = word.review_count.saturating_add(1);
            }
            state.progress.total_words_learned =
                state.progress.total_words_learned.saturating_add(1);
        }

        Action::StartLearningSession {
            session_id,
            started_at,
        } => {
            state.today_session = Some(LearningSession {
                id: session_id,
                date: started_at,
                words_learned: 0,
                time_spent: 0,
                accuracy: 0.0,
            });
        }

        Action::EndLearningSession {
            words_learned,
            time_spent,
            accuracy,
            session_id,
            ended_at,
        } => {
            state.today_session = None;

            let progress = &mut state.progress;
            progress.sessions_completed = progress.sessions_completed.saturating_add(1);
            // No day-continuity check: every completed session extends the streak.
            progress.current_streak = progress.current_streak.saturating_add(1);
            progress.longest_streak = progress.longest_streak.max(progress.current_streak);
            // Two-point average of the previous average and this session.
            progress.average_accuracy = round_half_up((progress.average_accuracy + accuracy) / 2.0);

            progress.weekly_progress.push(LearningSession {
                id: session_id,
                date: ended_at,
                words_learned,
                time_spent,
                accuracy,
            });
            let len = progress.weekly_progress.len();
            if len > WEEKLY_HISTORY_LIMIT {
                progress.weekly_progress.drain(..len - WEEKLY_HISTORY_LIMIT);
            }
        }

        Action::ToggleDarkMode => {
            state.is_dark_mode = !state.is_dark_mode;
        }

        Action::ToggleNotifications => {
            state.notifications_enabled = !state.notifications_enabled;
        }

        Action::ResetProgress => {
            state.progress = UserProgress::default();
            for word in &mut state.current_words {
                word.is_learned = false;
                word.review_count = 0;
            }
        }

        Action::Logout => {
            state.user = None;
            state.user_profile = None;
            state.today_session = None;
        }
    }
}
