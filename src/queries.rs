//! Read-only views over the state used by the home, words and progress
//! screens.

use crate::seed::DEFAULT_DAILY_TARGET;
use crate::state::{AppState, WEEKLY_HISTORY_LIMIT};
use crate::types::{LearningSession, UserProfile, VocabularyWord, WordFilter};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Words still to learn, in collection order.
pub fn unlearned_words(words: &[VocabularyWord]) -> impl Iterator<Item = &VocabularyWord> {
    words.iter().filter(|w| !w.is_learned)
}

/// Words already learned, in collection order.
pub fn learned_words(words: &[VocabularyWord]) -> impl Iterator<Item = &VocabularyWord> {
    words.iter().filter(|w| w.is_learned)
}

/// Case-insensitive search over word and translation, then the filter.
pub fn filter_words<'a>(
    words: &'a [VocabularyWord],
    query: &str,
    filter: WordFilter,
) -> Vec<&'a VocabularyWord> {
    let needle = query.to_lowercase();
    words
        .iter()
        .filter(|w| {
            w.word.to_lowercase().contains(&needle)
                || w.translation.to_lowercase().contains(&needle)
        })
        .filter(|w| filter.matches(w))
        .collect()
}

/// The profile's daily target. Falls back to the default when onboarding is
/// pending or the stored target is zero.
pub fn daily_target(profile: Option<&UserProfile>) -> u32 {
    match profile.map(|p| p.daily_words_target) {
        Some(target) if target > 0 => target,
        _ => DEFAULT_DAILY_TARGET,
    }
}

/// Progress towards today's word goal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DailyGoal {
    /// Learned words added on the given day.
    pub learned_today: u32,
    pub target: u32,
    pub remaining: u32,
    /// Share of the target reached, capped at 100.
    pub percent: f64,
}

impl DailyGoal {
    /// Goal progress for `day` in the local time zone.
    pub fn for_day(state: &AppState, day: NaiveDate) -> Self {
        let learned_today = state
            .current_words
            .iter()
            .filter(|w| w.is_learned && w.date_added.with_timezone(&Local).date_naive() == day)
            .count() as u32;
        let target = daily_target(state.user_profile.as_ref());

        let percent = (learned_today as f64 / target as f64 * 100.0).min(100.0);

        Self {
            learned_today,
            target,
            remaining: target.saturating_sub(learned_today),
            percent,
        }
    }

    pub fn today(state: &AppState) -> Self {
        Self::for_day(state, Local::now().date_naive())
    }

    pub fn is_met(&self) -> bool {
        self.learned_today >= self.target
    }
}

/// Totals over the last week of sessions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub sessions: usize,
    pub total_words: u32,
    /// Mean minutes per session, `None` without sessions.
    pub average_minutes: Option<f64>,
    /// Daily target times seven.
    pub weekly_target: u32,
}

impl WeeklySummary {
    pub fn from_history(history: &[LearningSession], daily_target: u32) -> Self {
        let week = &history[history.len().saturating_sub(WEEKLY_HISTORY_LIMIT)..];
        let total_words = week.iter().map(|s| s.words_learned).sum();
        let total_minutes: u32 = week.iter().map(|s| s.time_spent).sum();

        Self {
            sessions: week.len(),
            total_words,
            average_minutes: if week.is_empty() {
                None
            } else {
                Some(total_minutes as f64 / week.len() as f64)
            },
            weekly_target: daily_target.saturating_mul(7),
        }
    }

    pub fn for_state(state: &AppState) -> Self {
        Self::from_history(
            &state.progress.weekly_progress,
            daily_target(state.user_profile.as_ref()),
        )
    }
}

/// First screen to show on launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchRoute {
    Welcome,
    Login,
    ProfileSetup,
    Home,
}

impl LaunchRoute {
    pub fn resolve(state: &AppState) -> Self {
        if state.is_first_launch {
            LaunchRoute::Welcome
        } else if state.user.is_none() {
            LaunchRoute::Login
        } else if state.user_profile.is_none() {
            LaunchRoute::ProfileSetup
        } else {
            LaunchRoute::Home
        }
    }
}
