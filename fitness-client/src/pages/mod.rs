//! Headless page state: the form, submit flow and feedback of every screen.
//!
//! Submitting takes `&mut self`, so a page cannot start a second request
//! while one is in flight. Validation runs before any network call.

use chrono::{Local, NaiveDate};

use crate::error::ApiError;

mod dashboard;
mod habits;
mod photos;
mod weight;
mod workouts;

pub use dashboard::{DashboardPage, DashboardState};
pub use habits::{Habit, HabitForm, HabitsPage};
pub use photos::{PhotoForm, PhotosPage};
pub use weight::{WeightForm, WeightPage, validate_weight};
pub use workouts::{COMMON_EXERCISES, WorkoutForm, WorkoutsPage, validate_workout};

/// Message shown when the connection itself fails.
pub const CONNECTION_ERROR: &str = "Error de conexión";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Kind of a feedback message.
pub enum FeedbackKind {
    /// Operation completed.
    Success,
    /// Validation or remote failure.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inline message shown under a form.
pub struct Feedback {
    /// Success or error.
    pub kind: FeedbackKind,
    /// User-facing text.
    pub text: String,
}

impl Feedback {
    /// Success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            text: text.into(),
        }
    }

    /// Error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            text: text.into(),
        }
    }

    /// Whether this is an error message.
    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

/// Current local date, the default of every form.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Text shown for a failed remote call.
///
/// The backend's own message wins; a logical failure without one falls back
/// to the page default, transport failures show their description.
pub(crate) fn failure_text(err: &ApiError, default: &str) -> String {
    match err {
        ApiError::Logical(None) => default.to_string(),
        ApiError::Network(message) => format!("{CONNECTION_ERROR}: {message}"),
        other => other.to_string(),
    }
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
