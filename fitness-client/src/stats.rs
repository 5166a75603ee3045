//! Derived numbers shown next to the forms.

use crate::models::HabitEntry;

/// Number of tracked daily habits.
pub const HABITS_PER_DAY: u32 = 3;

/// Epley one-rep max estimate, `round(weight * (1 + reps / 30))`.
///
/// Returns `None` unless both `weight` and `reps` are positive.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> Option<f64> {
    if weight <= 0.0 || reps == 0 {
        return None;
    }
    Some((weight * (1.0 + f64::from(reps) / 30.0)).round())
}

/// Habits ticked in `entry`.
pub fn completed_habits(entry: &HabitEntry) -> u32 {
    [entry.sleep, entry.water, entry.cardio]
        .into_iter()
        .filter(|done| *done)
        .count() as u32
}

/// `round(completed / 3 * 100)`.
pub fn habit_completion_percentage(entry: &HabitEntry) -> u32 {
    (f64::from(completed_habits(entry)) / f64::from(HABITS_PER_DAY) * 100.0).round() as u32
}
