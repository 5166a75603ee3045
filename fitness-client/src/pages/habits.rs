use chrono::NaiveDate;

use crate::FitnessClient;
use crate::models::HabitEntry;
use crate::stats::{completed_habits, habit_completion_percentage};

use super::{Feedback, failure_text, optional_text, today};

const SAVED: &str = "Hábitos registrados correctamente";
const SAVE_FAILED: &str = "Error al registrar hábitos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One of the tracked daily habits.
pub enum Habit {
    /// Slept enough.
    Sleep,
    /// Drank enough water.
    Water,
    /// Did cardio.
    Cardio,
}

impl Habit {
    /// All habits in display order.
    pub const ALL: [Habit; 3] = [Habit::Sleep, Habit::Water, Habit::Cardio];

    /// Checklist label.
    pub fn label(self) -> &'static str {
        match self {
            Habit::Sleep => "Dormir 7-8 horas",
            Habit::Water => "Beber 2+ litros de agua",
            Habit::Cardio => "Hacer cardio (30+ min)",
        }
    }

    /// Whether `entry` has this habit ticked.
    pub fn is_done(self, entry: &HabitEntry) -> bool {
        match self {
            Habit::Sleep => entry.sleep,
            Habit::Water => entry.water,
            Habit::Cardio => entry.cardio,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Input of the habits form.
pub struct HabitForm {
    /// Day the habits refer to.
    pub date: NaiveDate,
    /// Slept enough.
    pub sleep: bool,
    /// Drank enough water.
    pub water: bool,
    /// Did cardio.
    pub cardio: bool,
    /// Free-form notes.
    pub notes: String,
}

impl HabitForm {
    /// Unchecked form for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            sleep: false,
            water: false,
            cardio: false,
            notes: String::new(),
        }
    }

    /// Flips one habit.
    pub fn toggle(&mut self, habit: Habit) {
        let flag = match habit {
            Habit::Sleep => &mut self.sleep,
            Habit::Water => &mut self.water,
            Habit::Cardio => &mut self.cardio,
        };
        *flag = !*flag;
    }

    /// Number of ticked habits.
    pub fn completed_count(&self) -> u32 {
        completed_habits(&self.to_entry())
    }

    /// Completion of the day, in percent.
    pub fn completion_percentage(&self) -> u32 {
        habit_completion_percentage(&self.to_entry())
    }

    fn to_entry(&self) -> HabitEntry {
        HabitEntry {
            id: None,
            date: self.date,
            sleep: self.sleep,
            water: self.water,
            cardio: self.cardio,
            notes: optional_text(&self.notes),
        }
    }
}

impl Default for HabitForm {
    fn default() -> Self {
        Self::new(today())
    }
}

#[derive(Debug, Clone, Default)]
/// Daily habits page.
pub struct HabitsPage {
    /// Current form input.
    pub form: HabitForm,
    /// Result of the last submit.
    pub message: Option<Feedback>,
}

impl HabitsPage {
    /// Page with an unchecked form dated today.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the day's checklist; the backend replaces any record of the
    /// same date. The form keeps its values. Returns whether the backend
    /// accepted the write.
    pub async fn submit(&mut self, client: &FitnessClient) -> bool {
        self.message = None;

        match client.habits().update(&self.form.to_entry()).await {
            Ok(_) => {
                self.message = Some(Feedback::success(SAVED));
                true
            }
            Err(err) => {
                self.message = Some(Feedback::error(failure_text(&err, SAVE_FAILED)));
                false
            }
        }
    }
}
