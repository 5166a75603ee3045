use chrono::NaiveDate;

use crate::FitnessClient;
use crate::models::WorkoutEntry;
use crate::stats::estimate_one_rep_max;

use super::{Feedback, failure_text, optional_text, today};

/// Exercises offered by the workout form.
pub const COMMON_EXERCISES: [&str; 12] = [
    "Press de Banca",
    "Sentadilla",
    "Peso Muerto",
    "Press Militar",
    "Remo con Barra",
    "Dominadas",
    "Flexiones",
    "Plancha",
    "Curl de Bíceps",
    "Extensión de Tríceps",
    "Prensa de Piernas",
    "Peso Muerto Rumano",
];

const INVALID_LOAD: &str = "El peso y las repeticiones deben ser mayores a 0";
const MISSING_EXERCISE: &str = "Debes seleccionar un ejercicio";
const SAVED: &str = "Entrenamiento registrado correctamente";
const SAVE_FAILED: &str = "Error al registrar entrenamiento";

#[derive(Debug, Clone, PartialEq)]
/// Input of the workout form.
pub struct WorkoutForm {
    /// Day of the workout.
    pub date: NaiveDate,
    /// Selected exercise.
    pub exercise: String,
    /// Load in kilograms.
    pub weight: f64,
    /// Repetitions.
    pub reps: u32,
    /// Number of sets.
    pub sets: u32,
    /// Free-form notes.
    pub notes: String,
}

impl WorkoutForm {
    /// Empty form for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            exercise: String::new(),
            weight: 0.0,
            reps: 0,
            sets: 1,
            notes: String::new(),
        }
    }

    /// Live one-rep max preview for the current input.
    pub fn one_rep_max(&self) -> Option<f64> {
        estimate_one_rep_max(self.weight, self.reps)
    }

    // Date and exercise survive, so consecutive sets are quick to log.
    fn clear_set(&mut self) {
        self.weight = 0.0;
        self.reps = 0;
        self.sets = 1;
        self.notes.clear();
    }

    fn to_entry(&self) -> WorkoutEntry {
        WorkoutEntry {
            id: None,
            date: self.date,
            exercise: self.exercise.trim().to_string(),
            weight: self.weight,
            reps: self.reps,
            sets: Some(self.sets),
            notes: optional_text(&self.notes),
        }
    }
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self::new(today())
    }
}

/// Load is checked before the exercise selection.
pub fn validate_workout(form: &WorkoutForm) -> Result<(), &'static str> {
    if form.weight <= 0.0 || form.reps == 0 {
        return Err(INVALID_LOAD);
    }
    if form.exercise.trim().is_empty() {
        return Err(MISSING_EXERCISE);
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
/// Workout logging page.
pub struct WorkoutsPage {
    /// Current form input.
    pub form: WorkoutForm,
    /// Result of the last submit.
    pub message: Option<Feedback>,
}

impl WorkoutsPage {
    /// Page with an empty form dated today.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores the current set. Returns whether the backend
    /// accepted the write.
    pub async fn submit(&mut self, client: &FitnessClient) -> bool {
        self.message = None;

        if let Err(message) = validate_workout(&self.form) {
            self.message = Some(Feedback::error(message));
            return false;
        }

        match client.workouts().add(&self.form.to_entry()).await {
            Ok(_) => {
                self.message = Some(Feedback::success(SAVED));
                self.form.clear_set();
                true
            }
            Err(err) => {
                self.message = Some(Feedback::error(failure_text(&err, SAVE_FAILED)));
                false
            }
        }
    }
}
