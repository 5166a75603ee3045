use chrono::NaiveDate;

use crate::FitnessClient;
use crate::models::WeightEntry;

use super::{Feedback, failure_text, optional_text, today};

const INVALID_WEIGHT: &str = "El peso debe ser mayor a 0";
const SAVED: &str = "Peso registrado correctamente";
const SAVE_FAILED: &str = "Error al registrar peso";

#[derive(Debug, Clone, PartialEq)]
/// Input of the weight form.
pub struct WeightForm {
    /// Day of the measurement.
    pub date: NaiveDate,
    /// Body weight in kilograms.
    pub weight: f64,
    /// Body fat percentage.
    pub body_fat: Option<f64>,
    /// Free-form notes.
    pub notes: String,
}

impl WeightForm {
    /// Empty form for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weight: 0.0,
            body_fat: None,
            notes: String::new(),
        }
    }

    fn to_entry(&self) -> WeightEntry {
        WeightEntry {
            id: None,
            date: self.date,
            weight: self.weight,
            body_fat: self.body_fat,
            notes: optional_text(&self.notes),
        }
    }
}

impl Default for WeightForm {
    fn default() -> Self {
        Self::new(today())
    }
}

/// Rejects non-positive weights.
pub fn validate_weight(form: &WeightForm) -> Result<(), &'static str> {
    if form.weight <= 0.0 {
        return Err(INVALID_WEIGHT);
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
/// Weight logging page.
pub struct WeightPage {
    /// Current form input.
    pub form: WeightForm,
    /// Result of the last submit.
    pub message: Option<Feedback>,
}

impl WeightPage {
    /// Page with an empty form dated today.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores the form. Returns whether the backend accepted
    /// the write; the form is reset when it did.
    pub async fn submit(&mut self, client: &FitnessClient) -> bool {
        self.message = None;

        if let Err(message) = validate_weight(&self.form) {
            self.message = Some(Feedback::error(message));
            return false;
        }

        match client.weight().add(&self.form.to_entry()).await {
            Ok(_) => {
                self.message = Some(Feedback::success(SAVED));
                self.form = WeightForm::default();
                true
            }
            Err(err) => {
                self.message = Some(Feedback::error(failure_text(&err, SAVE_FAILED)));
                false
            }
        }
    }
}
