use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day format used on the wire.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Serde codec for record dates.
///
/// Writes `YYYY-MM-DD`. Reads either that or a full timestamp such as
/// `2024-01-01T03:00:00.000Z`, keeping only the leading day.
pub(crate) mod sheet_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
    }

    pub(crate) fn parse(raw: &str) -> Option<NaiveDate> {
        let day = raw.trim().get(..10)?;
        NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body weight measurement for a single day.
pub struct WeightEntry {
    /// Identifier assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Day of the measurement.
    #[serde(with = "sheet_date")]
    pub date: NaiveDate,
    /// Body weight in kilograms.
    pub weight: f64,
    /// Body fat percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single logged exercise set.
pub struct WorkoutEntry {
    /// Identifier assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Day of the workout.
    #[serde(with = "sheet_date")]
    pub date: NaiveDate,
    /// Exercise name.
    pub exercise: String,
    /// Load in kilograms.
    pub weight: f64,
    /// Repetitions performed.
    pub reps: u32,
    /// Number of sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Daily habit checklist. The backend keeps one record per date.
pub struct HabitEntry {
    /// Identifier assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Day the habits refer to.
    #[serde(with = "sheet_date")]
    pub date: NaiveDate,
    /// Slept enough.
    pub sleep: bool,
    /// Drank enough water.
    pub water: bool,
    /// Did cardio.
    pub cardio: bool,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Progress photo metadata. `url` points at the image host.
pub struct ProgressPhoto {
    /// Identifier assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Day the photo was taken.
    #[serde(with = "sheet_date")]
    pub date: NaiveDate,
    /// Hosted image URL.
    pub url: String,
    /// Optional caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Estimated one-rep maxima for the main lifts.
pub struct OneRepMax {
    /// Bench press.
    pub bench: f64,
    /// Squat.
    pub squat: f64,
    /// Deadlift.
    pub deadlift: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Best set recorded for an exercise.
pub struct PersonalRecord {
    /// Exercise name.
    pub exercise: String,
    /// Load in kilograms.
    pub weight: f64,
    /// Repetitions.
    pub reps: u32,
    /// Day of the record.
    #[serde(with = "sheet_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Read-only summary computed entirely by the backend.
pub struct DashboardData {
    /// Latest body weight.
    pub current_weight: f64,
    /// Latest body fat percentage.
    #[serde(default)]
    pub current_body_fat: Option<f64>,
    /// Body mass index.
    pub bmi: f64,
    /// Progress towards `target_weight`, in percent.
    pub progress_percentage: f64,
    /// Goal weight.
    pub target_weight: f64,
    /// One-rep max estimates.
    pub one_rep_max: OneRepMax,
    /// Personal records.
    #[serde(default)]
    pub personal_records: Vec<PersonalRecord>,
    /// Weekly habit compliance, in percent.
    pub habits_compliance: f64,
    /// Latest photos.
    #[serde(default)]
    pub recent_photos: Vec<ProgressPhoto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Envelope wrapping every response of the spreadsheet endpoint.
///
/// `data` is present iff `success`; otherwise `error` carries a message.
pub struct ApiResponse<T> {
    /// Whether the backend handled the request.
    pub success: bool,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope with the given message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
