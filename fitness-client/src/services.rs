//! Domain services: fixed bindings of logical operations to resource paths.
//!
//! None of them validates, aggregates or caches; the backend owns all of it.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ApiResult;
use crate::http_client::SheetsClient;
use crate::models::{
    DATE_FORMAT, DashboardData, HabitEntry, ProgressPhoto, WeightEntry, WorkoutEntry,
};

/// Default number of photos returned by [`PhotoService::get_recent`].
pub const DEFAULT_RECENT_PHOTOS: u32 = 5;

#[derive(Debug, Clone, Copy)]
/// Body weight records and the dashboard summary.
pub struct WeightService<'a> {
    api: &'a SheetsClient,
}

impl<'a> WeightService<'a> {
    pub(crate) fn new(api: &'a SheetsClient) -> Self {
        Self { api }
    }

    /// All weight records.
    pub async fn get_all(&self) -> ApiResult<Vec<WeightEntry>> {
        self.api.get_data("weight").await
    }

    /// Latest weight record.
    pub async fn get_current(&self) -> ApiResult<WeightEntry> {
        self.api.get_data("weight/current").await
    }

    /// Stores a new weight record. The saved record is returned when the
    /// backend echoes it.
    pub async fn add(&self, entry: &WeightEntry) -> ApiResult<Option<WeightEntry>> {
        self.api.post_write("weight", entry).await
    }

    /// Dashboard summary computed by the backend.
    pub async fn get_dashboard(&self) -> ApiResult<DashboardData> {
        self.api.get_data("dashboard").await
    }
}

#[derive(Debug, Clone, Copy)]
/// Workout sets.
pub struct WorkoutService<'a> {
    api: &'a SheetsClient,
}

impl<'a> WorkoutService<'a> {
    pub(crate) fn new(api: &'a SheetsClient) -> Self {
        Self { api }
    }

    /// All workout sets.
    pub async fn get_all(&self) -> ApiResult<Vec<WorkoutEntry>> {
        self.api.get_data("workouts").await
    }

    /// Sets of one exercise.
    pub async fn get_by_exercise(&self, exercise: &str) -> ApiResult<Vec<WorkoutEntry>> {
        self.api.get_data(&format!("workouts/{exercise}")).await
    }

    /// Stores a new workout set.
    pub async fn add(&self, entry: &WorkoutEntry) -> ApiResult<Option<WorkoutEntry>> {
        self.api.post_write("workouts", entry).await
    }

    /// Personal records and one-rep maxima. The backend defines the shape.
    pub async fn get_personal_records(&self) -> ApiResult<Value> {
        self.api.get_data("workouts/prs").await
    }
}

#[derive(Debug, Clone, Copy)]
/// Daily habit checklists.
pub struct HabitService<'a> {
    api: &'a SheetsClient,
}

impl<'a> HabitService<'a> {
    pub(crate) fn new(api: &'a SheetsClient) -> Self {
        Self { api }
    }

    /// All habit records.
    pub async fn get_all(&self) -> ApiResult<Vec<HabitEntry>> {
        self.api.get_data("habits").await
    }

    /// Habit record of a single day.
    pub async fn get_by_date(&self, date: NaiveDate) -> ApiResult<HabitEntry> {
        self.api
            .get_data(&format!("habits/{}", date.format(DATE_FORMAT)))
            .await
    }

    /// Inserts or replaces the record for `entry.date`.
    pub async fn update(&self, entry: &HabitEntry) -> ApiResult<Option<HabitEntry>> {
        self.api.post_write("habits", entry).await
    }

    /// Compliance over the current week, in percent.
    pub async fn get_weekly_compliance(&self) -> ApiResult<f64> {
        self.api.get_data("habits/compliance").await
    }
}

#[derive(Debug, Clone, Copy)]
/// Progress photo metadata.
pub struct PhotoService<'a> {
    api: &'a SheetsClient,
}

impl<'a> PhotoService<'a> {
    pub(crate) fn new(api: &'a SheetsClient) -> Self {
        Self { api }
    }

    /// All photos.
    pub async fn get_all(&self) -> ApiResult<Vec<ProgressPhoto>> {
        self.api.get_data("photos").await
    }

    /// The `limit` most recent photos.
    pub async fn get_recent(&self, limit: u32) -> ApiResult<Vec<ProgressPhoto>> {
        self.api
            .get_data(&format!("photos/recent?limit={limit}"))
            .await
    }

    /// Stores metadata of an already hosted photo.
    pub async fn add(&self, photo: &ProgressPhoto) -> ApiResult<Option<ProgressPhoto>> {
        self.api.post_write("photos", photo).await
    }
}
