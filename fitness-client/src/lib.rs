//! Client library for a personal fitness tracker backed by a spreadsheet
//! web endpoint and an image host.
//!
//! [`FitnessClient`] bundles the access layer ([`SheetsClient`]), the domain
//! services and the [`ImageUploader`]. The [`pages`] module holds the form
//! state and submit flow of every screen, independent of how it is rendered.
#![warn(missing_docs)]

mod config;
mod error;
mod http_client;
mod image_upload;
mod models;
mod services;

pub mod pages;
pub mod shell;
pub mod stats;

pub use config::{ClientConfig, DEFAULT_CLOUDINARY_API_BASE, ImageHostConfig};
pub use error::{ApiError, ApiResult, UNKNOWN_ERROR, UploadError};
pub use http_client::SheetsClient;
pub use image_upload::{
    FILE_TOO_LARGE, ImageFile, ImageUploader, MAX_IMAGE_BYTES, NOT_AN_IMAGE, UploadedImage,
    validate_image_file,
};
pub use models::{
    ApiResponse, DashboardData, HabitEntry, OneRepMax, PersonalRecord, ProgressPhoto,
    WeightEntry, WorkoutEntry,
};
pub use services::{
    DEFAULT_RECENT_PHOTOS, HabitService, PhotoService, WeightService, WorkoutService,
};

#[derive(Debug, Clone)]
/// Entry point bundling the access layer, domain services and image upload.
pub struct FitnessClient {
    api: SheetsClient,
    uploader: ImageUploader,
}

impl FitnessClient {
    /// Builds the client from the startup configuration.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let api = SheetsClient::new(config)?;
        let uploader = ImageUploader::new(config.image_host.clone(), api.http().clone());
        Ok(Self { api, uploader })
    }

    /// Generic access layer.
    pub fn api(&self) -> &SheetsClient {
        &self.api
    }

    /// Weight records and dashboard.
    pub fn weight(&self) -> WeightService<'_> {
        WeightService::new(&self.api)
    }

    /// Workout sets.
    pub fn workouts(&self) -> WorkoutService<'_> {
        WorkoutService::new(&self.api)
    }

    /// Daily habits.
    pub fn habits(&self) -> HabitService<'_> {
        HabitService::new(&self.api)
    }

    /// Progress photo metadata.
    pub fn photos(&self) -> PhotoService<'_> {
        PhotoService::new(&self.api)
    }

    /// Image host uploads.
    pub fn images(&self) -> &ImageUploader {
        &self.uploader
    }
}
