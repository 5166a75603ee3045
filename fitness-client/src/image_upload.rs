use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::ImageHostConfig;
use crate::error::UploadError;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Rejection message for files above [`MAX_IMAGE_BYTES`].
pub const FILE_TOO_LARGE: &str = "El archivo es demasiado grande. Máximo 5MB.";
/// Rejection message for non-image files.
pub const NOT_AN_IMAGE: &str = "Solo se permiten archivos de imagen.";

/// Checks a selected file before any upload. Size is checked first.
pub fn validate_image_file(size_bytes: u64, mime_type: &str) -> Result<(), &'static str> {
    if size_bytes > MAX_IMAGE_BYTES {
        return Err(FILE_TOO_LARGE);
    }
    if !mime_type.starts_with("image/") {
        return Err(NOT_AN_IMAGE);
    }
    Ok(())
}

#[derive(Debug, Clone)]
/// Image selected for upload.
pub struct ImageFile {
    /// File name sent to the image host.
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of a successful upload.
pub struct UploadedImage {
    /// Public HTTPS URL of the hosted image.
    pub secure_url: String,
    /// Token allowing this client to delete the image shortly after upload.
    /// Only returned when the upload preset enables it.
    pub delete_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponseDto {
    secure_url: String,
    #[serde(default)]
    delete_token: Option<String>,
}

#[derive(Debug, Clone)]
/// Unsigned uploads to the image host.
pub struct ImageUploader {
    config: ImageHostConfig,
    client: Client,
}

impl ImageUploader {
    /// Creates the uploader; `client` is shared with the access layer.
    pub fn new(config: ImageHostConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self, cloud_name: &str, action: &str) -> String {
        format!(
            "{}/v1_1/{}/{}",
            self.config.api_base.trim_end_matches('/'),
            cloud_name,
            action.trim_start_matches('/')
        )
    }

    /// Uploads `file` and returns its hosted URL.
    pub async fn upload_image(&self, file: &ImageFile) -> Result<UploadedImage, UploadError> {
        let (Some(cloud_name), Some(preset)) = (
            self.config.cloud_name.as_deref(),
            self.config.upload_preset.as_deref(),
        ) else {
            return Err(UploadError::MissingConfiguration);
        };

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", preset.to_string());

        tracing::debug!(file = %file.file_name, size = file.size(), "uploading image");
        let response = self
            .client
            .post(self.endpoint(cloud_name, "image/upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "image upload rejected");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
            });
        }

        let dto = response.json::<UploadResponseDto>().await?;
        Ok(UploadedImage {
            secure_url: dto.secure_url,
            delete_token: dto.delete_token,
        })
    }

    /// Deletes a just-uploaded image using its delete token.
    pub async fn delete_by_token(&self, token: &str) -> Result<(), UploadError> {
        let Some(cloud_name) = self.config.cloud_name.as_deref() else {
            return Err(UploadError::MissingConfiguration);
        };

        let response = self
            .client
            .post(self.endpoint(cloud_name, "delete_by_token"))
            .form(&[("token", token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
