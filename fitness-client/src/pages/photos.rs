use chrono::NaiveDate;

use crate::FitnessClient;
use crate::image_upload::{ImageFile, UploadedImage, validate_image_file};
use crate::models::ProgressPhoto;

use super::{Feedback, failure_text, optional_text, today};

/// Photos shown in the gallery.
pub const GALLERY_SIZE: u32 = 10;

const MISSING_FILE: &str = "Debes seleccionar una imagen";
const UPLOAD_FAILED: &str = "Error al subir imagen";
const SAVED: &str = "Foto de progreso guardada correctamente";
const SAVE_FAILED: &str = "Error al guardar foto";

#[derive(Debug, Clone, PartialEq)]
/// Input of the photo form; the URL comes from the upload.
pub struct PhotoForm {
    /// Day the photo was taken.
    pub date: NaiveDate,
    /// Optional caption.
    pub description: String,
}

impl PhotoForm {
    /// Empty form for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            description: String::new(),
        }
    }

    fn to_photo(&self, url: String) -> ProgressPhoto {
        ProgressPhoto {
            id: None,
            date: self.date,
            url,
            description: optional_text(&self.description),
        }
    }
}

impl Default for PhotoForm {
    fn default() -> Self {
        Self::new(today())
    }
}

#[derive(Debug, Clone, Default)]
/// Progress photo page: upload form plus recent gallery.
pub struct PhotosPage {
    /// Current form input.
    pub form: PhotoForm,
    /// File accepted by [`PhotosPage::select_file`].
    pub selected: Option<ImageFile>,
    /// Most recent photos.
    pub photos: Vec<ProgressPhoto>,
    /// Result of the last action.
    pub message: Option<Feedback>,
}

impl PhotosPage {
    /// Page with an empty form dated today.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks size and type of `file` and keeps it for the next submit.
    /// A rejected file leaves the previous selection untouched.
    pub fn select_file(&mut self, file: ImageFile) -> bool {
        if let Err(message) = validate_image_file(file.size(), &file.mime_type) {
            self.message = Some(Feedback::error(message));
            return false;
        }
        self.selected = Some(file);
        self.message = None;
        true
    }

    /// Drops the selected file.
    pub fn clear_file(&mut self) {
        self.selected = None;
    }

    /// Reloads the gallery. Failures are logged and keep the old list.
    pub async fn load(&mut self, client: &FitnessClient) {
        match client.photos().get_recent(GALLERY_SIZE).await {
            Ok(photos) => self.photos = photos,
            Err(err) => tracing::error!(error = %err, "failed to load photos"),
        }
    }

    /// Uploads the selected image, then stores its metadata.
    ///
    /// The two writes are not atomic: when the metadata write fails the
    /// uploaded image is deleted again if the host handed out a delete token,
    /// otherwise it stays orphaned. Returns whether the photo was stored.
    pub async fn submit(&mut self, client: &FitnessClient) -> bool {
        let Some(file) = self.selected.as_ref() else {
            self.message = Some(Feedback::error(MISSING_FILE));
            return false;
        };
        self.message = None;

        let uploaded = match client.images().upload_image(file).await {
            Ok(uploaded) => uploaded,
            Err(err) => {
                tracing::error!(error = %err, "image upload failed");
                self.message = Some(Feedback::error(UPLOAD_FAILED));
                return false;
            }
        };

        let photo = self.form.to_photo(uploaded.secure_url.clone());
        match client.photos().add(&photo).await {
            Ok(_) => {
                self.message = Some(Feedback::success(SAVED));
                self.form = PhotoForm::default();
                self.selected = None;
                self.load(client).await;
                true
            }
            Err(err) => {
                self.message = Some(Feedback::error(failure_text(&err, SAVE_FAILED)));
                discard_upload(client, &uploaded).await;
                false
            }
        }
    }
}

async fn discard_upload(client: &FitnessClient, uploaded: &UploadedImage) {
    let Some(token) = uploaded.delete_token.as_deref() else {
        tracing::warn!(url = %uploaded.secure_url, "orphaned upload, no delete token");
        return;
    };

    if let Err(err) = client.images().delete_by_token(token).await {
        tracing::warn!(
            url = %uploaded.secure_url,
            error = %err,
            "failed to delete orphaned upload"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;
    use crate::image_upload::{FILE_TOO_LARGE, MAX_IMAGE_BYTES, NOT_AN_IMAGE};

    fn file(mime: &str, size: usize) -> ImageFile {
        ImageFile {
            file_name: "progress.png".to_string(),
            mime_type: mime.to_string(),
            bytes: vec![0; size],
        }
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut page = PhotosPage::new();
        assert!(!page.select_file(file("image/png", MAX_IMAGE_BYTES as usize + 1)));
        assert_eq!(page.message, Some(Feedback::error(FILE_TOO_LARGE)));
        assert!(page.selected.is_none());
    }

    #[test]
    fn non_image_is_rejected_and_keeps_previous_selection() {
        let mut page = PhotosPage::new();
        assert!(page.select_file(file("image/jpeg", 10)));
        assert!(!page.select_file(file("application/pdf", 10)));

        assert_eq!(page.message, Some(Feedback::error(NOT_AN_IMAGE)));
        assert_eq!(
            page.selected.as_ref().map(|f| f.mime_type.as_str()),
            Some("image/jpeg")
        );
    }

    #[tokio::test]
    async fn submit_without_file_is_rejected() {
        let client = FitnessClient::new(&ClientConfig::default()).expect("client");
        let mut page = PhotosPage::new();

        assert!(!page.submit(&client).await);
        assert_eq!(page.message, Some(Feedback::error(MISSING_FILE)));
    }

    #[tokio::test]
    async fn upload_failure_keeps_selection() {
        let client = FitnessClient::new(&ClientConfig::default()).expect("client");
        let mut page = PhotosPage::new();
        page.select_file(file("image/png", 16));

        assert!(!page.submit(&client).await);
        assert_eq!(page.message, Some(Feedback::error(UPLOAD_FAILED)));
        assert!(page.selected.is_some());
    }
}
