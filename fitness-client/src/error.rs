use thiserror::Error;

use crate::models::ApiResponse;

#[derive(Debug, Error)]
/// Failure of a call to the spreadsheet endpoint.
pub enum ApiError {
    /// The request could not be sent or its body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-2xx status.
    #[error("{message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// `Error <code>: <reason>`.
        message: String,
    },

    /// The body was not valid JSON or did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The backend handled the request and reported `success: false`.
    /// `None` when the envelope carried no message.
    #[error("{}", .0.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Logical(Option<String>),

    /// Endpoint URL or API key is not configured.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Rendering of a logical failure without a backend message.
pub const UNKNOWN_ERROR: &str = "Error desconocido";

/// Result of access-layer and service calls.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("unknown status");
        Self::HttpStatus {
            status: status.as_u16(),
            message: format!("Error {}: {reason}", status.as_u16()),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status);
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Network(err.to_string())
    }

    pub(crate) fn logical(message: Option<String>) -> Self {
        Self::Logical(message.filter(|message| !message.trim().is_empty()))
    }

    /// Message reported by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Logical(message) => message.as_deref(),
            _ => None,
        }
    }
}

impl<T> From<ApiResult<T>> for ApiResponse<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(err) => ApiResponse::failure(err.to_string()),
        }
    }
}

#[derive(Debug, Error)]
/// Failure of the image host.
pub enum UploadError {
    /// Cloud name or upload preset is not configured.
    #[error("Faltan variables de entorno de Cloudinary")]
    MissingConfiguration,

    /// The image host answered with a non-2xx status.
    #[error("Error al subir imagen a Cloudinary")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// Transport failure or unreadable response.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
