use anyhow::{anyhow, Error};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campusgate_store::StoreError;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::object_storage::StorageError;

/// Message returned for every 5xx response; the underlying cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// A required path, query, or body field was absent.
    pub fn missing_parameter(name: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, anyhow!("{name} is required"))
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    /// The document store or object store raised an error.
    pub fn dependency<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = if self.status.is_server_error() {
            error!(status = %self.status, error = format!("{:#}", self.error), "request failed");
            ErrorResponse {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                details: None,
            }
        } else {
            ErrorResponse {
                error: self.error.to_string(),
                details: self.details,
            }
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConditionFailed { .. } => Self::conflict(err),
            StoreError::NotFound { .. } => Self::not_found(err),
            StoreError::InvalidKey { .. } => Self::bad_request(err),
            StoreError::Backend(_) => Self::dependency(err),
            StoreError::UnknownCollection(_) | StoreError::Serialization(_) => Self::internal(err),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidFileSize { .. } => Self::new(StatusCode::PAYLOAD_TOO_LARGE, err),
            StorageError::InvalidMimeType { .. } => {
                Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, err)
            }
            StorageError::InvalidKey(_) => Self::bad_request(err),
            StorageError::IoError(_) | StorageError::Backend(_) => Self::dependency(err),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::bad_request(anyhow!("Validation failed")).with_details(errors.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err)
    }
}

/// Unwraps an optional request parameter, treating empty strings as absent.
pub fn require<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_parameter(name))
}
