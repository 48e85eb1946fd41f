use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised while reading the four source datasets.
///
/// Both variants are fatal at startup. A foreign key that has no match is
/// not an error at all; it degrades to a missing value during resolution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("data source `{source_name}` is unreadable: {reason}")]
    DataSource { source_name: String, reason: String },

    #[error("schema error in `{source_name}`: {detail}")]
    Schema { source_name: String, detail: String },
}

impl DataError {
    pub fn data_source(source_name: &str, reason: impl std::fmt::Display) -> Self {
        Self::DataSource {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing_column(source_name: &str, column: &str) -> Self {
        Self::Schema {
            source_name: source_name.to_string(),
            detail: format!("missing required column `{}`", column),
        }
    }

    pub fn invalid_id(source_name: &str, line: u64, column: &str, value: &str) -> Self {
        Self::Schema {
            source_name: source_name.to_string(),
            detail: format!(
                "line {}: column `{}` expects an integer id, found `{}`",
                line, column, value
            ),
        }
    }

    /// Name of the source that failed.
    pub fn source_name(&self) -> &str {
        match self {
            Self::DataSource { source_name, .. } | Self::Schema { source_name, .. } => source_name,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

// Convert AppError to an HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Data(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AppError::ReportNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::WebSocket(_) => (StatusCode::INTERNAL_SERVER_ERROR, "WebSocket error".into()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into()),
            AppError::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, "JSON error".into()),
        };

        tracing::error!(?self);
        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type Result<T> = std::result::Result<T, AppError>;
