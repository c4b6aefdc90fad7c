//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures turning wire or storage values into entity values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("{0}")]
    Invalid(String),
    /// A stored value could not be read back (e.g. an id column that is not 16 bytes).
    #[error("storage value: {0}")]
    Storage(String),
}

/// Startup failures. All of them end the process.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("config: {0}")]
    Config(String),
    #[error("store unreachable after {attempts} attempts: {last}")]
    StoreUnreachable { attempts: u32, last: sqlx::Error },
    #[error("schema creation: {0}")]
    Schema(#[source] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("{0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Codec(CodecError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
            AppError::Codec(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
