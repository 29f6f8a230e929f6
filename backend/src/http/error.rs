//! HTTP error handling.
//!
//! Failures are reported in the same `{code, message, data}` envelope as
//! successful responses, with `data` set to `null`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::{ApiResponse, CODE_INTERNAL};
use crate::error::AnalyticsError;

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Error raised by the analytics core
    Analytics(AnalyticsError),
    /// Failure outside the analytics core (e.g. a panicked worker task)
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Analytics(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: ApiResponse<()> = match &self {
            AppError::Analytics(e) => {
                if status.is_server_error() {
                    tracing::error!("request failed: {}", e);
                }
                ApiResponse::from(e)
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                ApiResponse::failure(CODE_INTERNAL, msg.clone())
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        AppError::Analytics(err)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Task join error: {}", err))
    }
}
