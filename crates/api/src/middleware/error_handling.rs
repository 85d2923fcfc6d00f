//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the StudioHub
//! API. It maps domain-specific errors to appropriate HTTP status codes and
//! JSON error responses, ensuring a consistent error handling experience
//! across the entire API.
//!
//! Schedule conflicts and duplicate-name screens are deliberately *not* part
//! of this mapping: they are distinguished outcomes with remediation
//! payloads, rendered as 409 responses by the handlers themselves.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use studiohub_core::errors::StudioError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `StudioError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub StudioError);

/// Converts application errors to HTTP responses.
///
/// Maps each error type to the appropriate HTTP status code and formats the
/// error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            StudioError::NotFound(_) => StatusCode::NOT_FOUND,
            StudioError::Validation(_) => StatusCode::BAD_REQUEST,
            StudioError::UnknownReference(_) => StatusCode::BAD_REQUEST,
            StudioError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StudioError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from StudioError to AppError.
///
/// This implementation allows using the `?` operator with functions that
/// return `Result<T, StudioError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<StudioError> for AppError {
    fn from(err: StudioError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError.
///
/// Repository functions return `eyre::Result`; a failure at that layer is a
/// store failure, so it maps onto the `Database` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(StudioError::Database(err))
    }
}
