//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use postagram_core::events::EventError;
use postagram_core::post::PostError;
use postagram_shared::AppError;
use serde_json::json;

/// Numeric code carried in validation error bodies.
pub const VALIDATION_STATUS_CODE: u16 = 10422;

/// Renders an application error as an HTTP response.
///
/// Validation errors use `{"status_code", "message", "data"}`; everything
/// else is `{"message"}`.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match err {
        AppError::Validation(msg) => (
            status,
            Json(json!({
                "status_code": VALIDATION_STATUS_CODE,
                "message": msg,
                "data": null
            })),
        )
            .into_response(),
        other => (status, Json(json!({ "message": other.message() }))).into_response(),
    }
}

/// Shorthand for a 422 response.
pub fn validation_error(msg: impl Into<String>) -> Response {
    error_response(&AppError::Validation(msg.into()))
}

/// Maps a post service error onto the application taxonomy.
pub fn post_error(err: &PostError) -> AppError {
    match err {
        PostError::Store(e) => AppError::Database(e.to_string()),
        PostError::Storage(e) => AppError::Storage(e.to_string()),
        PostError::InvalidKey(e) => AppError::Validation(e.to_string()),
    }
}

/// Maps a label attachment error onto the application taxonomy.
///
/// Every variant is a server error so the delivering side redelivers.
pub fn event_error(err: &EventError) -> AppError {
    match err {
        EventError::MalformedKey(e) => AppError::Internal(e.to_string()),
        EventError::Labels(e) => AppError::ExternalService(e.to_string()),
        EventError::Store(e) => AppError::Database(e.to_string()),
    }
}
