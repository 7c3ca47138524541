use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::sheets::SheetsError;
use crate::submission::fields::ValidationError;

pub const VALIDATION_MESSAGE: &str = "All fields are required";
pub const UPSTREAM_MESSAGE: &str = "Something went wrong";

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    BadRequest(String),
    Upstream(SheetsError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(err) => write!(f, "Validation Error: {err}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Upstream(err) => write!(f, "Upstream Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({ "error": VALIDATION_MESSAGE })),
            )
                .into_response(),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": msg }))).into_response()
            }
            AppError::Upstream(err) => {
                tracing::error!("Error writing to Google Sheet: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "success": false, "message": UPSTREAM_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<SheetsError> for AppError {
    fn from(err: SheetsError) -> Self {
        AppError::Upstream(err)
    }
}
