use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::fields::ContactForm;
use crate::submission::pipeline;

pub const SUCCESS_MESSAGE: &str = "Form data added to Google Sheet!";

pub async fn submit(
    State(state): State<SharedState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let form = match payload {
        Ok(Json(form)) => form,
        // Non-JSON bodies are read as an empty form, so every field is missing
        Err(JsonRejection::MissingJsonContentType(_)) => ContactForm::default(),
        Err(e) => return Err(AppError::BadRequest(e.body_text())),
    };

    pipeline::run(&state, form).await?;

    Ok(Json(json!({ "success": true, "message": SUCCESS_MESSAGE })))
}
