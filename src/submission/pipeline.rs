use chrono::Local;

use crate::error::AppError;
use crate::state::SharedState;

use super::fields::ContactForm;
use super::row::{format_timestamp, Row};

/// Validate, build the row, append it. Exactly one append per valid form;
/// nothing is retried or deduplicated.
pub async fn run(state: &SharedState, form: ContactForm) -> Result<Row, AppError> {
    let submission = form
        .validate()
        .inspect_err(|e| tracing::debug!("Rejected submission, missing fields: {:?}", e.missing))?;

    let timestamp = format_timestamp(&Local::now(), &state.config.timestamp_format);
    let row = Row::new(timestamp, submission);

    state.appender.append_row(&row).await?;

    tracing::info!("Form submission appended ({})", row.timestamp());
    Ok(row)
}
