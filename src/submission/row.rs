use std::fmt::Write;

use chrono::{DateTime, TimeZone};
use chrono::format::{Item, StrftimeItems};
use serde::Serialize;

use super::fields::Submission;

/// One spreadsheet row: timestamp followed by the six form fields, in
/// column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row(Vec<String>);

impl Row {
    pub const WIDTH: usize = 7;

    pub fn new(timestamp: String, submission: Submission) -> Self {
        Row(vec![
            timestamp,
            submission.first_name,
            submission.last_name,
            submission.email,
            submission.phone_number,
            submission.message,
            submission.service,
        ])
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn timestamp(&self) -> &str {
        &self.0[0]
    }
}

pub fn format_timestamp<Tz>(at: &DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", at.format(format)).is_err() {
        out = at.to_rfc3339();
    }
    out
}

pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
