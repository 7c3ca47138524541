pub mod auth;
pub mod client;
pub mod credentials;
pub mod range;

use async_trait::async_trait;

use crate::submission::row::Row;

pub use client::SheetsClient;

/// The remote append operation. Implementations must be safe to share
/// across concurrent requests.
#[async_trait]
pub trait RowAppender: Send + Sync {
    async fn append_row(&self, row: &Row) -> Result<(), SheetsError>;
}

#[derive(Debug)]
pub enum SheetsError {
    Credentials(String),
    Token(String),
    Request(reqwest::Error),
    Api { status: u16, body: String },
    Url(String),
}

impl std::fmt::Display for SheetsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsError::Credentials(msg) => write!(f, "Invalid service account credentials: {msg}"),
            SheetsError::Token(msg) => write!(f, "Access token request failed: {msg}"),
            SheetsError::Request(err) => write!(f, "Sheets request failed: {err}"),
            SheetsError::Api { status, body } => write!(f, "Sheets API returned {status}: {body}"),
            SheetsError::Url(msg) => write!(f, "Invalid Sheets URL: {msg}"),
        }
    }
}

impl std::error::Error for SheetsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetsError::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SheetsError {
    fn from(err: reqwest::Error) -> Self {
        SheetsError::Request(err)
    }
}
