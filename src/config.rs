use std::net::IpAddr;
use std::path::PathBuf;

use crate::submission::row::is_valid_format;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub cors: CorsConfig,
    pub sheet: SheetConfig,
    pub credentials: CredentialSource,
    pub sheets_api_base: String,
    pub timestamp_format: String,
    pub max_body_size: usize,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub range: String,
    pub value_input: ValueInputOption,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueInputOption {
    UserEntered,
    Raw,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::UserEntered => "USER_ENTERED",
            ValueInputOption::Raw => "RAW",
        }
    }
}

#[derive(Clone, PartialEq)]
pub enum CredentialSource {
    KeyFile(PathBuf),
    Inline(String),
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::KeyFile(path) => write!(f, "KeyFile({})", path.display()),
            CredentialSource::Inline(_) => write!(f, "Inline(<redacted>)"),
        }
    }
}

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const DEFAULT_RANGE: &str = "A:G";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
/// Matches the `en-US` locale string, e.g. `3/14/2025, 9:05:07 AM`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let allow_credentials = parse_bool("CORS_ALLOW_CREDENTIALS", &env_or("CORS_ALLOW_CREDENTIALS", "true"))?;
        let cors = CorsConfig {
            allowed_origins: parse_origins(&env_or("CORS_ORIGIN", "*")),
            allow_credentials,
        };

        let spreadsheet_id = env_required("GOOGLE_SHEET_ID")?;
        let sheet_name = env_non_empty("GOOGLE_SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
        let range = env_non_empty("GOOGLE_SHEET_RANGE").unwrap_or_else(|| DEFAULT_RANGE.to_string());
        let value_input = parse_value_input(&env_or("GOOGLE_VALUE_INPUT_OPTION", "USER_ENTERED"))?;

        let credentials = credential_source(
            env_non_empty("GOOGLE_CREDENTIALS_JSON"),
            env_non_empty("GOOGLE_CREDENTIALS"),
        )?;

        let sheets_api_base = env_or("GOOGLE_SHEETS_API_BASE", DEFAULT_SHEETS_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let timestamp_format = env_or("TIMESTAMP_FORMAT", DEFAULT_TIMESTAMP_FORMAT);
        if !is_valid_format(&timestamp_format) {
            return Err(format!("Invalid TIMESTAMP_FORMAT: '{timestamp_format}'"));
        }

        let max_body_size: usize = env_or("MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            cors,
            sheet: SheetConfig {
                spreadsheet_id,
                sheet_name,
                range,
                value_input,
            },
            credentials,
            sheets_api_base,
            timestamp_format,
            max_body_size,
            log_level,
        })
    }
}

/// Inline JSON wins over a key file path when both are set.
pub fn credential_source(
    inline: Option<String>,
    key_file: Option<String>,
) -> Result<CredentialSource, String> {
    match (inline, key_file) {
        (Some(json), _) => Ok(CredentialSource::Inline(json)),
        (None, Some(path)) => Ok(CredentialSource::KeyFile(PathBuf::from(path))),
        (None, None) => Err(
            "Missing Google credentials: set GOOGLE_CREDENTIALS_JSON or GOOGLE_CREDENTIALS".to_string(),
        ),
    }
}

/// `*` anywhere in the list allows every origin.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

pub fn parse_value_input(raw: &str) -> Result<ValueInputOption, String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "USER_ENTERED" => Ok(ValueInputOption::UserEntered),
        "RAW" => Ok(ValueInputOption::Raw),
        other => Err(format!(
            "Invalid GOOGLE_VALUE_INPUT_OPTION '{other}': expected USER_ENTERED or RAW"
        )),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("Invalid {key}: '{other}'")),
    }
}

fn env_required(key: &str) -> Result<String, String> {
    env_non_empty(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
