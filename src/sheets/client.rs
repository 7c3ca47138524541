use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;

use crate::config::{Config, SheetConfig};
use crate::submission::row::Row;

use super::auth::TokenProvider;
use super::credentials::ServiceAccountKey;
use super::range::a1_range;
use super::{RowAppender, SheetsError};

/// Appends rows through the Sheets v4 `values.append` endpoint.
pub struct SheetsClient {
    http: reqwest::Client,
    tokens: TokenProvider,
    api_base: String,
    sheet: SheetConfig,
}

impl SheetsClient {
    pub fn new(
        key: ServiceAccountKey,
        sheet: SheetConfig,
        api_base: &str,
    ) -> Result<Self, SheetsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            tokens: TokenProvider::new(key, http.clone())?,
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            sheet,
        })
    }

    /// Load credentials and obtain a first access token, so bad keys or a
    /// missing spreadsheet grant fail at startup instead of on first submit.
    pub async fn connect(config: &Config) -> Result<Self, SheetsError> {
        let key = ServiceAccountKey::load(&config.credentials).await?;
        let client = Self::new(key, config.sheet.clone(), &config.sheets_api_base)?;
        client.tokens.access_token().await?;

        tracing::info!(
            "Authorized as {} for spreadsheet {} ({})",
            client.tokens.client_email(),
            client.sheet.spreadsheet_id,
            client.target_range()
        );

        Ok(client)
    }

    pub fn target_range(&self) -> String {
        a1_range(&self.sheet.sheet_name, &self.sheet.range)
    }

    pub fn append_url(&self) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| SheetsError::Url(format!("{}: {e}", self.api_base)))?;

        let range = format!("{}:append", self.target_range());
        url.path_segments_mut()
            .map_err(|_| SheetsError::Url(format!("{} cannot be a base URL", self.api_base)))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.sheet.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);

        url.query_pairs_mut()
            .append_pair("valueInputOption", self.sheet.value_input.as_str())
            .append_pair("insertDataOption", "INSERT_ROWS");

        Ok(url)
    }
}

#[async_trait]
impl RowAppender for SheetsClient {
    async fn append_row(&self, row: &Row) -> Result<(), SheetsError> {
        let url = self.append_url()?;
        let token = self.tokens.access_token().await?;

        let body = json!({
            "majorDimension": "ROWS",
            "values": [row],
        });

        let resp = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(1024)
                .collect::<String>();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: serde_json::Value = resp.json().await.unwrap_or_default();
        tracing::debug!(
            "Appended row to {}",
            result["updates"]["updatedRange"].as_str().unwrap_or("<unknown range>")
        );

        Ok(())
    }
}
