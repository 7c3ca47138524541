use serde::Deserialize;

use crate::config::CredentialSource;

use super::SheetsError;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The subset of a Google service-account key file needed for the
/// JWT bearer grant.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub async fn load(source: &CredentialSource) -> Result<Self, SheetsError> {
        match source {
            CredentialSource::KeyFile(path) => {
                let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
                    SheetsError::Credentials(format!("could not read {}: {e}", path.display()))
                })?;
                Self::parse(&raw)
            }
            CredentialSource::Inline(raw) => Self::parse(raw),
        }
    }

    /// Parse key JSON. Private keys pasted into env files often carry
    /// literal `\n` sequences; those become real newlines.
    pub fn parse(raw: &str) -> Result<Self, SheetsError> {
        let mut key: ServiceAccountKey = serde_json::from_str(raw)
            .map_err(|e| SheetsError::Credentials(format!("malformed key JSON: {e}")))?;

        key.private_key = key.private_key.replace("\\n", "\n");

        if key.client_email.trim().is_empty() {
            return Err(SheetsError::Credentials("client_email is empty".to_string()));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(SheetsError::Credentials(
                "private_key is not a PEM encoded key".to_string(),
            ));
        }

        Ok(key)
    }
}
