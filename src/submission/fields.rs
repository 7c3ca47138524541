use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Contact form body as sent by the browser. Every field is optional at
/// this stage so a missing field reaches validation instead of failing
/// deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default, deserialize_with = "text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub service: Option<String>,
}

/// A contact form with all six fields present and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub message: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "All fields are required")
    }
}

impl std::error::Error for ValidationError {}

impl ContactForm {
    pub fn validate(self) -> Result<Submission, ValidationError> {
        let mut missing = Vec::new();

        let mut take = |name: &'static str, value: Option<String>| -> String {
            match value.filter(|v| !v.is_empty()) {
                Some(v) => v,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let submission = Submission {
            first_name: take("firstName", self.first_name),
            last_name: take("lastName", self.last_name),
            email: take("email", self.email),
            phone_number: take("phoneNumber", self.phone_number),
            message: take("message", self.message),
            service: take("service", self.service),
        };

        if missing.is_empty() {
            Ok(submission)
        } else {
            Err(ValidationError { missing })
        }
    }
}

/// Accept strings, numbers and `true` as text, unmodified. `null`, `false`
/// and zero count as absent.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(true)) => Ok(Some("true".to_string())),
        Some(_) => Err(serde::de::Error::custom("expected a text value")),
    }
}
