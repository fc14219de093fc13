//! Decoding of Lunch Money error envelopes.
//!
//! Different endpoints (and API revisions) report errors in different shapes:
//!
//! ```json
//! {"error": "Budget not found"}
//! {"error": ["start_date is required", "end_date is required"]}
//! {"message": "Access token does not exist."}
//! {"name": "Error"}
//! ```
//!
//! [`ErrorEnvelope`] accepts all of them. When several fields are present the
//! message is taken from `error`, then `message`, then `name`.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;

use crate::error::{ApiError, LunchMoneyError};
use crate::types::serde_helpers::default_on_error;

/// The `error` field, whatever shape it arrived in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    /// `"error": "message"`
    Message(String),
    /// `"error": ["first", "second"]`
    Messages(Vec<String>),
    /// Anything else; carries no usable message.
    Other(Value),
}

impl ErrorField {
    /// The human-readable message, if this shape has one.
    pub fn message(&self) -> Option<String> {
        match self {
            ErrorField::Message(message) if !message.is_empty() => Some(message.clone()),
            ErrorField::Messages(messages) => {
                let joined = messages
                    .iter()
                    .filter(|m| !m.is_empty())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(joined).filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }
}

/// Tolerant view of an error response body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    /// Primary error field.
    #[serde(default)]
    pub error: Option<ErrorField>,
    /// Error name, used by some endpoints instead of `error`.
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub name: Option<String>,
    /// Error message, used by some endpoints instead of `error`.
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    /// Parse a body as an error envelope.
    ///
    /// Only a JSON object can be an envelope; arrays and scalars are type
    /// errors.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom(format!(
                "expected an error object, found {}",
                json_type(&value)
            )));
        }
        serde_json::from_value(value)
    }

    /// The message, by precedence `error` > `message` > `name`.
    pub fn message(&self) -> Option<String> {
        self.error_message()
            .or_else(|| self.message.clone())
            .or_else(|| self.name.clone())
    }

    /// The message carried by the `error` field alone.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().and_then(ErrorField::message)
    }
}

/// Turn a non-success response into an error.
///
/// The body must be an error envelope; anything else is a decode error that
/// names the status.
pub(crate) fn status_error(status: StatusCode, body: &[u8]) -> LunchMoneyError {
    match ErrorEnvelope::from_slice(body) {
        Ok(envelope) => LunchMoneyError::Api(ApiError::new(status, envelope.message())),
        Err(e) => {
            LunchMoneyError::decode(format!("could not decode error response ({status})"), e, body)
        }
    }
}

/// Look for an error hidden in a success body.
///
/// Bodies that are not error-shaped (arrays, booleans, records without error
/// fields) are not errors.
pub(crate) fn hidden_error(status: StatusCode, body: &[u8]) -> Option<LunchMoneyError> {
    let message = ErrorEnvelope::from_slice(body).ok()?.message()?;
    Some(LunchMoneyError::Api(ApiError::new(status, Some(message))))
}

/// Check a resource body for a top-level `error` field.
///
/// Resource records legitimately carry `name`, so only `error` counts here.
pub(crate) fn embedded_error(status: StatusCode, body: &[u8]) -> Option<LunchMoneyError> {
    let message = ErrorEnvelope::from_slice(body).ok()?.error_message()?;
    Some(LunchMoneyError::Api(ApiError::new(status, Some(message))))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Non-string or empty `name`/`message` values count as absent.
mod lenient_string {
    use super::*;
    use serde::Deserializer;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = default_on_error::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.is_empty()))
    }
}
