//! Error types for the Lunch Money client library.

use reqwest::StatusCode;
use thiserror::Error;

use crate::context::CancelReason;
use crate::money::CurrencyError;
use crate::validation::ValidationErrors;

/// Maximum number of characters of a response body kept in a decode error.
const BODY_SNIPPET_LEN: usize = 512;

/// The main error type for all Lunch Money client operations.
#[derive(Error, Debug)]
pub enum LunchMoneyError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The caller's context was cancelled or its deadline passed mid-request
    #[error("request aborted: {0}")]
    Cancelled(CancelReason),

    /// URL parsing error (usually a malformed base URL)
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// Missing API key
    #[error("missing credentials: an API key is required")]
    MissingCredentials,

    /// Lunch Money API returned an error
    #[error("{0}")]
    Api(ApiError),

    /// A response body could not be decoded into the expected shape
    #[error("{context}: {source}. Body: {body}")]
    Decode {
        /// What was being decoded
        context: String,
        /// Underlying JSON error
        source: serde_json::Error,
        /// Snippet of the offending body
        body: String,
    },

    /// Decoded values violate structural constraints
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A filter or request body could not be encoded
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A monetary amount could not be parsed
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

/// Coarse classification of [`LunchMoneyError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Raised before any network I/O (missing key, bad base URL).
    Configuration,
    /// Network failure, cancellation or deadline.
    Transport,
    /// The API answered with an error.
    Remote,
    /// The body was not valid JSON or did not match the expected shape.
    Decode,
    /// Input or decoded values failed structural checks.
    Validation,
}

impl LunchMoneyError {
    /// Build a decode error, keeping a bounded snippet of the body.
    pub fn decode(context: impl Into<String>, source: serde_json::Error, body: &[u8]) -> Self {
        Self::Decode {
            context: context.into(),
            source,
            body: body_snippet(body),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials | Self::Url(_) => ErrorKind::Configuration,
            Self::Http(_) | Self::HttpMiddleware(_) | Self::Cancelled(_) => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Remote,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Validation(_) | Self::InvalidRequest(_) | Self::Currency(_) => {
                ErrorKind::Validation
            }
        }
    }

    /// Check if the request was aborted by its context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// The API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// An error reported by the Lunch Money API.
///
/// Carries the HTTP status of the response and the message extracted from the
/// error envelope, if the body had one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response (may be 2xx for errors hidden in a success body)
    pub status: StatusCode,
    /// Human-readable error message
    pub message: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.status, message),
            None => write!(f, "{}", self.status),
        }
    }
}

impl ApiError {
    /// Create a new API error from a status and an optional message.
    pub fn new(status: StatusCode, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the API rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.into_owned(),
    }
}
