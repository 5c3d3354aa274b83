use serde_json::Value;
use thiserror::Error;

use crate::domain::DomainError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response; the message is the server's `error`/`message` field
    /// when the body carried one.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("failed to decode response: {message}")]
    Decode { message: String },
    #[error("authentication token is required for this operation")]
    MissingToken,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// Builds the uniform error for a failed status, preferring a
    /// human-readable message from the response body.
    pub(crate) fn from_status(status: u16, body: &[u8]) -> Self {
        let message = server_message(body)
            .unwrap_or_else(|| format!("HTTP error: status {status}"));
        Self::Status { status, message }
    }

    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// Extracts a non-empty `error` or `message` string field from a JSON body.
fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["error", "message"].into_iter().find_map(|field| {
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    })
}
