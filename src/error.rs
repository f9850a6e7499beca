//! Error types shared by every layer of photoscli.

use std::time::Duration;

use reqwest::StatusCode;

/// Errors from token storage, the OAuth flow and the album endpoints.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("failed to persist token: {0}")]
    Persist(String),

    #[error("token exchange failed: {0}")]
    Exchange(String),

    #[error("invalid state parameter")]
    InvalidState,

    #[error("no authorization code received")]
    MissingCode,

    #[error("OAuth callback error: {0}")]
    Callback(String),

    #[error("OAuth flow timed out after {0:?}")]
    Timeout(Duration),

    #[error("authorization required: {0}. Run `photoscli auth` first")]
    Unauthorized(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("invalid credentials file: {0}")]
    Credentials(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status of an [`Error::Api`], if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
