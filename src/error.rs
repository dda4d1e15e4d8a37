//! Errors raised while talking to the Q&A server

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, timeout or body transfer failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response without a usable error body
    #[error("server responded with HTTP {0}")]
    Status(u16),

    /// Non-2xx response carrying `{"error": "..."}`
    #[error("{message} (HTTP {status})")]
    Server { status: u16, message: String },

    /// Response body was not the JSON shape we expected
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The PDF could not be read from disk
    #[error("cannot read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Short message for the UI; connection failures get a friendlier prefix
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            ApiError::Http(e) if e.is_connect() => format!("Connection failed: {}", e),
            ApiError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
