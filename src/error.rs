//! Error types shared by the Qobuz client, the pipeline and the front ends.

use thiserror::Error;

/// Everything that can go wrong while talking to Qobuz or setting up the app.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport level failure (connection, TLS, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Qobuz answered with a non-success status code
    #[error("Qobuz API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Login was rejected or returned no user
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
