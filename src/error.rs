//! Error types for the Spotify client, configuration and local stores.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the Spotify Web API.
///
/// The classification decides how callers react: [`SpotifyError::Unauthorized`]
/// means the access token is no longer accepted and the user has to sign in
/// again, everything else is shown as a generic failure.
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Spotify answered with 401, the token is invalid or expired
    #[error("Spotify API unauthorized. Please reauthenticate.")]
    Unauthorized,

    /// Spotify answered with any other non-2xx status
    #[error("Spotify API error: {status_text}")]
    RequestFailed {
        status: StatusCode,
        status_text: String,
    },

    /// Network failure or a body that could not be decoded
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// An access token must never be empty
    #[error("Access token must not be empty")]
    EmptyToken,
}

impl SpotifyError {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return SpotifyError::Unauthorized;
        }

        SpotifyError::RequestFailed {
            status,
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SpotifyError::Unauthorized)
    }
}

/// Result type for Spotify client operations
pub type SpotifyResult<T> = Result<T, SpotifyError>;

/// Errors raised while reading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Failed to prepare configuration directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenv::Error),
}

/// Errors raised by the JSON file stores in [`crate::management`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors raised by the OAuth token endpoint.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token endpoint rejected the request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Token response is missing `{0}`")]
    MissingField(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
