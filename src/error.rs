//! Error types for Taskify
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Taskify operations
///
/// Covers configuration loading, client-side validation, session storage,
/// and every way a request against the Taskify API can fail.
#[derive(Error, Debug)]
pub enum TaskifyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected locally before any request is sent
    #[error("{0}")]
    Validation(String),

    /// The server rejected the request's credentials (HTTP 401)
    #[error(
        "Authentication failed: {}",
        .message.as_deref().unwrap_or("session is no longer valid")
    )]
    Unauthorized {
        /// Human-readable `error` field from the response body, when present
        message: Option<String>,
    },

    /// A command that needs a session was run without one
    #[error("Not logged in. Run `taskify login` first")]
    NotLoggedIn,

    /// Any other non-success response from the API
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no details provided"))]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Human-readable `error` field from the response body, when present
        message: Option<String>,
    },

    /// Session store errors (file or keyring backend)
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl TaskifyError {
    /// Returns `true` for errors caused by a rejected or missing session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::NotLoggedIn)
    }
}

/// Result type alias for Taskify operations
///
/// Uses `anyhow::Error` so call sites can attach context; the concrete
/// [`TaskifyError`] is recovered with `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
