//! Error types for contactbook
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::forms::validation::ValidationErrors;

/// Main error type for contactbook operations
///
/// Covers configuration loading, API calls, form validation, and
/// persistence of the session state.
#[derive(Error, Debug)]
pub enum ContactbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API answered with a non-success status
    #[error("API error: status={status}, {message}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Response body or a short description
        message: String,
    },

    /// One or more form fields failed validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// No cached contact has the requested id
    #[error("Contact not found: {0}")]
    ContactNotFound(i64),

    /// Authentication errors (e.g., no access token in the login response)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Session persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

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
}

/// Result type alias for contactbook operations
///
/// Uses `anyhow::Error` so callers can attach context while still being able
/// to downcast to [`ContactbookError`].
pub type Result<T> = anyhow::Result<T>;
