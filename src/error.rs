//! Configuration error types for the historian connector client.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use wiotp_historian::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`PlatformConfig`](crate::PlatformConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid platform API key.")]
    EmptyApiKey,

    /// Authentication token cannot be empty.
    #[error("Authentication token cannot be empty. Please provide the token issued with the API key.")]
    EmptyAuthToken,

    /// Organization id is invalid.
    #[error("Invalid organization id '{org_id}'. Expected lowercase alphanumeric characters (e.g., 'abc123').")]
    InvalidOrgId {
        /// The invalid organization id that was provided.
        org_id: String,
    },

    /// The organization id could not be derived from the API key.
    #[error("Cannot derive the organization id from API key '{key}'. Expected format: 'a-<orgId>-<suffix>', or set org_id explicitly.")]
    UnknownOrgId {
        /// The API key the derivation was attempted on.
        key: String,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an http or https URL with a host (e.g., 'https://myorg.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
