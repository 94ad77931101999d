//! Error types for provmatch
//!
//! There are two error types: `ProvmatchError` (main error enum) and
//! `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `ProvmatchError`.
//! Callers embedding the matcher in a binary are expected to convert to
//! `anyhow::Error` at their boundary to preserve error chains.
//!
//! Provider communication failures surface as `CloudProvider` and propagate
//! unmodified: this crate performs no retries. Retry policy belongs to the
//! transport layer that owns the injected client, not to the match decision.
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: configuration parsing and missing-field issues,
//!   automatically converted to `ProvmatchError::Config` via `#[from]`
//! - `CloudProvider`: provider call failures, with the SDK error attached
//!   as `source`
//! - `ResourceNotFound`: for callers that require a specific instance to
//!   exist. An empty idempotency lookup is NOT an error and never produces
//!   this variant.
//! - `Validation`: a request field that is malformed or missing at
//!   construction time

use thiserror::Error;

/// Main error type for provmatch
#[derive(Error, Debug)]
pub enum ProvmatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cloud provider error: {provider} - {message}")]
    CloudProvider {
        provider: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Resource not found: {resource_type} - {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ProvmatchError>;
