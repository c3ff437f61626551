//! Error types for the connector client

use thiserror::Error;

/// Connector client error
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connector API returned an error
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Service used before `initialize()` was called
    #[error("Service not initialized - call initialize() first")]
    NotInitialized,

    /// Remote payload violates the expected response shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Acceptance decider failed before a decision was reached
    #[error("Acceptance decision failed: {0}")]
    Decision(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for connector operations
pub type Result<T> = std::result::Result<T, ClientError>;
