use thiserror::Error;

use scrub_redact::RedactionError;

/// Result type for envelope operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors from building an analytics request.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("sanitization failed: {0}")]
    Redaction(#[from] RedactionError),

    #[error("failed to serialize envelope: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}
