//! Error types for the redaction engine.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;

/// Errors that can occur during redaction.
///
/// Messages never carry payload content, only a description of what went
/// wrong with it.
#[derive(Error, Debug)]
pub enum RedactionError {
    /// Payload is not valid for the representation the redactor needs
    /// (malformed JSON, or bytes that are not UTF-8 text).
    #[error("decode error: {0}")]
    Decode(String),

    /// Failed to serialize the sanitized value tree.
    #[error("encode error: {0}")]
    Encode(String),

    /// Filter set or replacement token is unusable.
    #[error("policy error: {0}")]
    Policy(String),

    /// I/O error during policy file operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Policy file is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RedactionError {
    /// Short machine-readable name for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            RedactionError::Decode(_) => "decode",
            RedactionError::Encode(_) => "encode",
            RedactionError::Policy(_) => "policy",
            RedactionError::Io(_) => "io",
            RedactionError::Json(_) => "json",
        }
    }

    pub(crate) fn decode_json(err: serde_json::Error) -> Self {
        RedactionError::Decode(format!(
            "payload is not valid JSON ({:?} at line {}, column {})",
            err.classify(),
            err.line(),
            err.column()
        ))
    }
}
