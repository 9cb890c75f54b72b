//! Sanitization pipeline.
//!
//! Runs the structural (key-name) redactor first, so whole sensitive
//! subtrees are gone before the literal (identity) pass scans the text.

use crate::{
    literal, FilterSet, IdentityDescriptor, KeyRedactor, RedactionError, Result, SanitizePolicy,
};

/// Sanitized payload plus the number of redactions made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redacted {
    /// Sanitized payload, same encoding as the input.
    pub bytes: Vec<u8>,

    /// Matched keys plus consumed identity spans.
    pub redactions: usize,
}

impl Redacted {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload as text, if it is UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn was_modified(&self) -> bool {
        self.redactions > 0
    }
}

/// Reusable sanitizer built from a validated policy.
///
/// Holds no mutable state; one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    filter: FilterSet,
    replacement: String,
    argument_pairs: bool,
    identity: Option<IdentityDescriptor>,
}

impl Sanitizer {
    /// Create a sanitizer without an identity.
    pub fn new(policy: &SanitizePolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            filter: policy.filter_set(),
            replacement: policy.replacement.clone(),
            argument_pairs: policy.redact_argument_pairs,
            identity: None,
        })
    }

    /// Also scrub `identity` from every payload.
    pub fn with_identity(mut self, identity: IdentityDescriptor) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Sanitize a JSON payload.
    pub fn sanitize(&self, payload: &[u8]) -> Result<Redacted> {
        let span = tracing::debug_span!("sanitize", payload_bytes = payload.len());
        let _guard = span.enter();

        let structural = KeyRedactor::new(&self.filter, &self.replacement)
            .with_argument_pairs(self.argument_pairs)
            .redact(payload)?;

        let result = match &self.identity {
            Some(identity) => {
                let scrubbed =
                    literal::redact_identity(identity, &self.replacement, &structural.bytes)?;
                serde_json::from_slice::<serde::de::IgnoredAny>(&scrubbed.bytes).map_err(|err| {
                    tracing::warn!(kind = ?err.classify(), "identity redaction broke JSON payload");
                    RedactionError::Encode(format!(
                        "identity redaction produced invalid JSON at line {} column {}",
                        err.line(),
                        err.column()
                    ))
                })?;
                Redacted {
                    bytes: scrubbed.bytes,
                    redactions: structural.redactions + scrubbed.redactions,
                }
            }
            None => structural,
        };

        tracing::debug!(redactions = result.redactions, "payload sanitized");
        Ok(result)
    }

    /// Sanitize free-form text. Only the identity pass applies.
    pub fn sanitize_text(&self, payload: &[u8]) -> Result<Redacted> {
        match &self.identity {
            Some(identity) => literal::redact_identity(identity, &self.replacement, payload),
            None => {
                std::str::from_utf8(payload).map_err(|err| {
                    RedactionError::Decode(format!(
                        "payload is not valid UTF-8 (invalid byte at offset {})",
                        err.valid_up_to()
                    ))
                })?;
                Ok(Redacted {
                    bytes: payload.to_vec(),
                    redactions: 0,
                })
            }
        }
    }
}

/// One-shot sanitization of a JSON payload.
pub fn sanitize(
    policy: &SanitizePolicy,
    identity: Option<&IdentityDescriptor>,
    payload: &[u8],
) -> Result<Redacted> {
    let mut sanitizer = Sanitizer::new(policy)?;
    if let Some(identity) = identity {
        sanitizer = sanitizer.with_identity(identity.clone());
    }
    sanitizer.sanitize(payload)
}
