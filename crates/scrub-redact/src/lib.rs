//! Redaction engine for telemetry payloads.
//!
//! This crate removes sensitive values from payloads before they leave the
//! process: analytics bodies, log records, and workflow output.
//!
//! # Key Features
//!
//! - **Key-name redaction**: every JSON object key that contains a configured
//!   fragment (case-insensitive) has its value replaced, at any depth.
//! - **Argument redaction**: `name=value` and `--name value` pairs inside
//!   argument vectors are treated like keys.
//! - **Identity redaction**: the current user's name and home directory are
//!   scrubbed from arbitrary text, in both path-separator conventions.
//! - **Counted output**: every call reports how many redactions it made.
//! - **Fail-closed**: a payload is either fully sanitized or an error is
//!   returned; nothing partial is ever emitted.
//!
//! # Example
//!
//! ```
//! use scrub_redact::{FilterSet, redact_by_key};
//!
//! let filter = FilterSet::new(["password"]);
//! let payload = br#"{"password":"hunter2", "Other":"public"}"#;
//!
//! let result = redact_by_key(&filter, "***", payload).unwrap();
//! assert_eq!(result.as_str(), Some(r#"{"password":"***","Other":"public"}"#));
//! assert_eq!(result.redactions, 1);
//! ```

pub mod args;
pub mod error;
pub mod filter;
pub mod identity;
pub mod literal;
pub mod pipeline;
pub mod policy;
pub mod structural;

pub use args::redact_args;
pub use error::{RedactionError, Result};
pub use filter::FilterSet;
pub use identity::IdentityDescriptor;
pub use literal::{redact_identity, redact_identity_str};
pub use pipeline::{sanitize, Redacted, Sanitizer};
pub use policy::{SanitizePolicy, DEFAULT_REPLACEMENT, DEFAULT_SENSITIVE_FIELDS};
pub use structural::{redact_by_key, KeyRedactor};
