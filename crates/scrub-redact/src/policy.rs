//! Sanitization policy configuration.
//!
//! Defines which key names are sensitive, the replacement token, and which
//! redaction passes run. Policies are plain JSON files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::FilterSet;

/// Schema version for the policy file.
pub const POLICY_SCHEMA_VERSION: &str = "1.0.0";

/// Replacement token used when the policy does not name one.
pub const DEFAULT_REPLACEMENT: &str = "***";

/// Key-name fragments treated as sensitive by default.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "headers", "user", "password", "passw", "token", "key", "secret",
];

/// Environment variable overriding the replacement token.
pub const ENV_REPLACEMENT: &str = "SCRUB_REPLACEMENT";

/// Environment variable overriding the sensitive fields (comma-separated).
pub const ENV_SENSITIVE_FIELDS: &str = "SCRUB_SENSITIVE_FIELDS";

/// Sanitization policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizePolicy {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Case-insensitive key-name fragments.
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: Vec<String>,

    /// Token substituted for redacted content.
    #[serde(default = "default_replacement")]
    pub replacement: String,

    /// Whether string arrays are redacted as argument vectors.
    #[serde(default = "default_true")]
    pub redact_argument_pairs: bool,

    /// Whether the current user's identity is scrubbed.
    #[serde(default = "default_true")]
    pub redact_identity: bool,
}

fn default_schema_version() -> String {
    POLICY_SCHEMA_VERSION.to_string()
}

fn default_sensitive_fields() -> Vec<String> {
    DEFAULT_SENSITIVE_FIELDS.iter().map(|s| s.to_string()).collect()
}

fn default_replacement() -> String {
    DEFAULT_REPLACEMENT.to_string()
}

fn default_true() -> bool {
    true
}

impl SanitizePolicy {
    /// Create a new policy with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load policy from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let policy: SanitizePolicy = serde_json::from_str(&content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Save policy to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides from `SCRUB_REPLACEMENT` and `SCRUB_SENSITIVE_FIELDS`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(replacement) = lookup(ENV_REPLACEMENT).filter(|r| !r.is_empty()) {
            self.replacement = replacement;
        }
        if let Some(fields) = lookup(ENV_SENSITIVE_FIELDS) {
            let fields: Vec<String> = fields
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
            if !fields.is_empty() {
                self.sensitive_fields = fields;
            }
        }
        self
    }

    /// Filter set built from `sensitive_fields`.
    pub fn filter_set(&self) -> FilterSet {
        FilterSet::new(&self.sensitive_fields)
    }

    /// Check that the replacement token is usable with the sensitive fields.
    pub fn validate(&self) -> crate::Result<()> {
        self.filter_set().check_replacement(&self.replacement)
    }
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            sensitive_fields: default_sensitive_fields(),
            replacement: default_replacement(),
            redact_argument_pairs: true,
            redact_identity: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_policy() {
        let policy = SanitizePolicy::default();
        assert_eq!(policy.schema_version, POLICY_SCHEMA_VERSION);
        assert_eq!(policy.replacement, "***");
        assert_eq!(policy.sensitive_fields.len(), DEFAULT_SENSITIVE_FIELDS.len());
        assert!(policy.redact_argument_pairs);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let policy: SanitizePolicy = serde_json::from_str(r#"{"replacement": "REDACTED"}"#).unwrap();
        assert_eq!(policy.replacement, "REDACTED");
        assert_eq!(policy.sensitive_fields, default_sensitive_fields());
        assert!(policy.redact_identity);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_REPLACEMENT, "[X]"),
            (ENV_SENSITIVE_FIELDS, " password, ,token "),
        ]
        .into_iter()
        .collect();

        let policy = SanitizePolicy::default()
            .with_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(policy.replacement, "[X]");
        assert_eq!(policy.sensitive_fields, vec!["password", "token"]);
    }

    #[test]
    fn test_empty_overrides_ignored() {
        let policy = SanitizePolicy::default().with_overrides(|_| Some(String::new()));
        assert_eq!(policy, SanitizePolicy::default());
    }

    #[test]
    fn test_validate_rejects_matching_replacement() {
        let policy = SanitizePolicy {
            replacement: "<secret>".to_string(),
            ..SanitizePolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_policy_serialization() {
        let policy = SanitizePolicy::default();
        let json = serde_json::to_string_pretty(&policy).unwrap();

        let parsed: SanitizePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, policy);
    }
}
