//! Key-name fragments that mark a field as sensitive.

use crate::{RedactionError, Result};

/// Ordered set of case-insensitive key-name fragments.
///
/// A key is sensitive when its name contains any fragment as a substring,
/// ignoring case. Values are never inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Lowercased fragments, in the order they were given.
    fragments: Vec<String>,
}

impl FilterSet {
    /// Build a filter set from fragments.
    ///
    /// Empty fragments are dropped since they would match every key.
    /// Duplicates (after lowercasing) are kept only once.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for fragment in fragments {
            let lowered = fragment.as_ref().to_lowercase();
            if lowered.is_empty() || out.contains(&lowered) {
                continue;
            }
            out.push(lowered);
        }
        Self { fragments: out }
    }

    /// The fragments list used by analytics payloads.
    pub fn default_sensitive() -> Self {
        Self::new(crate::DEFAULT_SENSITIVE_FIELDS)
    }

    /// Lowercased fragments in configuration order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns whether `key` contains any fragment, ignoring case.
    pub fn matches(&self, key: &str) -> bool {
        if self.fragments.is_empty() {
            return false;
        }
        let key = key.to_lowercase();
        self.fragments.iter().any(|f| key.contains(f.as_str()))
    }

    /// Check that `replacement` can stand in for redacted values.
    ///
    /// The token must be non-empty, must not itself match a fragment, and must
    /// not contain characters that need escaping inside a JSON string.
    pub fn check_replacement(&self, replacement: &str) -> Result<()> {
        if replacement.is_empty() {
            return Err(RedactionError::Policy(
                "replacement token must not be empty".to_string(),
            ));
        }
        if replacement
            .chars()
            .any(|c| c == '"' || c == '\\' || c.is_control())
        {
            return Err(RedactionError::Policy(
                "replacement token must not contain quotes, backslashes or control characters"
                    .to_string(),
            ));
        }
        if self.matches(replacement) {
            return Err(RedactionError::Policy(format!(
                "replacement token {replacement:?} matches a sensitive field fragment"
            )));
        }
        Ok(())
    }
}
