//! Key-name driven redaction over JSON payloads.
//!
//! The payload is parsed into a [`serde_json::Value`] tree, every object key
//! is tested against the [`FilterSet`], and the value under a matching key is
//! replaced wholesale by the replacement token. Key order is preserved.

use serde_json::Value;

use crate::args::redact_arg_values;
use crate::{FilterSet, Redacted, RedactionError, Result};

/// Structural redactor for JSON payloads.
#[derive(Debug, Clone, Copy)]
pub struct KeyRedactor<'a> {
    filter: &'a FilterSet,
    replacement: &'a str,
    argument_pairs: bool,
}

impl<'a> KeyRedactor<'a> {
    pub fn new(filter: &'a FilterSet, replacement: &'a str) -> Self {
        Self {
            filter,
            replacement,
            argument_pairs: false,
        }
    }

    /// Also treat string arrays as argument vectors (see [`crate::args`]).
    pub fn with_argument_pairs(mut self, enabled: bool) -> Self {
        self.argument_pairs = enabled;
        self
    }

    /// Redact a JSON payload, returning compact JSON.
    pub fn redact(&self, payload: &[u8]) -> Result<Redacted> {
        self.filter.check_replacement(self.replacement)?;

        let mut tree: Value = serde_json::from_slice(payload).map_err(|err| {
            tracing::warn!(kind = ?err.classify(), "structural redaction rejected payload");
            RedactionError::decode_json(err)
        })?;

        let redactions = self.redact_value(&mut tree);

        let bytes = serde_json::to_vec(&tree)
            .map_err(|err| RedactionError::Encode(format!("failed to serialize payload: {err}")))?;

        tracing::debug!(redactions, "structural redaction complete");
        Ok(Redacted { bytes, redactions })
    }

    /// Redact an already parsed tree in place, returning the redaction count.
    pub fn redact_value(&self, value: &mut Value) -> usize {
        match value {
            Value::Object(map) => {
                let mut count = 0;
                for (key, child) in map.iter_mut() {
                    if self.filter.matches(key) {
                        *child = Value::String(self.replacement.to_string());
                        count += 1;
                    } else {
                        count += self.redact_value(child);
                    }
                }
                count
            }
            Value::Array(items) => {
                let mut count = 0;
                if self.argument_pairs {
                    count += redact_arg_values(self.filter, self.replacement, items);
                }
                for item in items.iter_mut() {
                    count += self.redact_value(item);
                }
                count
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => 0,
        }
    }
}

/// Replace the value of every key matching `filter` with `replacement`.
///
/// Fails with [`RedactionError::Decode`] when `payload` is not JSON.
pub fn redact_by_key(filter: &FilterSet, replacement: &str, payload: &[u8]) -> Result<Redacted> {
    KeyRedactor::new(filter, replacement).redact(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn redact_json(filter: &FilterSet, input: Value) -> (Value, usize) {
        let mut value = input;
        let count = KeyRedactor::new(filter, "***").redact_value(&mut value);
        (value, count)
    }

    #[test]
    fn test_password_scenario() {
        let filter = FilterSet::new(["password"]);
        let input = br##"{"password":"#er+aVnqOjnyTtzn-snyk", "Other":"public"}"##;

        let result = redact_by_key(&filter, "***", input).unwrap();

        assert_eq!(result.as_str(), Some(r#"{"password":"***","Other":"public"}"#));
        assert_eq!(result.redactions, 1);
    }

    #[test]
    fn test_any_value_type_replaced() {
        let filter = FilterSet::new(["secret"]);
        let (out, count) = redact_json(
            &filter,
            json!({
                "SecretNumber": 987654,
                "secretFlag": true,
                "secret_list": ["a", "b"],
                "secretObj": {"inner": 1},
                "nullSecret": null,
                "plain": 5
            }),
        );

        assert_eq!(
            out,
            json!({
                "SecretNumber": "***",
                "secretFlag": "***",
                "secret_list": "***",
                "secretObj": "***",
                "nullSecret": "***",
                "plain": 5
            })
        );
        assert_eq!(count, 5);
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let filter = FilterSet::new(["token"]);
        let (out, count) = redact_json(
            &filter,
            json!({
                "outer": {
                    "items": [
                        {"name": "a", "apiToken": "t1"},
                        {"name": "b", "nested": [{"refresh_token": "t2"}]}
                    ]
                }
            }),
        );

        assert_eq!(out["outer"]["items"][0]["apiToken"], json!("***"));
        assert_eq!(out["outer"]["items"][0]["name"], json!("a"));
        assert_eq!(out["outer"]["items"][1]["nested"][0]["refresh_token"], json!("***"));
        assert_eq!(count, 2);
    }

    #[test]
    fn test_key_matching_multiple_fragments_counted_once() {
        let filter = FilterSet::new(["private", "key", "secret"]);
        let (out, count) = redact_json(&filter, json!({"PrivateKeySecret": "123"}));

        assert_eq!(out, json!({"PrivateKeySecret": "***"}));
        assert_eq!(count, 1);
    }

    #[test]
    fn test_scalar_strings_in_arrays_ignored_without_argument_pairs() {
        let filter = FilterSet::new(["password"]);
        let (out, count) = redact_json(&filter, json!({"Args": ["password=DogsRule"]}));

        assert_eq!(out, json!({"Args": ["password=DogsRule"]}));
        assert_eq!(count, 0);
    }

    #[test]
    fn test_argument_pairs_enabled() {
        let filter = FilterSet::new(["password", "token"]);
        let mut value = json!({"Args": ["password=DogsRule", "--mytoken", "CatsDont", "--x=y"]});
        let count = KeyRedactor::new(&filter, "***")
            .with_argument_pairs(true)
            .redact_value(&mut value);

        assert_eq!(value, json!({"Args": ["password=***", "--mytoken", "***", "--x=y"]}));
        assert_eq!(count, 2);
    }

    #[test]
    fn test_key_order_preserved() {
        let filter = FilterSet::new(["token"]);
        let input = br#"{"z":1,"token":"t","a":{"y":2,"b":3}}"#;

        let result = redact_by_key(&filter, "***", input).unwrap();
        assert_eq!(result.as_str(), Some(r#"{"z":1,"token":"***","a":{"y":2,"b":3}}"#));
    }

    #[test]
    fn test_numbers_keep_their_spelling() {
        let filter = FilterSet::new(["token"]);
        let input = br#"{"big":12345678901234567890123,"exp":1e5,"f":1.50}"#;

        let result = redact_by_key(&filter, "***", input).unwrap();
        assert_eq!(result.as_bytes(), &input[..]);
        assert_eq!(result.redactions, 0);
    }

    #[test]
    fn test_unmatched_fragment_is_noop() {
        let filter = FilterSet::new(["nothing-here"]);
        let input = br#"{"a":"b"}"#;

        let result = redact_by_key(&filter, "***", input).unwrap();
        assert_eq!(result.as_bytes(), &input[..]);
        assert_eq!(result.redactions, 0);
    }

    #[test]
    fn test_top_level_scalar_and_array() {
        let filter = FilterSet::new(["token"]);

        let scalar = redact_by_key(&filter, "***", b"\"token\"").unwrap();
        assert_eq!(scalar.as_str(), Some("\"token\""));

        let array = redact_by_key(&filter, "***", br#"[{"token":1},{"x":2}]"#).unwrap();
        assert_eq!(array.as_str(), Some(r#"[{"token":"***"},{"x":2}]"#));
        assert_eq!(array.redactions, 1);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let filter = FilterSet::new(["token"]);
        let err = redact_by_key(&filter, "***", b"{\"token\": ").unwrap_err();
        assert!(matches!(err, RedactionError::Decode(_)));
    }

    #[test]
    fn test_bad_replacement_is_policy_error() {
        let filter = FilterSet::new(["token"]);
        let err = redact_by_key(&filter, "my-token", br#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, RedactionError::Policy(_)));
    }
}
