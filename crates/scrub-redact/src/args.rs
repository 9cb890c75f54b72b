//! Redaction of command-line style argument vectors.
//!
//! Argument lists carry sensitive values without JSON keys, so the argument
//! name plays the role of the key:
//!
//! - `name=value` and `--name=value` keep everything up to `=` and replace the value.
//! - `--name` followed by a non-flag argument replaces that following argument.
//!
//! Each pair whose name matches the filter set counts as one redaction.

use serde_json::Value;

use crate::FilterSet;

/// What to do with a single argument.
#[derive(Debug, PartialEq, Eq)]
enum ArgAction {
    Keep,
    Replace(String),
    /// Sensitive flag without an inline value; the next argument is its value.
    RedactNext,
}

fn classify(filter: &FilterSet, replacement: &str, arg: &str) -> ArgAction {
    if let Some(eq) = arg.find('=') {
        let name = arg[..eq].trim_start_matches('-');
        if !name.is_empty() && filter.matches(name) {
            return ArgAction::Replace(format!("{}{}", &arg[..=eq], replacement));
        }
        return ArgAction::Keep;
    }

    if arg.starts_with('-') {
        let name = arg.trim_start_matches('-');
        if !name.is_empty() && filter.matches(name) {
            return ArgAction::RedactNext;
        }
    }
    ArgAction::Keep
}

/// Redact sensitive values in place. `None` slots are non-string elements:
/// they are skipped and cannot receive a pending flag value.
fn redact_slots<'a, I>(filter: &FilterSet, replacement: &str, slots: I) -> usize
where
    I: Iterator<Item = Option<&'a mut String>>,
{
    let mut count = 0;
    let mut value_pending = false;

    for slot in slots {
        let pending = std::mem::take(&mut value_pending);
        let Some(arg) = slot else {
            continue;
        };

        if pending && !arg.starts_with('-') {
            *arg = replacement.to_string();
            count += 1;
            continue;
        }

        match classify(filter, replacement, arg) {
            ArgAction::Keep => {}
            ArgAction::Replace(redacted) => {
                *arg = redacted;
                count += 1;
            }
            ArgAction::RedactNext => value_pending = true,
        }
    }

    count
}

/// Redact an argument vector, returning the new vector and the number of
/// redacted values.
pub fn redact_args<S: AsRef<str>>(
    filter: &FilterSet,
    replacement: &str,
    args: &[S],
) -> (Vec<String>, usize) {
    let mut out: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
    let count = redact_slots(filter, replacement, out.iter_mut().map(Some));
    (out, count)
}

/// Redact the string elements of a JSON array as an argument vector.
pub(crate) fn redact_arg_values(filter: &FilterSet, replacement: &str, items: &mut [Value]) -> usize {
    redact_slots(
        filter,
        replacement,
        items.iter_mut().map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        }),
    )
}
