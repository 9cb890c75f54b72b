//! Literal (identity-driven) redaction over opaque text.
//!
//! The payload is never parsed: usernames and home directories show up in
//! free-text fields such as error messages just as often as in structured
//! values, so every occurrence anywhere in the text is replaced.

use aho_corasick::{AhoCorasick, MatchKind};

use crate::{IdentityDescriptor, Redacted, RedactionError, Result};

/// Pattern id of the replacement token in the matcher.
const TOKEN_PATTERN: usize = 0;

/// Scrub `identity` from `text`, returning the new text and the number of
/// spans replaced.
///
/// All candidates are matched in one leftmost-longest pass over the original
/// text, so a span consumed by the home directory is not matched again by
/// the bare username inside it. Occurrences of `replacement` already in the
/// text count as consumed and are left alone.
pub fn redact_identity_str(
    identity: &IdentityDescriptor,
    replacement: &str,
    text: &str,
) -> Result<(String, usize)> {
    if replacement.is_empty() {
        return Err(RedactionError::Policy(
            "replacement token must not be empty".to_string(),
        ));
    }

    let candidates: Vec<String> = identity
        .candidates()
        .into_iter()
        .filter(|c| c != replacement)
        .collect();
    if candidates.is_empty() {
        return Ok((text.to_string(), 0));
    }

    let mut patterns: Vec<&str> = Vec::with_capacity(candidates.len() + 1);
    patterns.push(replacement);
    patterns.extend(candidates.iter().map(String::as_str));

    let matcher = AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(&patterns)
        .map_err(|err| RedactionError::Policy(format!("cannot build identity matcher: {err}")))?;

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut total = 0;
    for found in matcher.find_iter(text) {
        if found.pattern().as_usize() == TOKEN_PATTERN {
            continue;
        }
        out.push_str(&text[last..found.start()]);
        out.push_str(replacement);
        last = found.end();
        total += 1;
    }
    out.push_str(&text[last..]);

    tracing::debug!(
        candidates = candidates.len(),
        redactions = total,
        "identity redaction complete"
    );
    Ok((out, total))
}

/// Scrub `identity` from a UTF-8 payload.
///
/// Fails with [`RedactionError::Decode`] only when the payload is not text.
pub fn redact_identity(
    identity: &IdentityDescriptor,
    replacement: &str,
    payload: &[u8],
) -> Result<Redacted> {
    let text = std::str::from_utf8(payload).map_err(|err| {
        tracing::warn!(valid_up_to = err.valid_up_to(), "identity redaction rejected payload");
        RedactionError::Decode(format!(
            "payload is not valid UTF-8 (invalid byte at offset {})",
            err.valid_up_to()
        ))
    })?;

    let (text, redactions) = redact_identity_str(identity, replacement, text)?;
    Ok(Redacted {
        bytes: text.into_bytes(),
        redactions,
    })
}
