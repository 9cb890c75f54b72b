//! Fuzz target for key-name redaction.
//!
//! Arbitrary bytes must either be rejected with an error or produce JSON
//! that parses again and is stable under a second pass.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scrub_redact::{FilterSet, KeyRedactor};

fuzz_target!(|data: &[u8]| {
    let filter = FilterSet::default_sensitive();
    let redactor = KeyRedactor::new(&filter, "***").with_argument_pairs(true);

    if let Ok(first) = redactor.redact(data) {
        let second = redactor
            .redact(first.as_bytes())
            .expect("redacted output must be valid JSON");
        assert_eq!(first.bytes, second.bytes);
    }
});
