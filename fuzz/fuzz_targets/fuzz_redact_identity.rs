//! Fuzz target for identity redaction.
//!
//! No candidate spelling may survive, whatever the identity and text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scrub_redact::{redact_identity_str, IdentityDescriptor};

#[derive(Debug, Arbitrary)]
struct Input {
    user: String,
    home: String,
    text: String,
}

fuzz_target!(|input: Input| {
    let identity = IdentityDescriptor::new(input.user, input.home);
    let Ok((output, _)) = redact_identity_str(&identity, "\u{0}", &input.text) else {
        return;
    };

    for candidate in identity.candidates() {
        if !candidate.contains('\u{0}') {
            assert!(!output.contains(candidate.as_str()));
        }
    }
});
