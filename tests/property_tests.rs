//! Property-based tests for the annotation decoder
//!
//! These tests use proptest to verify decoder invariants across many
//! randomly generated payloads, catching edge cases that hand-written
//! tests might miss.

use outcheck::annotation::{AnnotationError, decode_payload};
use proptest::prelude::*;

proptest! {
    /// Property: payloads without backslashes decode to themselves.
    #[test]
    fn plain_text_decodes_to_itself(payload in "[a-zA-Z0-9 .,:;!?()-]*") {
        prop_assert_eq!(decode_payload(&payload, 1).unwrap(), payload);
    }

    /// Property: encoding newlines as `\n` and decoding round-trips.
    #[test]
    fn newline_escapes_round_trip(text in "[a-zA-Z0-9 ]{0,40}(\n[a-zA-Z0-9 ]{0,40}){0,3}") {
        let encoded = text.replace('\n', "\\n");
        prop_assert_eq!(decode_payload(&encoded, 1).unwrap(), text);
    }

    /// Property: any escape other than `\n` is rejected, never guessed.
    #[test]
    fn unsupported_escapes_are_rejected(prefix in "[a-z ]{0,10}", escape in "[a-mo-z]") {
        let payload = format!("{}\\{}", prefix, escape);
        let escape = escape.chars().next().unwrap();
        prop_assert_eq!(
            decode_payload(&payload, 1),
            Err(AnnotationError::UnsupportedEscape { escape, line: 1 })
        );
    }

    /// Property: a payload ending in a bare backslash is always rejected.
    #[test]
    fn trailing_backslash_is_always_rejected(prefix in "[a-z ]{0,10}") {
        let payload = format!("{}\\", prefix);
        prop_assert_eq!(
            decode_payload(&payload, 1),
            Err(AnnotationError::TrailingBackslash { line: 1 })
        );
    }

    /// Property: decoded length never exceeds payload length (escapes
    /// only ever shrink the text).
    #[test]
    fn decoding_never_grows_the_payload(text in "[a-zA-Z0-9 ]{0,40}(\n[a-zA-Z0-9 ]{0,40}){0,3}") {
        let encoded = text.replace('\n', "\\n");
        let decoded = decode_payload(&encoded, 1).unwrap();
        prop_assert!(decoded.len() <= encoded.len());
    }
}
