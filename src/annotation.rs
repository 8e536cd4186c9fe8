//! Expected-output annotations embedded in test-case files.
//!
//! A test case declares the standard output it should produce with a line
//! of the form `//@out: <payload>`. The payload carries a minimal escape
//! grammar: `\n` decodes to a line feed, every other character copies
//! through unchanged. If a file contains several annotation lines, the
//! last one wins; a file with no annotation line expects empty output.
//!
//! ## Errors
//!
//! Decoding rejects malformed payloads instead of guessing:
//!
//! - an escape other than `\n` is [`AnnotationError::UnsupportedEscape`]
//! - a bare backslash at the end of the payload is
//!   [`AnnotationError::TrailingBackslash`]

use thiserror::Error;

/// Marker prefix that introduces an expected-output annotation.
pub const MARKER: &str = "//@out: ";

/// Errors produced while decoding an annotation payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnnotationError {
    /// A backslash escape other than `\n`.
    #[error("unsupported escape '\\{escape}' in annotation on line {line}")]
    UnsupportedEscape { escape: char, line: usize },

    /// A backslash with nothing after it.
    #[error("annotation on line {line} ends with a bare backslash")]
    TrailingBackslash { line: usize },
}

/// Scan a test-case source for its expected standard output.
///
/// Returns the decoded payload of the last `//@out: ` line, or the empty
/// string when no such line exists. An absent annotation and an
/// explicitly empty one are deliberately indistinguishable.
pub fn expected_output(source: &str) -> Result<String, AnnotationError> {
    let mut expected = String::new();
    for (idx, line) in source.lines().enumerate() {
        if let Some(payload) = line.strip_prefix(MARKER) {
            expected = decode_payload(payload, idx + 1)?;
        }
    }
    Ok(expected)
}

/// Decode one annotation payload.
///
/// `line` is the 1-based source line the payload came from, used only
/// for error reporting.
pub fn decode_payload(payload: &str, line: usize) -> Result<String, AnnotationError> {
    let mut decoded = String::with_capacity(payload.len());
    let mut chars = payload.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some(other) => {
                return Err(AnnotationError::UnsupportedEscape { escape: other, line });
            }
            None => return Err(AnnotationError::TrailingBackslash { line }),
        }
    }

    Ok(decoded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn plain_payload_copies_through() {
        assert_eq!(decode_payload("hello world", 1).unwrap(), "hello world");
    }

    #[test]
    fn newline_escape_decodes() {
        assert_eq!(decode_payload("a\\nb", 1).unwrap(), "a\nb");
    }

    #[test]
    fn consecutive_escapes_decode() {
        assert_eq!(decode_payload("\\n\\n", 1).unwrap(), "\n\n");
    }

    #[test]
    fn unsupported_escape_is_rejected() {
        assert_eq!(
            decode_payload("a\\qb", 3),
            Err(AnnotationError::UnsupportedEscape { escape: 'q', line: 3 })
        );
    }

    #[test]
    fn trailing_backslash_is_rejected() {
        assert_eq!(
            decode_payload("oops\\", 7),
            Err(AnnotationError::TrailingBackslash { line: 7 })
        );
    }

    #[test]
    fn no_annotation_means_empty_expectation() {
        let source = "int main() { return 0; }\n";
        assert_eq!(expected_output(source).unwrap(), "");
    }

    #[test]
    fn annotation_line_is_extracted() {
        let source = "//@out: a\\nb\nint main() {}\n";
        assert_eq!(expected_output(source).unwrap(), "a\nb");
    }

    #[test]
    fn last_annotation_wins() {
        let source = "//@out: first\ncode here\n//@out: second\n";
        assert_eq!(expected_output(source).unwrap(), "second");
    }

    #[test]
    fn marker_requires_exact_prefix() {
        // Missing the space after the colon: not an annotation line.
        let source = "//@out:hi\n";
        assert_eq!(expected_output(source).unwrap(), "");
    }

    #[test]
    fn annotation_without_trailing_newline_keeps_last_char() {
        // A final line with no newline must not lose its last character.
        let source = "//@out: hi";
        assert_eq!(expected_output(source).unwrap(), "hi");
    }

    #[test]
    fn error_reports_source_line_number() {
        let source = "fine\nfine\n//@out: bad\\z\n";
        assert_eq!(
            expected_output(source),
            Err(AnnotationError::UnsupportedEscape { escape: 'z', line: 3 })
        );
    }
}
