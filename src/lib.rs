//! rtfplain - lossy conversion of RTF encoded text to plain Unicode text.
//!
//! Project and document files frequently store free-text fields (notes,
//! comments) as RTF. This crate turns such fields into readable plain text
//! by discarding formatting rather than rendering it: styles, tables and
//! embedded objects are removed, paragraph and tab commands become `\n` and
//! `\t`, and `\'XX` escaped byte runs are decoded with the codepage implied
//! by the most recent `\lang`/`\deflang` declaration.
//!
//! The operation is total. Malformed input (truncated object blocks, broken
//! hex escapes) degrades to best-effort output; use
//! [`strip_with_diagnostics`] to observe what was recovered from.
//!
//! # Example
//!
//! ```rust
//! let plain = rtfplain::strip(r"{\rtf1\ansi\deff0 Hello\par World}");
//! assert_eq!(plain, "Hello\nWorld");
//! ```

mod decoder;
mod diagnostics;
mod encoding;
mod stripper;

pub use diagnostics::{StripOutput, StripWarning};

/// Remove all RTF formatting from a piece of text.
///
/// Convenience wrapper over [`strip_with_diagnostics`] that discards the
/// warnings. Never fails; malformed input yields best-effort output.
pub fn strip(text: &str) -> String {
    strip_with_diagnostics(text).text
}

/// Remove all RTF formatting, reporting recovered failures.
///
/// Runs the two-stage pipeline: escaped double-byte characters are decoded
/// to Unicode first, then the remaining command syntax is stripped. All
/// internal failures are absorbed into [`StripOutput::warnings`].
pub fn strip_with_diagnostics(text: &str) -> StripOutput {
    let mut warnings = Vec::new();
    let decoded = decoder::decode(text, &mut warnings);
    let text = stripper::strip_commands(decoded, &mut warnings);
    StripOutput { text, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(strip(""), "");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = "Task is on schedule, no action needed.";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn test_already_stripped_text_is_stable() {
        let once = strip(r"{\rtf1\ansi\deff0 Hello\par World}");
        assert_eq!(strip(&once), once);
    }

    #[test]
    fn test_minimal_document() {
        assert_eq!(
            strip(r"{\rtf1\ansi\deff0 Hello\par World}"),
            "Hello\nWorld"
        );
    }

    #[test]
    fn test_header_tables_discarded() {
        let rtf = r"{\rtf1\ansi{\fonttbl{\f0\fswiss Helvetica;}}\f0\pard note text\par}";
        assert_eq!(strip(rtf), "note text\n");
    }

    #[test]
    fn test_japanese_byte_run_end_to_end() {
        // 0x82 0xA0 / 0x82 0xA2 are Shift_JIS hiragana; the locale lookup
        // path (1041 -> Shift_JIS) must be taken, not the 1252 fallback.
        // The word-boundary space flushed after \lang1041 is consumed along
        // with the control word itself.
        assert_eq!(strip(r"\lang1041\'82\'a0\'82\'a2"), "\u{3042}\u{3044}");
    }

    #[test]
    fn test_fallback_byte_run_end_to_end() {
        // 1036 (French) is unmapped, so 0xE9 decodes via windows-1252.
        assert_eq!(strip(r"\lang1036 caf\'e9"), "caf \u{e9}");
    }

    #[test]
    fn test_object_block_with_binary_payload() {
        let rtf = r"see{\object\objemb{\*\objclass Paint}01af23b0}attachment";
        assert_eq!(strip(rtf), "seeattachment");
    }

    #[test]
    fn test_malformed_input_reports_warnings() {
        let output = strip_with_diagnostics(r"a\'zz{\object b");
        assert_eq!(output.warnings.len(), 2);
        assert!(matches!(
            output.warnings[0],
            StripWarning::InvalidHexEscape { .. }
        ));
        assert!(matches!(
            output.warnings[1],
            StripWarning::UnterminatedObjectBlock { .. }
        ));
    }

    #[test]
    fn test_leading_apostrophe_reads_as_escape_marker() {
        // A first token starting with ' is indistinguishable from a \'XX
        // escape, so it is not plain text: "'41" decodes as hex 0x41.
        let output = strip_with_diagnostics("'41abc");
        assert_eq!(output.text, " Aabc");
        let output = strip_with_diagnostics("'");
        assert_eq!(
            output.warnings,
            vec![StripWarning::InvalidHexEscape {
                escape: "'".to_string()
            }]
        );
    }

    proptest! {
        /// Text free of control syntax is returned unchanged. The first
        /// character must not be an apostrophe: the decoder cannot tell a
        /// leading ' apart from a byte-escape marker (see the test above).
        #[test]
        fn test_plain_text_identity(text in "[A-Za-z0-9 ,.:!?()=+_-][A-Za-z0-9 ,.:!?'()=+_-]{0,63}") {
            let output = strip_with_diagnostics(&text);
            prop_assert_eq!(output.text, text);
            prop_assert!(output.warnings.is_empty());
        }
    }
}
