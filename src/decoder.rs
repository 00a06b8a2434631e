//! Stage 1: decoding of escaped double-byte characters.
//!
//! RTF encodes characters outside the base 7-bit set as `\'XX` hex byte
//! escapes, with the codepage selected by the most recent `\lang` /
//! `\deflang` declaration. Multi-byte encodings (Shift_JIS, GBK, Big5, ...)
//! spread one character across consecutive escapes, so a run of escapes must
//! be accumulated and decoded as a single byte sequence.
//!
//! The input is split on the escape character; every token after the first
//! was preceded by a backslash in the source. Non-byte-run tokens are
//! re-emitted with their backslash so the command stripper still sees the
//! original structure.

use crate::diagnostics::StripWarning;
use crate::encoding::{DEFAULT_ENCODING, declared_encoding};
use encoding_rs::Encoding;
use smallvec::SmallVec;

/// Replace `\'XX` escape runs with the Unicode text they encode.
///
/// All other RTF syntax passes through unchanged. Recovered problems
/// (malformed escapes, invalid byte sequences) are appended to `warnings`.
pub(crate) fn decode(text: &str, warnings: &mut Vec<StripWarning>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut encoding = DEFAULT_ENCODING;
    let mut pending: SmallVec<[u8; 8]> = SmallVec::new();
    let mut first_word = true;

    for (index, token) in text.split('\\').enumerate() {
        if !token.is_empty() {
            let bytes = token.as_bytes();
            if bytes[0] == b'\'' {
                if let Some(byte) = hex_pair(bytes) {
                    pending.push(byte);

                    // Literal text trailing the escape ends the byte run.
                    if token.len() > 3 {
                        let decoded = decode_pending(&pending, encoding, warnings);
                        if first_word {
                            first_word = false;
                            out.push(' ');
                        }
                        out.push_str(&decoded);
                        pending.clear();
                        out.push_str(&token[3..]);
                    }

                    // The backslash was consumed by the escape itself.
                    continue;
                }

                warnings.push(StripWarning::InvalidHexEscape {
                    escape: token.chars().take(3).collect(),
                });
                log::warn!("invalid hex escape \\{token}, passing through");
                // Fall through and treat the token as literal content.
            }

            if !pending.is_empty() {
                let decoded = decode_pending(&pending, encoding, warnings);
                if first_word {
                    out.push(' ');
                }
                out.push_str(&decoded);
                pending.clear();
            }

            // Locale declarations take effect after the flush above, so a
            // run broken by a declaration decodes with the prior encoding.
            if token.starts_with("lang") || token.starts_with("deflang") {
                encoding = declared_encoding(token);
            }
        }

        first_word = true;
        if index != 0 {
            out.push('\\');
        }
        out.push_str(token);
    }

    // A byte run may end with the input itself.
    if !pending.is_empty() {
        let decoded = decode_pending(&pending, encoding, warnings);
        if first_word {
            out.push(' ');
        }
        out.push_str(&decoded);
    }

    out
}

/// Read the two hex digits of a `\'XX` token, if present.
fn hex_pair(bytes: &[u8]) -> Option<u8> {
    if bytes.len() < 3 {
        return None;
    }
    let hi = (bytes[1] as char).to_digit(16)?;
    let lo = (bytes[2] as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

/// Decode an accumulated byte group with the active encoding.
fn decode_pending(
    raw: &[u8],
    encoding: &'static Encoding,
    warnings: &mut Vec<StripWarning>,
) -> String {
    let (decoded, had_errors) = encoding.decode_without_bom_handling(raw);
    if had_errors {
        warnings.push(StripWarning::MalformedByteRun {
            encoding: encoding.name(),
        });
        log::warn!(
            "byte run of {} bytes is malformed for {}, decoded lossily",
            raw.len(),
            encoding.name()
        );
    }
    decoded.into_owned()
}
