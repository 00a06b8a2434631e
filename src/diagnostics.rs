//! Diagnostic types for the strip pipeline.
//!
//! Stripping is total: malformed input degrades to best-effort output rather
//! than an error. Everything that had to be recovered from along the way is
//! reported as a [`StripWarning`] so callers (and tests) can observe it.

use thiserror::Error;

/// Recovered, non-fatal problems encountered while stripping RTF.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StripWarning {
    /// A `\'` escape was not followed by two hex digits.
    #[error("invalid hex escape: \\{escape}")]
    InvalidHexEscape {
        /// Leading characters of the offending token.
        escape: String,
    },

    /// An escaped byte run contained sequences invalid for the active
    /// encoding; the run was decoded lossily.
    #[error("byte run is malformed for encoding {encoding}")]
    MalformedByteRun {
        /// Name of the encoding that was in effect.
        encoding: &'static str,
    },

    /// A `{\object` block was never closed; the removal pass stopped and
    /// left the remaining text untouched.
    #[error("unterminated object block at byte offset {offset}")]
    UnterminatedObjectBlock {
        /// Byte offset of the opening brace.
        offset: usize,
    },
}

/// Best-effort result of a strip operation.
///
/// The output text is always present; `warnings` records every recovered
/// failure in the order encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripOutput {
    /// Plain text with RTF command syntax removed.
    pub text: String,
    /// Recovered failures, empty for well-formed input.
    pub warnings: Vec<StripWarning>,
}
