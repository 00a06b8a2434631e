//! Stage 2: removal of RTF command syntax.
//!
//! Runs after escaped-byte decoding, so the text seen here contains no
//! pending `\'XX` runs. Two passes:
//!
//! 1. Embedded object blocks (`{\object ...}`) are removed wholesale by
//!    balanced-brace matching. Their payloads are binary data encoded as hex
//!    and may contain brace characters the pattern pass cannot reason about.
//! 2. A single-alternation pattern scan deletes the remaining command
//!    syntax, substituting literal text for the handful of commands that
//!    represent printable characters.

use crate::diagnostics::StripWarning;
use memchr::memmem;
use once_cell::sync::Lazy;
use phf::{Map, phf_map};
use regex::Regex;

/// Marker introducing an embedded object block.
const OBJECT_MARKER: &str = r"{\object";

/// RTF syntax matched by the stripping pass.
///
/// Alternatives are tried in order at each position and several are prefixes
/// of others, so the ordering is load-bearing: escape forms first, then
/// braced groups and table entries, then control words with and without
/// numeric arguments, then bare group delimiters and CR-LF.
static RTF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\\\\)|(\\~)|(\{\\stylesheet.*\{.*\}\{.*\}\})|(\{\\[A-Za-z]* .*\})|(\\[A-Za-z]* .*;\})|(\\[A-Za-z]*-?[0-9]* .*;\})|(\\[A-Za-z]*-?[0-9]+ )|(\\[A-Za-z]*-?[0-9]+)|(\\\*)|(\\[A-Za-z]* )|(\\[A-Za-z]*)|(\\\{)|(\\\})|(\{)|(\})|(\r\n)",
    )
    .expect("RTF command pattern is valid")
});

/// Replacements for matched commands that stand for printable characters.
/// Matches absent from this map are deleted.
static RTF_MAPPING: Map<&'static str, &'static str> = phf_map! {
    r"\par" => "\n",
    r"\tab" => "\t",
    r"\\" => "\\",
    r"\{" => "{",
    r"\}" => "}",
    r"\rquote" => "\u{2019}",
    r"\endash" => "\u{2013}",
    r"\ldblquote" => "\u{201C}",
    r"\rdblquote" => "\u{201D}",
    r"\~" => "\u{A0}",
};

/// Remove all RTF command syntax from decoded text.
pub(crate) fn strip_commands(rtf: String, warnings: &mut Vec<StripWarning>) -> String {
    let rtf = remove_object_blocks(rtf, warnings);
    apply_pattern(&rtf)
}

/// Delete every `{\object ...}` block, matching braces across nesting.
///
/// An unterminated block stops the pass without touching the remaining
/// text; the pattern pass still runs over whatever is left.
fn remove_object_blocks(mut rtf: String, warnings: &mut Vec<StripWarning>) -> String {
    let finder = memmem::Finder::new(OBJECT_MARKER.as_bytes());
    let mut search_from = 0;

    while let Some(found) = finder.find(rtf[search_from..].as_bytes()) {
        let start = search_from + found;
        match matching_brace(rtf.as_bytes(), start) {
            Some(end) => {
                rtf.replace_range(start..=end, "");
                search_from = start;
            },
            None => {
                warnings.push(StripWarning::UnterminatedObjectBlock { offset: start });
                log::warn!("unterminated object block at byte offset {start}, left as-is");
                break;
            },
        }
    }

    rtf
}

/// Find the brace closing the group opened at `open`, across nested groups.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (index, &byte) in bytes.iter().enumerate().skip(open + 1) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            },
            _ => {},
        }
    }
    None
}

/// Single left-to-right scan replacing or deleting every pattern match.
fn apply_pattern(rtf: &str) -> String {
    let mut out = String::with_capacity(rtf.len());
    let mut last = 0;

    for found in RTF_PATTERN.find_iter(rtf) {
        out.push_str(&rtf[last..found.start()]);
        if let Some(replacement) = RTF_MAPPING.get(found.as_str().trim()) {
            out.push_str(replacement);
        }
        last = found.end();
    }
    out.push_str(&rtf[last..]);

    out
}
