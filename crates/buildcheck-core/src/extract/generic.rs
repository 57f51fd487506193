//! Fallback heuristic for tools without a dedicated extractor.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};

use super::{split_lines, Extractor, LogText};
use crate::domain::{Diagnostic, DiagnosticKind};

/// Word `error`, `failed` or `failure`, any case.
static ERROR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:error|failed|failure)\b").unwrap());

/// Word `warning`, any case.
static WARNING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bwarning\b").unwrap());

/// `error` anywhere, any case. Gate for the stderr fallback.
static ERROR_ANYWHERE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)error").unwrap());

/// Stderr lines that never carry the actual failure.
static NON_FATAL_NOISE: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // `DeprecationWarning: ...`, `npm WARN deprecated ...`
        r"(?i)\bdeprecat(?:ed|ion)",
        // `bundle initial exceeded maximum budget. Budget 500.00 kB was not met ...`
        r"(?i)\bbudget\b.*\bexceeded\b|\bexceeded\b.*\bbudget\b",
        // `2 rules skipped due to selector errors:`
        r"(?i)\brules?\s+skipped\s+due\s+to\s+selector\s+errors?",
        // `[baseline-browser-mapping] The data in this module is over two months old ...`
        r"^\s*\[baseline-browser-mapping\]",
    ])
    .unwrap()
});

/// Generic extractor. Last in the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericExtractor;

impl Extractor for GenericExtractor {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::Generic
    }

    fn try_extract(&self, logs: &LogText<'_>) -> Option<Diagnostic> {
        first_error_line(logs.combined)
            .or_else(|| {
                if logs.has_stderr {
                    first_fatal_stderr_line(logs.stderr)
                } else {
                    None
                }
            })
            .map(|line| Diagnostic::new(DiagnosticKind::Generic, line))
    }
}

/// First non-blank, non-warning line mentioning an error or failure.
fn first_error_line(text: &str) -> Option<&str> {
    split_lines(text).into_iter().find(|line| {
        !line.trim().is_empty() && !WARNING_LINE.is_match(line) && ERROR_LINE.is_match(line)
    })
}

/// First stderr line that is neither a warning nor known noise.
///
/// Stderr that never mentions "error" is treated as non-fatal chatter.
fn first_fatal_stderr_line(stderr: &str) -> Option<&str> {
    if !ERROR_ANYWHERE.is_match(stderr) {
        return None;
    }

    split_lines(stderr).into_iter().find(|line| {
        let trimmed = line.trim();
        !trimmed.is_empty() && !WARNING_LINE.is_match(trimmed) && !NON_FATAL_NOISE.is_match(trimmed)
    })
}
