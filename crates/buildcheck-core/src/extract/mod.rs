//! Format-specific error extractors and the fixed-priority chain that runs them.
//!
//! Each extractor recognises one log format and yields at most one
//! [`Diagnostic`]. The chain order is part of the contract: Angular template
//! errors win over TypeScript errors, which win over the generic heuristic.

pub mod angular;
pub mod generic;
pub mod typescript;

use regex::Captures;
use tracing::debug;

use crate::domain::{Diagnostic, DiagnosticKind};

pub use angular::AngularExtractor;
pub use generic::GenericExtractor;
pub use typescript::TypeScriptExtractor;

/// Normalized log text handed to every extractor.
#[derive(Debug, Clone, Copy)]
pub struct LogText<'a> {
    /// Normalized stderr, a newline, then normalized stdout.
    pub combined: &'a str,

    /// Normalized stderr on its own.
    pub stderr: &'a str,

    /// Whether the raw stderr was non-empty.
    pub has_stderr: bool,
}

/// A single-format matcher.
pub trait Extractor: Send + Sync {
    /// Kind stamped on diagnostics this extractor produces.
    fn kind(&self) -> DiagnosticKind;

    /// Return the first diagnostic this format recognises, if any.
    fn try_extract(&self, logs: &LogText<'_>) -> Option<Diagnostic>;
}

/// Extractors in priority order.
pub fn extractor_chain() -> [&'static dyn Extractor; 3] {
    [&AngularExtractor, &TypeScriptExtractor, &GenericExtractor]
}

/// Run the chain and return the first non-empty result.
pub fn run_chain(logs: &LogText<'_>) -> Option<Diagnostic> {
    extractor_chain().into_iter().find_map(|extractor| {
        let found = extractor.try_extract(logs);
        debug!(
            extractor = %extractor.kind(),
            matched = found.is_some(),
            "extractor tried"
        );
        found
    })
}

/// Split on `\n` or `\r\n`.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Parse a 1-indexed line number; zero and unparsable values become `None`.
pub(crate) fn parse_line_number(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Trimmed capture group, or `None` when absent or blank.
pub(crate) fn non_empty_capture(caps: &Captures<'_>, group: &str) -> Option<String> {
    caps.name(group)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trimmed message capture, falling back to the whole trimmed line.
pub(crate) fn message_or_line(caps: &Captures<'_>, line: &str) -> String {
    non_empty_capture(caps, "message").unwrap_or_else(|| line.trim().to_string())
}
