//! Angular template compiler errors.
//!
//! The Angular compiler reports template errors as an anchor line
//! (`Error occurs in the template of component AppComponent.`) surrounded by
//! the lines that carry the real information: the template location above
//! it, the component source location below it, and an `NG`/`TS` code
//! somewhere close by. Without an anchor, two older single-line shapes are
//! recognised instead.

use std::sync::LazyLock;

use regex::Regex;

use super::{
    message_or_line, non_empty_capture, parse_line_number, split_lines, Extractor, LogText,
};
use crate::domain::{Diagnostic, DiagnosticKind};

/// `Error occurs in the template of component <Name>`
static TEMPLATE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\berror occurs in the template of component\s+[\w$]+").unwrap()
});

/// `<path>:<line>:<col>` at the start of a line (leading whitespace allowed,
/// optional drive letter).
static LOCATION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<file>(?:[A-Za-z]:)?[^\s:]+):(?P<line>\d+):(?P<col>\d+)").unwrap()
});

/// `NG8002`, `TS2339`, ...
static DIAGNOSTIC_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:NG|TS)\d+\b").unwrap());

/// `ERROR in <file>:<line>:<col> - error <CODE>: <message>`
static ERROR_IN_WITH_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"ERROR in (?P<file>.+?):(?P<line>\d+):(?P<col>\d+)\s*-\s*error\s*(?P<code>(?:NG|TS)\d+):\s*(?P<message>.*)",
    )
    .unwrap()
});

/// `ERROR in <file>`
static ERROR_IN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ERROR in (?P<file>.*)$").unwrap());

/// Extension of the file holding the template.
const TEMPLATE_EXTENSIONS: &[&str] = &[".html"];

/// Extensions of component source files.
const SOURCE_EXTENSIONS: &[&str] = &[".ts", ".mts", ".cts"];

/// Lines searched on each side of the anchor for a diagnostic code.
const CODE_WINDOW: usize = 6;

/// Angular compiler extractor. Highest priority in the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngularExtractor;

impl Extractor for AngularExtractor {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::Angular
    }

    fn try_extract(&self, logs: &LogText<'_>) -> Option<Diagnostic> {
        let lines = split_lines(logs.combined);

        match lines.iter().position(|line| TEMPLATE_ANCHOR.is_match(line)) {
            Some(anchor) => Some(from_anchor(&lines, anchor)),
            None => find_error_in_with_code(&lines).or_else(|| find_error_in(&lines)),
        }
    }
}

/// A `<path>:<line>:<col>` prefix found on some line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Location<'a> {
    file: &'a str,
    line: Option<u32>,
    /// The `path:line:col` text as printed.
    text: &'a str,
}

impl<'a> Location<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let caps = LOCATION_PREFIX.captures(line)?;
        let file = caps.name("file")?.as_str();
        let line_no = caps.name("line").and_then(|m| parse_line_number(m.as_str()));
        let start = caps.name("file")?.start();
        let end = caps.name("col")?.end();

        Some(Self {
            file,
            line: line_no,
            text: &line[start..end],
        })
    }

    fn has_extension(&self, extensions: &[&str]) -> bool {
        let lower = self.file.to_ascii_lowercase();
        extensions.iter().any(|ext| lower.ends_with(ext))
    }
}

/// Nearest location in `lines` (already ordered outward from the anchor),
/// preferring one whose file has a `preferred` extension.
fn nearest_location<'a>(
    lines: impl Iterator<Item = &'a str>,
    preferred: &[&str],
) -> Option<Location<'a>> {
    let mut nearest = None;
    for line in lines {
        if let Some(location) = Location::parse(line) {
            if location.has_extension(preferred) {
                return Some(location);
            }
            if nearest.is_none() {
                nearest = Some(location);
            }
        }
    }
    nearest
}

/// First diagnostic code within `CODE_WINDOW` lines of the anchor, checking
/// `anchor - k` before `anchor + k` for each distance `k`.
fn code_near(lines: &[&str], anchor: usize) -> Option<String> {
    for k in 0..=CODE_WINDOW {
        let mut candidates = Vec::with_capacity(2);
        if let Some(before) = anchor.checked_sub(k) {
            candidates.push(before);
        }
        if k > 0 && anchor + k < lines.len() {
            candidates.push(anchor + k);
        }

        for idx in candidates {
            if let Some(m) = DIAGNOSTIC_CODE.find(lines[idx]) {
                return Some(m.as_str().to_string());
            }
        }
    }
    None
}

fn from_anchor(lines: &[&str], anchor: usize) -> Diagnostic {
    let template = nearest_location(lines[..anchor].iter().rev().copied(), TEMPLATE_EXTENSIONS);
    let source = nearest_location(lines[anchor + 1..].iter().copied(), SOURCE_EXTENSIONS);

    let anchor_text = lines[anchor].trim();
    let message = match source {
        Some(source) => format!("{} ({})", anchor_text, source.text),
        None => anchor_text.to_string(),
    };

    let (file, line) = match template.or(source) {
        Some(location) => (Some(location.file.to_string()), location.line),
        None => (None, None),
    };

    Diagnostic::new(DiagnosticKind::Angular, message)
        .with_code(code_near(lines, anchor))
        .with_location(file, line)
}

fn find_error_in_with_code(lines: &[&str]) -> Option<Diagnostic> {
    lines.iter().find_map(|line| {
        let caps = ERROR_IN_WITH_CODE.captures(line)?;
        Some(
            Diagnostic::new(DiagnosticKind::Angular, message_or_line(&caps, line))
                .with_code(non_empty_capture(&caps, "code"))
                .with_location(
                    non_empty_capture(&caps, "file"),
                    caps.name("line").and_then(|m| parse_line_number(m.as_str())),
                ),
        )
    })
}

fn find_error_in(lines: &[&str]) -> Option<Diagnostic> {
    lines.iter().find_map(|line| {
        let caps = ERROR_IN.captures(line)?;
        Some(
            Diagnostic::new(DiagnosticKind::Angular, line)
                .with_location(non_empty_capture(&caps, "file"), None),
        )
    })
}
