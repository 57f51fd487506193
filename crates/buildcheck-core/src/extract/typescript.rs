//! TypeScript compiler (`tsc`) diagnostics.

use std::sync::LazyLock;

use regex::Regex;

use super::{message_or_line, non_empty_capture, parse_line_number, split_lines, Extractor, LogText};
use crate::domain::{Diagnostic, DiagnosticKind};

/// Shapes in precedence order. A later shape is only tried after the
/// earlier one failed on every line.
static TSC_SHAPES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // `<file>(<line>,<col>): error <CODE>: <message>`
        Regex::new(
            r"^(?P<file>.+?)\((?P<line>\d+),(?P<col>\d+)\):\s*error\s*(?P<code>TS\d+):\s*(?P<message>.*)$",
        )
        .unwrap(),
        // `<file>:<line>:<col> - error <CODE>: <message>`
        Regex::new(
            r"^(?P<file>.+?):(?P<line>\d+):(?P<col>\d+)\s*-\s*error\s*(?P<code>TS\d+):\s*(?P<message>.*)$",
        )
        .unwrap(),
        // `error <CODE>: <message>` without a location
        Regex::new(r"error\s*(?P<code>TS\d+):\s*(?P<message>.*)").unwrap(),
    ]
});

/// TypeScript extractor. Second in the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptExtractor;

impl Extractor for TypeScriptExtractor {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::TypeScript
    }

    fn try_extract(&self, logs: &LogText<'_>) -> Option<Diagnostic> {
        let lines = split_lines(logs.combined);

        TSC_SHAPES.iter().find_map(|shape| {
            lines.iter().find_map(|line| {
                let caps = shape.captures(line)?;
                Some(
                    Diagnostic::new(DiagnosticKind::TypeScript, message_or_line(&caps, line))
                        .with_code(non_empty_capture(&caps, "code"))
                        .with_location(
                            non_empty_capture(&caps, "file"),
                            caps.name("line").and_then(|m| parse_line_number(m.as_str())),
                        ),
                )
            })
        })
    }
}
