//! Normalized diagnostic extracted from build output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Log format that produced a diagnostic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// Angular template compiler (anchor line plus nearby location/code lines).
    Angular,
    /// TypeScript type checker (`tsc`).
    TypeScript,
    /// Any other tool, matched heuristically.
    Generic,
}

impl DiagnosticKind {
    /// Stable lowercase name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Angular => "angular",
            DiagnosticKind::TypeScript => "typescript",
            DiagnosticKind::Generic => "generic",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single error pulled out of stdout/stderr.
///
/// `code`, `file` and `line` are `None` when the format does not carry them
/// or the value could not be parsed. `message` is always trimmed and
/// non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    /// Which extractor recognised the output.
    pub kind: DiagnosticKind,

    /// Toolchain code (e.g. "TS2322", "NG8002").
    pub code: Option<String>,

    /// Source file path as printed by the tool.
    pub file: Option<String>,

    /// Line number (1-indexed).
    pub line: Option<u32>,

    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with only a message. The message is trimmed.
    pub fn new(kind: DiagnosticKind, message: impl AsRef<str>) -> Self {
        Self {
            kind,
            code: None,
            file: None,
            line: None,
            message: message.as_ref().trim().to_string(),
        }
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    /// Set file location. Either part may be unknown.
    pub fn with_location(mut self, file: Option<String>, line: Option<u32>) -> Self {
        self.file = file;
        self.line = line;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&DiagnosticKind::TypeScript).expect("serialize");
        assert_eq!(json, "\"typescript\"");
        let json = serde_json::to_string(&DiagnosticKind::Angular).expect("serialize");
        assert_eq!(json, "\"angular\"");
    }

    #[test]
    fn test_kind_display_matches_serde() {
        for kind in [
            DiagnosticKind::Angular,
            DiagnosticKind::TypeScript,
            DiagnosticKind::Generic,
        ] {
            let json = serde_json::to_string(&kind).expect("serialize");
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_new_trims_message() {
        let diag = Diagnostic::new(DiagnosticKind::Generic, "  build failed \n");
        assert_eq!(diag.message, "build failed");
        assert!(diag.code.is_none());
        assert!(diag.file.is_none());
        assert!(diag.line.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let diag = Diagnostic::new(DiagnosticKind::TypeScript, "bad type")
            .with_code(Some("TS2322".to_string()))
            .with_location(Some("src/app.ts".to_string()), Some(10));
        assert_eq!(diag.code.as_deref(), Some("TS2322"));
        assert_eq!(diag.file.as_deref(), Some("src/app.ts"));
        assert_eq!(diag.line, Some(10));
    }
}
