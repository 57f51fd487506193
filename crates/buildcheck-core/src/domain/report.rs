//! Outcome of log analysis.

use serde::Serialize;

use super::diagnostic::Diagnostic;

/// Result of `analyze_logs`: either success with no diagnostics, or failure
/// carrying the single most relevant diagnostic.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnalysisReport {
    success: bool,
    diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    /// Report for output in which no extractor found an error.
    pub fn success() -> Self {
        Self {
            success: true,
            diagnostics: Vec::new(),
        }
    }

    /// Report carrying exactly one diagnostic.
    pub fn failure(diagnostic: Diagnostic) -> Self {
        Self {
            success: false,
            diagnostics: vec![diagnostic],
        }
    }

    /// `true` iff no diagnostic was extracted.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Extracted diagnostics (zero or one element).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The extracted diagnostic, if any.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }
}

impl From<Option<Diagnostic>> for AnalysisReport {
    fn from(found: Option<Diagnostic>) -> Self {
        match found {
            Some(diagnostic) => Self::failure(diagnostic),
            None => Self::success(),
        }
    }
}
