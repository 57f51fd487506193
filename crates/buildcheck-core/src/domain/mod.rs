//! Value types shared by the runner and the log analyzer.

pub mod diagnostic;
pub mod process;
pub mod report;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use process::{ProcessResult, RunRequest};
pub use report::AnalysisReport;
