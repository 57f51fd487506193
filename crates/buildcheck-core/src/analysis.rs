//! The `analyze_logs` operation.

use tracing::info;

use crate::domain::AnalysisReport;
use crate::extract::{run_chain, LogText};
use crate::normalize::strip_ansi;

/// Extract the single most relevant diagnostic from captured output.
///
/// Both streams are ANSI-stripped, then searched as stderr followed by
/// stdout. Never fails: output nobody recognises is reported as success,
/// regardless of how the process exited.
pub fn analyze_logs(stdout: &str, stderr: &str) -> AnalysisReport {
    let normalized_stdout = strip_ansi(stdout);
    let normalized_stderr = strip_ansi(stderr);
    let combined = format!("{normalized_stderr}\n{normalized_stdout}");

    let logs = LogText {
        combined: &combined,
        stderr: &normalized_stderr,
        has_stderr: !stderr.is_empty(),
    };

    let report = AnalysisReport::from(run_chain(&logs));

    match report.diagnostic() {
        Some(diagnostic) => info!(
            event = "logs.analyzed",
            success = false,
            kind = %diagnostic.kind,
            code = diagnostic.code.as_deref().unwrap_or(""),
            file = diagnostic.file.as_deref().unwrap_or(""),
        ),
        None => info!(event = "logs.analyzed", success = true),
    }

    report
}
