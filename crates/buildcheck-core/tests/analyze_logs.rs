//! End-to-end behaviour of `analyze_logs` over realistic build output.

use buildcheck_core::{analyze_logs, AnalysisReport, DiagnosticKind};
use serde_json::Value;

fn assert_report_invariants(report: &AnalysisReport) {
    assert_eq!(report.is_success(), report.diagnostics().is_empty());
    assert!(report.diagnostics().len() <= 1);
}

// ── Report invariants ─────────────────────────────────────────────────────

#[test]
fn test_report_invariants_hold_across_inputs() {
    let cases = [
        ("", ""),
        ("all good\n", ""),
        ("", "error: boom\n"),
        ("Build failed\n", "warning: unused\n"),
        ("src/a.ts(1,1): error TS1005: ';' expected.\n", ""),
        ("", "[baseline-browser-mapping] deprecated feature used\n"),
        (
            "",
            "src/app/app.component.html:1:1 - error NG8001: bad\nError occurs in the template of component App.\n",
        ),
    ];

    for (stdout, stderr) in cases {
        let report = analyze_logs(stdout, stderr);
        assert_report_invariants(&report);
    }
}

#[test]
fn test_analysis_is_deterministic() {
    let stdout = "\u{1b}[32m✔\u{1b}[0m Building...\nsrc/a.ts:3:1 - error TS2304: Cannot find name 'x'.\n";
    let stderr = "npm ERR! code ELIFECYCLE\n";
    assert_eq!(analyze_logs(stdout, stderr), analyze_logs(stdout, stderr));
}

#[test]
fn test_pre_stripped_input_gives_same_report() {
    let raw = "\u{1b}[31mError: \u{1b}[1mmodule not found\u{1b}[0m\u{1b}[K\n";
    let stripped = buildcheck_core::strip_ansi(raw);
    assert_eq!(analyze_logs("", raw), analyze_logs("", &stripped));
}

// ── Normalization ─────────────────────────────────────────────────────────

#[test]
fn test_ansi_sequences_removed_before_matching() {
    let report = analyze_logs("", "\u{1b}[31merror: boom\u{1b}[0m");
    let diag = report.diagnostic().expect("diagnostic");
    assert_eq!(diag.message, "error: boom");
}

// ── Priority ──────────────────────────────────────────────────────────────

#[test]
fn test_angular_anchor_beats_generic_error_line() {
    let stderr = "\
Build at: 2024-01-01 - Hash: abc - Time: 1234ms
Error: some generic failure
Error occurs in the template of component AppComponent.
";
    let report = analyze_logs("", stderr);
    let diag = report.diagnostic().expect("diagnostic");
    assert_eq!(diag.kind, DiagnosticKind::Angular);
}

#[test]
fn test_angular_anchor_beats_typescript_line() {
    let stdout = "\
src/main.ts(1,1): error TS1005: ';' expected.
src/app/app.component.html:2:3 - error NG8002: Can't bind to 'x'.
Error occurs in the template of component AppComponent.
";
    let diag = analyze_logs(stdout, "").diagnostic().cloned().expect("diagnostic");
    assert_eq!(diag.kind, DiagnosticKind::Angular);
    assert_eq!(diag.code.as_deref(), Some("NG8002"));
}

#[test]
fn test_typescript_beats_generic() {
    let stdout = "\
> tsc -p .
Found 1 error.
src/app.ts(10,5): error TS2322: Type 'string' is not assignable to type 'number'.
";
    let diag = analyze_logs(stdout, "").diagnostic().cloned().expect("diagnostic");
    assert_eq!(diag.kind, DiagnosticKind::TypeScript);
}

// ── Extractor contracts ───────────────────────────────────────────────────

#[test]
fn test_typescript_paren_diagnostic_fields() {
    let report = analyze_logs(
        "src/app.ts(10,5): error TS2322: Type 'string' is not assignable to type 'number'.",
        "",
    );
    let diag = report.diagnostic().expect("diagnostic");
    assert_eq!(diag.code.as_deref(), Some("TS2322"));
    assert_eq!(diag.file.as_deref(), Some("src/app.ts"));
    assert_eq!(diag.line, Some(10));
    assert_eq!(
        diag.message,
        "Type 'string' is not assignable to type 'number'."
    );
}

#[test]
fn test_baseline_banner_on_stderr_is_not_an_error() {
    let report = analyze_logs("", "[baseline-browser-mapping] deprecated feature used\n");
    assert!(report.is_success());
    assert!(report.diagnostics().is_empty());
}

#[test]
fn test_warnings_only_stderr_is_success() {
    let stderr = "\
Warning: bundle initial exceeded maximum budget.
npm WARN deprecated glob@7.2.3: Glob versions prior to v9 are no longer supported
";
    let report = analyze_logs("Application bundle generation complete.\n", stderr);
    assert!(report.is_success());
}

#[test]
fn test_template_window_uses_template_location_and_mentions_source() {
    let stderr = "\
src/app/hero.component.html:14:7 - error NG8002: Can't bind to 'hero' since it isn't a known property of 'app-detail'.

14       [hero]=\"selected\">
         ~~~~~~~~~~~~~~~~~~
  Error occurs in the template of component HeroComponent.

  src/app/hero.component.ts:8:16
";
    let report = analyze_logs("", stderr);
    let diag = report.diagnostic().expect("diagnostic");
    assert_eq!(diag.kind, DiagnosticKind::Angular);
    assert_eq!(diag.file.as_deref(), Some("src/app/hero.component.html"));
    assert_eq!(diag.line, Some(14));
    assert_eq!(diag.code.as_deref(), Some("NG8002"));
    assert!(diag.message.contains("(src/app/hero.component.ts:8:16)"));
    assert!(diag
        .message
        .starts_with("Error occurs in the template of component HeroComponent."));
}

#[test]
fn test_nonzero_exit_output_without_errors_is_success() {
    // Exit status plays no part; only log content matters.
    let report = analyze_logs("Done in 2.1s\n", "");
    assert!(report.is_success());
}

// ── Wire shape ────────────────────────────────────────────────────────────

#[test]
fn test_report_serializes_with_expected_keys() {
    let report = analyze_logs("", "error TS5058: The specified path does not exist.");
    let v: Value = serde_json::to_value(&report).expect("to_value");
    assert_eq!(v["success"], false);

    let diag = &v["diagnostics"][0];
    for key in ["kind", "code", "file", "line", "message"] {
        assert!(diag.get(key).is_some(), "missing key: {}", key);
    }
    assert_eq!(diag["kind"], "typescript");
    assert!(diag["file"].is_null());
}

#[test]
fn test_success_report_serializes_empty_list() {
    let v: Value = serde_json::to_value(analyze_logs("ok", "")).expect("to_value");
    assert_eq!(v["success"], true);
    assert_eq!(v["diagnostics"], serde_json::json!([]));
}
