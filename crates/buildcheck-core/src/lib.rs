//! buildcheck core library
//!
//! Turns raw build/test output into at most one structured diagnostic:
//! - [`strip_ansi`] normalizes terminal colour codes away
//! - a fixed-priority chain of extractors (Angular, TypeScript, generic)
//!   recognises the error
//! - [`analyze_logs`] ties the two together into an [`AnalysisReport`]
//!
//! Value types for the process runner ([`RunRequest`], [`ProcessResult`])
//! live here too so that callers depend on one crate for the data model.

pub mod analysis;
pub mod domain;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod telemetry;

pub use analysis::analyze_logs;
pub use domain::{AnalysisReport, Diagnostic, DiagnosticKind, ProcessResult, RunRequest};
pub use error::{BuildcheckError, Result};
pub use extract::{extractor_chain, Extractor, LogText};
pub use normalize::strip_ansi;
pub use telemetry::init_tracing;

/// buildcheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
