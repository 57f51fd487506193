//! buildcheck exec - run a build command once and capture its output
//!
//! Provides:
//! - [`run_build`]: execute a shell command in a working directory with the
//!   default shell and return a [`ProcessResult`]
//! - [`ShellRunner`]: the same with a configurable [`ShellConfig`]
//! - [`BuildRunner`]: the async seam callers can substitute in tests

mod completion;
pub mod runner;
pub mod shell;

pub use buildcheck_core::{ProcessResult, RunRequest};
pub use runner::{run_build, BuildRunner, ShellRunner};
pub use shell::{ShellConfig, SHELL_ENV};
