//! Process execution request and result types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BuildcheckError, Result};

/// A validated request to run a shell command in a working directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRequest {
    /// Shell command line, passed unmodified to the shell.
    pub command: String,

    /// Working directory for the child process.
    pub cwd: PathBuf,
}

impl RunRequest {
    /// Build a request, rejecting an empty command or working directory.
    pub fn new(command: impl Into<String>, cwd: impl Into<PathBuf>) -> Result<Self> {
        let command = command.into();
        let cwd = cwd.into();

        if command.trim().is_empty() {
            return Err(BuildcheckError::EmptyCommand);
        }
        if cwd.as_os_str().is_empty() {
            return Err(BuildcheckError::EmptyWorkingDirectory);
        }

        Ok(Self { command, cwd })
    }
}

/// Captured output of one command execution.
///
/// Produced exactly once per run. Execution failures are folded in as
/// `exit_code == 1` with the failure reason appended to `stderr`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessResult {
    /// Everything the process wrote to stdout.
    pub stdout: String,

    /// Everything the process wrote to stderr, plus any failure reason.
    pub stderr: String,

    /// Process exit code (0 when the platform reports none).
    pub exit_code: i32,
}

impl ProcessResult {
    /// Whether the process exited with code 0.
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_request_valid() {
        let req = RunRequest::new("npm run build", "/tmp").expect("valid");
        assert_eq!(req.command, "npm run build");
        assert_eq!(req.cwd, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_run_request_rejects_empty_command() {
        let err = RunRequest::new("   ", "/tmp").unwrap_err();
        assert!(matches!(err, BuildcheckError::EmptyCommand));
    }

    #[test]
    fn test_run_request_rejects_empty_cwd() {
        let err = RunRequest::new("make", "").unwrap_err();
        assert!(matches!(err, BuildcheckError::EmptyWorkingDirectory));
    }

    #[test]
    fn test_process_result_succeeded() {
        let ok = ProcessResult::default();
        assert!(ok.succeeded());

        let failed = ProcessResult {
            exit_code: 2,
            ..ProcessResult::default()
        };
        assert!(!failed.succeeded());
    }

    #[test]
    fn test_process_result_json_fields() {
        let result = ProcessResult {
            stdout: "out".to_string(),
            stderr: "err".to_string(),
            exit_code: 3,
        };
        let v = serde_json::to_value(&result).expect("to_value");
        assert_eq!(v["stdout"], "out");
        assert_eq!(v["stderr"], "err");
        assert_eq!(v["exit_code"], 3);
    }
}
