//! Error taxonomy for buildcheck.
//!
//! Neither `run_build` nor `analyze_logs` returns these: execution failures
//! are folded into the `ProcessResult` and "no match" is a successful
//! report. They cover input validation and the I/O around the operations.

/// Errors produced outside the two core operations.
#[derive(Debug, thiserror::Error)]
pub enum BuildcheckError {
    #[error("command must not be empty")]
    EmptyCommand,

    #[error("working directory must not be empty")]
    EmptyWorkingDirectory,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for buildcheck operations that can fail.
pub type Result<T> = std::result::Result<T, BuildcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(BuildcheckError::EmptyCommand
            .to_string()
            .contains("command must not be empty"));
        assert!(BuildcheckError::EmptyWorkingDirectory
            .to_string()
            .contains("working directory"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.log");
        let err: BuildcheckError = io.into();
        assert!(err.to_string().contains("io error"));
        assert!(err.to_string().contains("missing.log"));
    }
}
