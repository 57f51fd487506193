//! Shell selection.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the shell program.
pub const SHELL_ENV: &str = "BUILDCHECK_SHELL";

/// Shell used to interpret command strings: `<program> <flag> <command>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Shell executable.
    pub program: PathBuf,

    /// Flag that makes the shell run its next argument as a command line.
    pub flag: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        if cfg!(windows) {
            Self {
                program: PathBuf::from("cmd"),
                flag: "/C".to_string(),
            }
        } else {
            Self {
                program: PathBuf::from("sh"),
                flag: "-c".to_string(),
            }
        }
    }
}

impl ShellConfig {
    /// Use `program` with the platform's default command flag.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Default shell, unless `BUILDCHECK_SHELL` names another program.
    pub fn from_env() -> Self {
        Self::from_override(std::env::var_os(SHELL_ENV))
    }

    fn from_override(program: Option<OsString>) -> Self {
        match program {
            Some(program) if !program.is_empty() => Self::with_program(program),
            _ => Self::default(),
        }
    }
}
