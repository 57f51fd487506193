//! Shell command execution with incremental output capture.
//!
//! Every call spawns exactly one child process, owns its output buffers,
//! and produces exactly one [`ProcessResult`]. There is no timeout: a
//! command that never exits keeps the call pending.

use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, info, info_span, warn, Instrument};

use buildcheck_core::{ProcessResult, RunRequest};

use crate::completion::{Completion, Signal};
use crate::shell::ShellConfig;

/// Read size for each stdout/stderr chunk.
const CHUNK_SIZE: usize = 8 * 1024;

/// Executes build commands. Never fails: execution problems are reported
/// inside the returned [`ProcessResult`].
#[async_trait]
pub trait BuildRunner: Send + Sync {
    /// Run the request's command and wait for it to finish.
    async fn run_build(&self, request: &RunRequest) -> ProcessResult;
}

/// Runs commands through a shell, inheriting this process's environment,
/// with stdin closed.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    shell: ShellConfig,
}

#[async_trait]
impl BuildRunner for ShellRunner {
    async fn run_build(&self, request: &RunRequest) -> ProcessResult {
        self.run(&request.command, &request.cwd).await
    }
}

impl ShellRunner {
    /// Runner using the given shell.
    pub fn new(shell: ShellConfig) -> Self {
        Self { shell }
    }

    /// Shell this runner invokes.
    pub fn shell(&self) -> &ShellConfig {
        &self.shell
    }

    /// Run `command` in `cwd` and collect its output.
    ///
    /// If the command cannot be executed, the result has exit code 1 and the
    /// failure description plus a newline appended to stderr. Otherwise the
    /// exit code is the process's own, or 0 when the platform reports none
    /// (e.g. killed by a signal).
    pub async fn run(&self, command: &str, cwd: impl AsRef<Path>) -> ProcessResult {
        let cwd = cwd.as_ref();
        let span = info_span!("buildcheck.run", command = %command, cwd = %cwd.display());
        self.execute(command, cwd).instrument(span).await
    }

    async fn execute(&self, command: &str, cwd: &Path) -> ProcessResult {
        let started = Instant::now();
        let (mut completion, outcome) = Completion::new();
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        match self.spawn(command, cwd) {
            Err(err) => {
                completion.resolve_with(Signal::ExecutionFailed, || {
                    execution_failed(&stdout_buf, &stderr_buf, &err)
                });
            }
            Ok(mut child) => {
                let stdout_pipe = child.stdout.take();
                let stderr_pipe = child.stderr.take();

                let (stdout_read, stderr_read, status) = tokio::join!(
                    capture(stdout_pipe, &mut stdout_buf, "stdout"),
                    capture(stderr_pipe, &mut stderr_buf, "stderr"),
                    child.wait(),
                );

                settle(
                    &mut completion,
                    &stdout_buf,
                    &stderr_buf,
                    stdout_read.and(stderr_read),
                    status,
                );
            }
        }

        let result = match outcome.await {
            Ok(result) => result,
            Err(_) => execution_failed(
                &stdout_buf,
                &stderr_buf,
                &io::Error::other("runner finished without a result"),
            ),
        };

        info!(
            event = "run.finished",
            exit_code = result.exit_code,
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            duration_ms = started.elapsed().as_millis() as u64,
        );
        result
    }

    fn spawn(&self, command: &str, cwd: &Path) -> io::Result<Child> {
        Command::new(&self.shell.program)
            .arg(&self.shell.flag)
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
    }
}

/// Run `command` in `cwd` with the default shell, or the one named by
/// `BUILDCHECK_SHELL`.
pub async fn run_build(command: &str, cwd: impl AsRef<Path>) -> ProcessResult {
    ShellRunner::new(ShellConfig::from_env()).run(command, cwd).await
}

/// Resolve a run whose child was spawned.
///
/// A failed pipe read only loses output: the exit status still decides the
/// result. Exit code 1 is reserved for a child that could not be waited on.
fn settle(
    completion: &mut Completion,
    stdout_buf: &[u8],
    stderr_buf: &[u8],
    read: io::Result<()>,
    status: io::Result<ExitStatus>,
) {
    if let Err(err) = &read {
        warn!(event = "run.capture_failed", error = %err);
    }

    match status {
        Ok(status) => {
            completion.resolve_with(Signal::Exited, || ProcessResult {
                stdout: decode(stdout_buf),
                stderr: decode(stderr_buf),
                exit_code: status.code().unwrap_or(0),
            });
        }
        Err(err) => {
            completion.resolve_with(Signal::ExecutionFailed, || {
                execution_failed(stdout_buf, stderr_buf, &err)
            });
        }
    }
}

/// Append everything `pipe` produces to `buf`, chunk by chunk.
async fn capture<R>(pipe: Option<R>, buf: &mut Vec<u8>, stream: &'static str) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(mut pipe) = pipe else {
        return Ok(());
    };

    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let read = pipe.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..read]);
        debug!(stream, bytes = read, total = buf.len(), "output captured");
    }
}

fn decode(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).into_owned()
}

fn execution_failed(stdout: &[u8], stderr: &[u8], err: &io::Error) -> ProcessResult {
    warn!(event = "run.execution_failed", error = %err);
    ProcessResult {
        stdout: decode(stdout),
        stderr: format!("{}{}\n", decode(stderr), err),
        exit_code: 1,
    }
}
