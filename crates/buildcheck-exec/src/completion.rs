//! One-shot delivery of a run's result.
//!
//! A run can end through two paths: the process could not be executed, or
//! it exited. Both paths try to resolve the same [`Completion`]; the first
//! one wins and later attempts are dropped.

use tokio::sync::oneshot;
use tracing::debug;

use buildcheck_core::ProcessResult;

/// Which completion path fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    ExecutionFailed,
    Exited,
}

impl Signal {
    fn as_str(&self) -> &'static str {
        match self {
            Signal::ExecutionFailed => "execution_failed",
            Signal::Exited => "exited",
        }
    }
}

/// Sending half of a run's result. Resolves at most once.
pub(crate) struct Completion {
    tx: Option<oneshot::Sender<ProcessResult>>,
}

impl Completion {
    pub(crate) fn new() -> (Self, oneshot::Receiver<ProcessResult>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Deliver the result built by `build` unless a result was already
    /// delivered. `build` only runs for the winning signal. Returns whether
    /// this call delivered.
    pub(crate) fn resolve_with(
        &mut self,
        signal: Signal,
        build: impl FnOnce() -> ProcessResult,
    ) -> bool {
        match self.tx.take() {
            Some(tx) => {
                // The receiver lives until the runner returns.
                let _ = tx.send(build());
                true
            }
            None => {
                debug!(signal = signal.as_str(), "late completion signal ignored");
                false
            }
        }
    }
}
