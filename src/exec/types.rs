/*!
 * Executor Types
 * Outcomes and failure modes of one PTY-attached command
 */

use nix::errno::Errno;
use nix::sys::signal::Signal;
use thiserror::Error;

/// Executor operation result
pub type ExecResult<T> = Result<T, ExecError>;

/// Executor errors. `Fork` and `PtyAllocation` are surfaced to the
/// session loop as caught errors; relay anomalies end the loop cleanly
/// instead and never appear here.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to allocate pty: {0}")]
    PtyAllocation(#[source] Errno),

    #[error("fork failed: {0}")]
    Fork(#[source] Errno),

    #[error("invalid command string: {0}")]
    InvalidCommand(String),

    #[error("failed to install signal handler: {0}")]
    SignalInstall(#[source] Errno),

    #[error("failed to reap child: {0}")]
    Wait(#[source] Errno),
}

/// How one executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Child exited on its own with this status code.
    Exited(i32),
    /// Child was terminated by a signal (operator interrupt forwarding
    /// included).
    Signaled(Signal),
    /// Wall-clock timeout expired; the child was sent SIGTERM and reaped.
    TimedOut,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        matches!(self, CommandOutcome::Exited(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_success() {
        assert!(CommandOutcome::Exited(0).success());
        assert!(!CommandOutcome::Exited(1).success());
        assert!(!CommandOutcome::Signaled(Signal::SIGTERM).success());
        assert!(!CommandOutcome::TimedOut.success());
    }
}
