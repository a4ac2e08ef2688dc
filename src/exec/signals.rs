/*!
 * Signal Forwarding
 * Process-global async-signal-safe slots and the forwarding handler
 */

use super::types::{ExecError, ExecResult};
use nix::libc;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// Cleared only on terminal error; the session loop runs while it holds.
static RUNNING: AtomicBool = AtomicBool::new(true);

/// Live child pid, or 0 for "none". Written by the parent around each
/// child session; the handler only reads it.
static CHILD_PID: AtomicI32 = AtomicI32::new(0);

pub fn is_running() -> bool {
    RUNNING.load(Ordering::Relaxed)
}

/// Terminal-error path only; nothing sets the flag back.
pub fn clear_running() {
    RUNNING.store(false, Ordering::Relaxed);
}

pub(super) fn set_current_child(pid: libc::pid_t) {
    CHILD_PID.store(pid, Ordering::Relaxed);
}

pub(super) fn clear_current_child() {
    CHILD_PID.store(0, Ordering::Relaxed);
}

/// Handler body: forward the operator's interrupt to the live child, if
/// any. Runs in handler context, so it performs no allocation and
/// touches nothing but the pid slot.
extern "C" fn forward_interrupt(_signum: libc::c_int) {
    let pid = CHILD_PID.load(Ordering::Relaxed);
    if pid > 0 {
        // SAFETY: kill(2) is async-signal-safe.
        unsafe {
            libc::kill(pid, libc::SIGINT);
        }
    }
}

/// Install the single process-wide handler for SIGINT, SIGTERM, and
/// SIGQUIT. Called once at startup, before the sandbox bootstrap.
pub fn install_handlers() -> ExecResult<()> {
    let action = SigAction::new(
        SigHandler::Handler(forward_interrupt),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGTERM, Signal::SIGQUIT] {
        // SAFETY: the handler is a plain extern "C" fn that only reads an
        // atomic and calls kill(2).
        unsafe {
            sigaction(signal, &action).map_err(ExecError::SignalInstall)?;
        }
    }
    Ok(())
}
