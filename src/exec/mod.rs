/*!
 * PTY Executor
 * Child execution on a pseudo-terminal with relay, timeout, and
 * operator-signal forwarding
 */

mod pty;
pub mod signals;
mod types;

pub use pty::PtyExecutor;
pub use types::{CommandOutcome, ExecError, ExecResult};
