/*!
 * Secure Shell Library
 * Restricted interactive shell: command gating, ssh preflight,
 * PTY execution, and sandbox bootstrap
 */

pub mod config;
pub mod exec;
pub mod gate;
pub mod logging;
pub mod preflight;
pub mod sandbox;
pub mod session;

pub use config::Config;
pub use exec::{CommandOutcome, PtyExecutor};
pub use gate::{AllowedCommand, Invocation};
pub use session::Session;
