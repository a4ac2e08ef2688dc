/*!
 * Sandbox Types
 * Fatal bootstrap failures
 */

use nix::errno::Errno;
use thiserror::Error;

/// Sandbox operation result
pub type SandboxResult<T> = Result<T, SandboxError>;

/// Bootstrap failures. All are fatal: the process must not serve an
/// operator over-permitted.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("failed to set {resource} limit: {source}")]
    Rlimit {
        resource: &'static str,
        #[source]
        source: Errno,
    },

    #[error("capability operation failed: {0}")]
    Capability(#[from] caps::errors::CapsError),

    #[error("failed to set no_new_privs: {0}")]
    NoNewPrivs(#[source] Errno),
}
