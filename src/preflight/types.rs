/*!
 * Preflight Types
 * Abort reasons for the hostname -> reachability -> port -> key pipeline
 */

use thiserror::Error;

/// Preflight operation result
pub type PreflightResult<T> = Result<T, PreflightError>;

/// An ssh invocation refused before execution. All variants are
/// recovered locally: the session prints a diagnostic and continues.
#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("invalid hostname or address: {0}")]
    InvalidHostname(String),

    #[error("invalid ssh port: {0}")]
    InvalidPort(String),

    #[error("aborted by operator at {stage} for host {host}")]
    Aborted { host: String, stage: &'static str },

    #[error(transparent)]
    HostKey(#[from] HostKeyError),
}

/// Host-key acquisition failures
#[derive(Debug, Error)]
pub enum HostKeyError {
    #[error("HOME is not set")]
    HomeNotSet,

    #[error("key scan produced no usable output for {0}")]
    ScanFailed(String),

    #[error("cannot update known_hosts: {0}")]
    Io(#[from] std::io::Error),
}
