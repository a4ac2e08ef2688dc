/*!
 * Resource Limits
 * Hard-and-soft rlimits applied to this process and its descendants
 */

use super::types::{SandboxError, SandboxResult};
use nix::sys::resource::{setrlimit, Resource};

/// At most this many descendant processes.
const MAX_PROCESSES: u64 = 1024;

/// Virtual address space ceiling: 1 GiB.
const MAX_ADDRESS_SPACE: u64 = 1024 * 1024 * 1024;

/// CPU time ceiling per process: 60 seconds.
const MAX_CPU_SECONDS: u64 = 60;

/// Apply the process, memory, and CPU ceilings (hard and soft alike).
pub(super) fn apply() -> SandboxResult<()> {
    setrlimit(Resource::RLIMIT_NPROC, MAX_PROCESSES, MAX_PROCESSES).map_err(|source| {
        SandboxError::Rlimit {
            resource: "process",
            source,
        }
    })?;

    setrlimit(Resource::RLIMIT_AS, MAX_ADDRESS_SPACE, MAX_ADDRESS_SPACE).map_err(|source| {
        SandboxError::Rlimit {
            resource: "memory",
            source,
        }
    })?;

    setrlimit(Resource::RLIMIT_CPU, MAX_CPU_SECONDS, MAX_CPU_SECONDS).map_err(|source| {
        SandboxError::Rlimit {
            resource: "cpu time",
            source,
        }
    })?;

    Ok(())
}
