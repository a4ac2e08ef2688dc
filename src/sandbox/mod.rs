/*!
 * Sandbox Bootstrap
 * One-shot capability narrowing and kernel resource limits
 */

mod caps;
mod limits;
mod types;

pub use types::{SandboxError, SandboxResult};

use log::info;

/// Narrow this process once, before the session loop. Ordering is fixed:
/// limits first so a later-failing step cannot leave the process
/// over-permitted, capability narrowing before no-new-privs so the flag
/// cannot interfere with capability manipulation. Every step is fatal
/// on failure.
pub fn bootstrap() -> SandboxResult<()> {
    limits::apply()?;
    info!("Resource limits set");

    caps::narrow()?;
    info!("Capabilities narrowed to CAP_NET_RAW, CAP_NET_ADMIN");

    caps::lock_privileges()?;
    info!("no_new_privs set");

    Ok(())
}
