/*!
 * Capability Narrowing
 * Reduce to the raw-socket capabilities and lock privilege escalation
 */

use super::types::{SandboxError, SandboxResult};
use caps::{CapSet, Capability, CapsHashSet};
use nix::sys::prctl;

/// Retained so the external ping/tracepath children can open raw sockets
/// without elevation elsewhere. Dropping them is a deployment choice
/// when those binaries carry file capabilities.
const RETAINED: [Capability; 2] = [Capability::CAP_NET_RAW, Capability::CAP_NET_ADMIN];

/// Clear everything, then keep exactly the retained capabilities in the
/// effective and permitted sets.
pub(super) fn narrow() -> SandboxResult<()> {
    let retained: CapsHashSet = RETAINED.iter().copied().collect();

    caps::clear(None, CapSet::Inheritable)?;
    // Effective first while the permitted set still covers it, then
    // shrink permitted down to the same pair.
    caps::set(None, CapSet::Effective, &retained)?;
    caps::set(None, CapSet::Permitted, &retained)?;

    Ok(())
}

/// Prevent setuid/file-capability escalation for all descendants.
pub(super) fn lock_privileges() -> SandboxResult<()> {
    prctl::set_no_new_privs().map_err(SandboxError::NoNewPrivs)
}
