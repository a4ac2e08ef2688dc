/*!
 * Ssh Preflight
 * Target extraction, reachability and port probes, known-host handling
 */

mod hostname;
mod hostkeys;
mod probes;
mod types;

pub use hostname::{ssh_port, ssh_target, DEFAULT_SSH_PORT};
pub use hostkeys::{acquire_host_key, is_known_host};
pub use probes::{is_port_open, is_valid_hostname, ping_host};
pub use types::{HostKeyError, PreflightError, PreflightResult};
