/*!
 * Known-Hosts Manager
 * Host-key lookup via ssh-keygen and consented acquisition via ssh-keyscan
 */

use super::types::HostKeyError;
use log::{error, info, warn};
use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::os::unix::fs::DirBuilderExt;
use std::path::PathBuf;
use std::process::Command;

/// Query the host-key finder. The host is known iff the finder exits
/// zero AND its captured output contains the substring `Host`.
pub fn is_known_host(hostname: &str) -> bool {
    keygen_lookup(hostname, None)
}

/// `ssh-keygen -F`, optionally against an explicit file instead of the
/// operator's default known_hosts.
fn keygen_lookup(hostname: &str, file: Option<&std::path::Path>) -> bool {
    info!("Checking known_hosts for {}", hostname);
    let mut command = Command::new("ssh-keygen");
    command.args(["-F", hostname]);
    if let Some(file) = file {
        command.arg("-f").arg(file);
    }

    let output = match command.output() {
        Ok(output) => output,
        Err(e) => {
            error!("Failed to run ssh-keygen for {}: {}", hostname, e);
            return false;
        }
    };

    if !output.status.success() {
        info!("No known_hosts entry for {}", hostname);
        return false;
    }

    String::from_utf8_lossy(&output.stdout).contains("Host")
}

/// Acquire the host key with the external scanner and append it to
/// `$HOME/.ssh/known_hosts`. The file is append-only from this side;
/// `.ssh` is created with mode 0700 when missing.
pub fn acquire_host_key(hostname: &str) -> Result<(), HostKeyError> {
    info!("Running ssh-keyscan for {}", hostname);
    let output = Command::new("ssh-keyscan").args(["-H", hostname]).output()?;

    if !output.status.success() || output.stdout.is_empty() {
        warn!(
            "ssh-keyscan failed for {} (status {}, {} bytes)",
            hostname,
            output.status,
            output.stdout.len()
        );
        return Err(HostKeyError::ScanFailed(hostname.to_string()));
    }

    append_to_known_hosts(&output.stdout)?;
    info!("Added host key for {}", hostname);
    Ok(())
}

/// Append scanner output verbatim to `$HOME/.ssh/known_hosts`.
pub(crate) fn append_to_known_hosts(record: &[u8]) -> Result<PathBuf, HostKeyError> {
    let home = std::env::var_os("HOME").ok_or(HostKeyError::HomeNotSet)?;
    let ssh_dir = PathBuf::from(home).join(".ssh");

    if !ssh_dir.is_dir() {
        info!("Creating {} with mode 0700", ssh_dir.display());
        DirBuilder::new().mode(0o700).create(&ssh_dir)?;
    }

    let path = ssh_dir.join("known_hosts");
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    file.write_all(record)?;
    file.flush()?;
    Ok(path)
}
