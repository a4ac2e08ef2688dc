/*!
 * Ssh Target Extraction
 * Hostname and port derivation from an admitted argument list
 */

use super::types::{PreflightError, PreflightResult};

/// Port probed when no `-p` override is present.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Derive the target hostname from an ssh argument list: the final
/// positional argument (last token not starting with `-`), taking the
/// substring after the last `@` when one exists.
pub fn ssh_target(args: &[String]) -> Option<String> {
    let positional = args.iter().rev().find(|arg| !arg.starts_with('-'))?;
    let host = match positional.rfind('@') {
        Some(at) => &positional[at + 1..],
        None => positional.as_str(),
    };
    if host.is_empty() {
        return None;
    }
    Some(host.to_string())
}

/// Resolve the port override. Recognizes digits attached to `-p` (the
/// only form the gate admits) and, defensively, the token following a
/// lone `-p`. A malformed or zero port rejects the invocation rather
/// than silently probing 22.
pub fn ssh_port(args: &[String]) -> PreflightResult<u16> {
    for (index, arg) in args.iter().enumerate() {
        if arg == "-p" {
            let value = args
                .get(index + 1)
                .ok_or_else(|| PreflightError::InvalidPort("missing value".to_string()))?;
            return parse_port(value);
        }
        if let Some(attached) = arg.strip_prefix("-p") {
            return parse_port(attached);
        }
    }
    Ok(DEFAULT_SSH_PORT)
}

fn parse_port(value: &str) -> PreflightResult<u16> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(PreflightError::InvalidPort(value.to_string())),
    }
}
