/*!
 * Operator Identity
 * Best-effort addresses logged at startup, never gated on
 */

use nix::ifaddrs::getifaddrs;

/// Operator address from `SSH_CLIENT` (first field), when present.
pub fn ssh_client_ip() -> Option<String> {
    let raw = std::env::var("SSH_CLIENT").ok()?;
    raw.split_ascii_whitespace().next().map(str::to_string)
}

/// First non-loopback local IPv4 address, when one exists.
pub fn local_ip() -> Option<String> {
    let addrs = getifaddrs().ok()?;
    for ifaddr in addrs {
        if ifaddr.interface_name == "lo" {
            continue;
        }
        if let Some(sockaddr) = ifaddr.address {
            if let Some(inet) = sockaddr.as_sockaddr_in() {
                return Some(inet.ip().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_ssh_client_ip_takes_first_field() {
        std::env::set_var("SSH_CLIENT", "203.0.113.9 51000 22");
        assert_eq!(ssh_client_ip(), Some("203.0.113.9".to_string()));
        std::env::remove_var("SSH_CLIENT");
        assert_eq!(ssh_client_ip(), None);
    }

    #[test]
    fn test_local_ip_is_not_loopback() {
        if let Some(ip) = local_ip() {
            assert_ne!(ip, "127.0.0.1");
        }
    }
}
