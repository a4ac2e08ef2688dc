/*!
 * Network Probes
 * Hostname resolution, ICMP echo via the external ping, TCP connect probe
 */

use log::{error, info, warn};
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::socket::{connect, getsockopt, socket, sockopt, AddressFamily, SockFlag,
                       SockType, SockaddrStorage};
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::os::fd::{AsFd, AsRawFd};
use std::process::{Command, Stdio};

/// Both probes give up after this long.
const PROBE_TIMEOUT_SECS: u16 = 5;

/// A hostname is valid when it parses as a dotted-quad IPv4 literal or
/// the system resolver returns at least one address for it (any family,
/// stream hint). Resolver errors make the hostname invalid.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.parse::<Ipv4Addr>().is_ok() {
        return true;
    }
    match (hostname, 0u16).to_socket_addrs() {
        Ok(mut addrs) => addrs.next().is_some(),
        Err(_) => false,
    }
}

/// Reachability probe: one echo request with a five-second deadline,
/// delegated to the external `ping` utility. Exit code zero means
/// reachable; anything else (including a missing binary) means not.
pub fn ping_host(hostname: &str) -> bool {
    info!("Probing reachability of {} via ping", hostname);
    let deadline = PROBE_TIMEOUT_SECS.to_string();
    let status = Command::new("ping")
        .args(["-c", "1", "-W", deadline.as_str(), hostname])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => {
            info!("Host {} is reachable", hostname);
            true
        }
        Ok(status) => {
            warn!("Host {} is not reachable (ping exited {})", hostname, status);
            false
        }
        Err(e) => {
            error!("Failed to run ping for {}: {}", hostname, e);
            false
        }
    }
}

/// TCP connect probe with a non-blocking socket: immediate success or
/// `EINPROGRESS` followed by writability within five seconds and a clean
/// `SO_ERROR` means open. The socket is closed on every path.
pub fn is_port_open(hostname: &str, port: u16) -> bool {
    let addr = match (hostname, port).to_socket_addrs() {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => addr,
            None => {
                error!("No addresses resolved for {}:{}", hostname, port);
                return false;
            }
        },
        Err(e) => {
            error!("Resolution failed for {}:{}: {}", hostname, port, e);
            return false;
        }
    };

    let family = match addr {
        SocketAddr::V4(_) => AddressFamily::Inet,
        SocketAddr::V6(_) => AddressFamily::Inet6,
    };

    let fd = match socket(family, SockType::Stream, SockFlag::SOCK_NONBLOCK, None) {
        Ok(fd) => fd,
        Err(e) => {
            error!("Socket creation failed for {}: {}", hostname, e);
            return false;
        }
    };

    let open = match connect(fd.as_raw_fd(), &SockaddrStorage::from(addr)) {
        Ok(()) => true,
        Err(Errno::EINPROGRESS) => {
            let mut fds = [PollFd::new(fd.as_fd(), PollFlags::POLLOUT)];
            match poll(&mut fds, PollTimeout::from(PROBE_TIMEOUT_SECS * 1000)) {
                Ok(1) => matches!(getsockopt(&fd, sockopt::SocketError), Ok(0)),
                _ => false,
            }
        }
        Err(_) => false,
    };

    if open {
        info!("Port {} is open on host {}", port, hostname);
    } else {
        warn!("Port {} is closed on host {}", port, hostname);
    }
    open
}
