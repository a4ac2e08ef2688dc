/*!
 * Target extraction, hostname validity, and port override parsing
 */

use secure_shell::preflight::{
    is_valid_hostname, ssh_port, ssh_target, PreflightError, DEFAULT_SSH_PORT,
};

fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

#[test]
fn test_target_is_final_positional_after_last_at() {
    assert_eq!(
        ssh_target(&args("-4 -C admin@gw@edge.example.com")),
        Some("edge.example.com".to_string())
    );
    assert_eq!(
        ssh_target(&args("backup.example.com")),
        Some("backup.example.com".to_string())
    );
    assert_eq!(ssh_target(&args("-p2222 user@10.0.0.7")), Some("10.0.0.7".to_string()));
}

#[test]
fn test_target_requires_a_positional() {
    assert_eq!(ssh_target(&args("-4 -A -C")), None);
    assert_eq!(ssh_target(&[]), None);
}

#[test]
fn test_default_port_when_no_override() {
    assert_eq!(ssh_port(&args("user@host")).unwrap(), DEFAULT_SSH_PORT);
}

#[test]
fn test_port_override_forms() {
    assert_eq!(ssh_port(&args("-p2200 user@host")).unwrap(), 2200);
    assert_eq!(ssh_port(&args("-p 2200 user@host")).unwrap(), 2200);
}

#[test]
fn test_malformed_port_refuses_the_invocation() {
    for line in ["-pnope host", "-p0 host", "-p70000 host", "host -p"] {
        assert!(
            matches!(ssh_port(&args(line)), Err(PreflightError::InvalidPort(_))),
            "accepted: {}",
            line
        );
    }
}

#[test]
fn test_ipv4_literals_are_valid_hostnames() {
    assert!(is_valid_hostname("192.0.2.1"));
    assert!(is_valid_hostname("10.0.0.1"));
}

#[test]
fn test_scenario_unresolvable_host_is_invalid() {
    // `ssh user@unresolvable.invalid` must be refused before any child
    // is created
    assert!(!is_valid_hostname("unresolvable.invalid"));
}
