/*!
 * Command gate closure properties and end-to-end rejection scenarios
 */

use pretty_assertions::assert_eq;
use secure_shell::gate::{admit, sanitize, tokenize, AllowedCommand, GateError};

fn gate(line: &str) -> Result<secure_shell::gate::Invocation, GateError> {
    let sanitized = sanitize(line);
    let tokens = tokenize(&sanitized, 10, 100)?;
    admit(tokens, 100)
}

#[test]
fn test_whitelist_closure() {
    // Whitelist closure: no verb outside the fixed set is ever admitted
    let verbs = [
        "rm", "ls", "cat", "bash", "sh", "nc", "curl", "wget", "python", "sudo", "scp", "sftp",
        "telnet", "PING", "Ssh", "pings", "ssh2",
    ];
    for verb in verbs {
        let result = gate(&format!("{} anything", verb));
        assert!(
            matches!(result, Err(GateError::CommandNotAllowed(_))),
            "admitted verb: {}",
            verb
        );
    }
}

#[test]
fn test_scenario_destructive_command_is_refused() {
    let result = gate("rm -rf /");
    assert!(matches!(result, Err(GateError::CommandNotAllowed(_))));
}

#[test]
fn test_scenario_port_forwarding_is_refused() {
    // The value of the shell hinges on this one
    let result = gate("ssh -L 8080:x:22 user@1.2.3.4");
    assert!(matches!(result, Err(GateError::UnsafeArgument { .. })));
}

#[test]
fn test_scenario_command_substitution_fails_grammar() {
    // `ping $(whoami)` sanitizes to `ping whoami`; the bare word is a
    // plausible hostname, but the path form never is
    let invocation = gate("ping $(whoami)").unwrap();
    assert_eq!(invocation.args, vec!["whoami"]);

    let result = gate("ping $(cat /etc/shadow)");
    assert!(matches!(result, Err(GateError::UnsafeArgument { .. })));
}

#[test]
fn test_grammar_closure_for_admitted_invocations() {
    let admitted = [
        "ping 8.8.8.8",
        "ping -c4 -W5 host.example.com",
        "tracepath -n3 10.1.2.3",
        "ssh user@host.example.com",
        "ssh -p2222 -C user@10.0.0.1",
    ];
    for line in admitted {
        let invocation = gate(line).unwrap_or_else(|e| panic!("{} rejected: {}", line, e));
        for arg in &invocation.args {
            assert!(arg.len() <= 100);
            assert!(!arg.is_empty());
        }
    }
}

#[test]
fn test_forwarding_prefix_closure() {
    // No port forwarding: every -L/-R/-D argument shape is refused
    for flag in ["-L", "-R", "-D"] {
        for value in ["8080:h:22", "1080", ""] {
            let line = format!("ssh {}{} user@host", flag, value);
            let result = gate(&line);
            assert!(
                matches!(result, Err(GateError::UnsafeArgument { .. })),
                "admitted: {}",
                line
            );
        }
    }
}

#[test]
fn test_verb_is_preserved_in_invocation() {
    assert_eq!(gate("ping localhost").unwrap().verb, AllowedCommand::Ping);
    assert_eq!(
        gate("tracepath localhost").unwrap().verb,
        AllowedCommand::Tracepath
    );
    assert_eq!(gate("ssh user@localhost").unwrap().verb, AllowedCommand::Ssh);
}

#[test]
fn test_overlong_argument_rejects_whole_invocation() {
    let line = format!("ping ok.example.com {}", "h".repeat(101));
    assert!(matches!(gate(&line), Err(GateError::UnsafeArgument { .. })));
}
