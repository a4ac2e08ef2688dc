/*!
 * Verb Allow-List & Argument Grammars
 * Deny-by-default matching of each argument against its verb's pattern
 */

use super::types::{AllowedCommand, GateError, GateResult, Invocation};
use log::warn;
use regex::Regex;
use std::sync::OnceLock;

/// Ssh options that open local, remote, or dynamic port forwarding.
/// Any argument beginning with one of these is rejected outright.
const FORBIDDEN_SSH_PREFIXES: [&str; 3] = ["-L", "-R", "-D"];

fn ping_arg() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(-[cwW]\s*\d+|-[fnqv]|\d{1,3}(\.\d{1,3}){3}|[A-Za-z0-9.\-]+)$").unwrap()
    })
}

fn tracepath_arg() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(-[nl]\s*\d+|-[bfhm]|\d{1,3}(\.\d{1,3}){3}|[A-Za-z0-9.\-]+)$").unwrap()
    })
}

fn ssh_arg() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(-[1246AaCfGgKkMNnqsTtVvXxYy]|-[bceiJlmOopQRSWw]\s*\w+|[A-Za-z0-9._\-]+@?[A-Za-z0-9.\-]+)$",
        )
        .unwrap()
    })
}

fn is_safe_argument(verb: AllowedCommand, arg: &str) -> bool {
    match verb {
        AllowedCommand::Ping => ping_arg().is_match(arg),
        AllowedCommand::Tracepath => tracepath_arg().is_match(arg),
        AllowedCommand::Ssh => {
            if FORBIDDEN_SSH_PREFIXES
                .iter()
                .any(|prefix| arg.starts_with(prefix))
            {
                return false;
            }
            ssh_arg().is_match(arg)
        }
    }
}

/// Admit a tokenized line: the first token must be an allowed verb and
/// every remaining token must satisfy that verb's grammar and the length
/// bound. Any failure rejects the entire invocation; nothing executes.
pub fn admit(tokens: Vec<String>, max_arg_length: usize) -> GateResult<Invocation> {
    let mut tokens = tokens;
    if tokens.is_empty() {
        return Err(GateError::CommandNotAllowed(String::new()));
    }
    let verb_token = tokens.remove(0);

    let verb = AllowedCommand::from_verb(&verb_token).ok_or_else(|| {
        warn!("Command not allowed: {}", verb_token);
        GateError::CommandNotAllowed(verb_token.clone())
    })?;

    for arg in &tokens {
        if arg.len() > max_arg_length || !is_safe_argument(verb, arg) {
            warn!("Invalid or unsafe argument for {}: {}", verb.name(), arg);
            return Err(GateError::UnsafeArgument {
                verb: verb.name(),
                arg: arg.clone(),
            });
        }
    }

    Ok(Invocation { verb, args: tokens })
}
