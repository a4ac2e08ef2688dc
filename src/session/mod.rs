/*!
 * Session Loop
 * Read a line, gate it, preflight ssh targets, hand off to the executor
 */

mod ident;

use crate::config::Config;
use crate::exec::{signals, PtyExecutor};
use crate::gate::{self, AllowedCommand};
use crate::preflight::{self, PreflightError, PreflightResult};
use log::{debug, error, info, warn};
use std::io::{self, BufRead, Write};

/// Prompt emitted before every read.
const PROMPT: &str = "secure-shell> ";

/// The interactive read-eval loop. Commands execute strictly serially:
/// no prompt is emitted until the previous child has been reaped.
pub struct Session {
    config: Config,
    executor: PtyExecutor,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let executor = PtyExecutor::new(config.command_timeout);
        info!("Session loop initialized");
        Self { config, executor }
    }

    /// Run until end-of-input, the `exit` builtin, or a cleared running
    /// flag. Errors inside the loop are logged and reported; the loop
    /// continues.
    pub fn run(&self) -> io::Result<()> {
        info!(
            "Operator address: {}",
            ident::ssh_client_ip().unwrap_or_else(|| "unknown".to_string())
        );
        info!(
            "Local address: {}",
            ident::local_ip().unwrap_or_else(|| "unknown".to_string())
        );

        let stdin = io::stdin();
        let mut line = String::new();

        while signals::is_running() {
            print!("{}", PROMPT);
            io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                info!("End of input, leaving session loop");
                break;
            }
            let raw = line.trim_end_matches(['\n', '\r']);
            info!("User input: {}", raw);

            let input = gate::sanitize(raw);
            if input.is_empty() {
                continue;
            }
            if input == "exit" {
                info!("Exiting shell");
                break;
            }

            self.handle_line(&input);
        }
        Ok(())
    }

    /// Bounds, gate, preflight, execute. Every rejection logs at warn
    /// and produces one user-visible line.
    fn handle_line(&self, input: &str) {
        let tokens =
            match gate::tokenize(input, self.config.max_args, self.config.max_arg_length) {
                Ok(tokens) => tokens,
                Err(e) => {
                    warn!("{}", e);
                    eprintln!("{}", e.diagnostic());
                    return;
                }
            };
        if tokens.is_empty() {
            return;
        }

        let invocation = match gate::admit(tokens, self.config.max_arg_length) {
            Ok(invocation) => invocation,
            Err(e) => {
                eprintln!("{}", e.diagnostic());
                return;
            }
        };

        if invocation.verb == AllowedCommand::Ssh {
            if let Err(e) = self.ssh_preflight(&invocation.args) {
                debug!("Preflight refused ssh invocation: {}", e);
                return;
            }
        }

        info!("Executing command: {}", invocation.command_line());
        match self.executor.execute(invocation.verb.name(), &invocation.args) {
            Ok(outcome) if outcome.success() => debug!("Command finished: {:?}", outcome),
            Ok(outcome) => info!("Command finished: {:?}", outcome),
            Err(e) => {
                error!("Error executing command: {}", e);
                eprintln!("Error executing command: {}", e);
            }
        }
    }

    /// Ordered ssh preflight: hostname validity, reachability, port,
    /// host key. Each negative prompt answer aborts without advancing.
    /// All user-visible diagnostics are printed here.
    fn ssh_preflight(&self, args: &[String]) -> PreflightResult<()> {
        let host = match preflight::ssh_target(args) {
            Some(host) => host,
            None => {
                warn!("No ssh target in argument list");
                eprintln!("Error: Invalid hostname or IP address.");
                return Err(PreflightError::InvalidHostname(String::new()));
            }
        };
        if !preflight::is_valid_hostname(&host) {
            warn!("Invalid hostname or IP: {}", host);
            eprintln!("Error: Invalid hostname or IP address.");
            return Err(PreflightError::InvalidHostname(host));
        }

        let port = match preflight::ssh_port(args) {
            Ok(port) => port,
            Err(e) => {
                warn!("{}", e);
                eprintln!("Error: Invalid ssh port.");
                return Err(e);
            }
        };

        if !preflight::ping_host(&host) {
            eprintln!("Warning: Host {} is not responding to ping.", host);
            if !confirm("Do you want to continue? (yes/no): ") {
                info!(
                    "SSH connection aborted by user for non-responsive host: {}",
                    host
                );
                return Err(PreflightError::Aborted {
                    host,
                    stage: "reachability",
                });
            }
        }

        if !preflight::is_port_open(&host, port) {
            eprintln!("Warning: SSH port {} is not open on host {}.", port, host);
            if !confirm("Do you want to continue? (yes/no): ") {
                info!(
                    "SSH connection aborted by user for closed port on host: {}",
                    host
                );
                return Err(PreflightError::Aborted { host, stage: "port" });
            }
        }

        if !preflight::is_known_host(&host) {
            println!(
                "Warning: The host key for {} is not found or has changed.",
                host
            );
            println!("The authenticity of host '{}' can't be established.", host);
            if !confirm("Are you sure you want to continue connecting (yes/no)? ") {
                info!("SSH connection aborted by user for host: {}", host);
                eprintln!("Error: Connection aborted by the user.");
                return Err(PreflightError::Aborted {
                    host,
                    stage: "host key",
                });
            }
            if let Err(e) = preflight::acquire_host_key(&host) {
                error!("Unable to add SSH host key for {}: {}", host, e);
                eprintln!("Error: Unable to add the host key for {}.", host);
                return Err(e.into());
            }
        }

        Ok(())
    }
}

/// Ask a yes/no question; only the literal `yes` proceeds.
fn confirm(question: &str) -> bool {
    print!("{}", question);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut response = String::new();
    match io::stdin().lock().read_line(&mut response) {
        Ok(0) | Err(_) => false,
        Ok(_) => response.trim_end_matches(['\n', '\r']) == "yes",
    }
}
