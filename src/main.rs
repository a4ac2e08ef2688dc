/*!
 * Secure Shell - Main Entry Point
 *
 * Restricted interactive shell that exposes only vetted
 * network-diagnostic and remote-login commands:
 * - Command gating with per-verb argument grammars
 * - Ssh preflight (reachability, port, host key)
 * - PTY execution with timeout and signal forwarding
 * - Capability narrowing and kernel resource limits
 */

use log::{error, info};
use secure_shell::config::{Config, DEFAULT_CONFIG_PATH};
use secure_shell::exec::signals;
use secure_shell::{logging, sandbox, Session};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _logger = match logging::init(&config) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Secure shell started with config file: {}",
        config_path.display()
    );
    info!(
        "Configuration loaded: max_args={}, max_arg_length={}, command_timeout={}s",
        config.max_args,
        config.max_arg_length,
        config.command_timeout.as_secs()
    );

    if let Err(e) = signals::install_handlers() {
        return fatal(&e.to_string());
    }
    info!("Signal handlers installed");

    if let Err(e) = sandbox::bootstrap() {
        return fatal(&e.to_string());
    }
    info!("Sandbox bootstrap complete");

    let session = Session::new(config);
    if let Err(e) = session.run() {
        return fatal(&e.to_string());
    }

    info!("Secure shell ended");
    ExitCode::SUCCESS
}

/// Terminal error: clear the running flag, log, report, exit 1.
fn fatal(message: &str) -> ExitCode {
    signals::clear_running();
    error!("Fatal error: {}", message);
    eprintln!("Fatal error: {}", message);
    ExitCode::FAILURE
}
