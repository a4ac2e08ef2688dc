/*!
 * Gate Types
 * Admitted commands, invocations, and rejection reasons
 */

use thiserror::Error;

/// Gate operation result
pub type GateResult<T> = Result<T, GateError>;

/// Input rejected before any child process is created
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("input too long: {length} > {limit}")]
    InputTooLong { length: usize, limit: usize },

    #[error("too many arguments: {count} > {limit}")]
    TooManyArguments { count: usize, limit: usize },

    #[error("command not allowed: {0}")]
    CommandNotAllowed(String),

    #[error("invalid or unsafe argument for {verb}: {arg}")]
    UnsafeArgument { verb: &'static str, arg: String },
}

impl GateError {
    /// The one-line diagnostic shown to the operator on stderr.
    pub fn diagnostic(&self) -> &'static str {
        match self {
            GateError::InputTooLong { .. } => "Error: Input too long.",
            GateError::TooManyArguments { .. } => "Error: Too many arguments.",
            GateError::CommandNotAllowed(_) => "Error: Command not allowed.",
            GateError::UnsafeArgument { .. } => "Error: Invalid or unsafe arguments.",
        }
    }
}

/// The fixed set of permitted verbs. Extending it is a code change,
/// not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedCommand {
    Ping,
    Tracepath,
    Ssh,
}

impl AllowedCommand {
    /// Look up a verb; `None` for anything outside the allow-list.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "ping" => Some(AllowedCommand::Ping),
            "tracepath" => Some(AllowedCommand::Tracepath),
            "ssh" => Some(AllowedCommand::Ssh),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AllowedCommand::Ping => "ping",
            AllowedCommand::Tracepath => "tracepath",
            AllowedCommand::Ssh => "ssh",
        }
    }
}

/// A verb plus arguments that passed the per-verb grammar and the
/// length bound. Constructed only by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub verb: AllowedCommand,
    pub args: Vec<String>,
}

impl Invocation {
    /// `verb arg1 arg2 ...` for audit logging.
    pub fn command_line(&self) -> String {
        let mut line = self.verb.name().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
