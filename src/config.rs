/*!
 * Configuration
 * INI-style settings loaded once at startup, immutable afterwards
 */

use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file consulted when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/secure_shell.conf";

const DEFAULT_MAX_ARGS: usize = 10;
const DEFAULT_MAX_ARG_LENGTH: usize = 100;
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILE: &str = "/var/log/secure_shell.log";
const DEFAULT_LOG_ROTATE_SIZE: u64 = 1_048_576;

/// Configuration errors (fatal at startup)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Immutable runtime settings, from the `[Settings]` section.
///
/// Every key has a default; a present but unparsable or non-positive
/// value is an error rather than a silent fallback.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_args: usize,
    pub max_arg_length: usize,
    pub command_timeout: Duration,
    pub log_file: PathBuf,
    pub log_rotate_size: u64,
}

impl Config {
    /// Load settings from an INI file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = ini.section(Some("Settings"));
        let lookup = |key: &'static str| settings.and_then(|s| s.get(key));

        let max_args = parse_positive(lookup("MaxArgs"), "MaxArgs", DEFAULT_MAX_ARGS)?;
        let max_arg_length =
            parse_positive(lookup("MaxArgLength"), "MaxArgLength", DEFAULT_MAX_ARG_LENGTH)?;
        let timeout_secs = parse_positive(
            lookup("CommandTimeout"),
            "CommandTimeout",
            DEFAULT_COMMAND_TIMEOUT_SECS,
        )?;
        let log_rotate_size = parse_positive(
            lookup("LogRotateSize"),
            "LogRotateSize",
            DEFAULT_LOG_ROTATE_SIZE,
        )?;
        let log_file = lookup("LogFile")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            max_args,
            max_arg_length,
            command_timeout: Duration::from_secs(timeout_secs),
            log_file,
            log_rotate_size,
        })
    }

    /// Longest sanitized input line accepted by the tokenizer.
    pub fn max_input_length(&self) -> usize {
        self.max_args * self.max_arg_length
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_args: DEFAULT_MAX_ARGS,
            max_arg_length: DEFAULT_MAX_ARG_LENGTH,
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_rotate_size: DEFAULT_LOG_ROTATE_SIZE,
        }
    }
}

fn parse_positive<T>(
    raw: Option<&str>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    match raw {
        None => Ok(default),
        Some(text) => {
            let value: T = text.parse().map_err(|_| ConfigError::InvalidValue {
                key,
                value: text.to_string(),
            })?;
            if value < T::from(1u8) {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: text.to_string(),
                });
            }
            Ok(value)
        }
    }
}
