/*!
 * Log Sink
 * Rotating file logger behind the `log` facade
 */

use crate::config::Config;
use flexi_logger::{Cleanup, Criterion, DeferredNow, FileSpec, Logger, LoggerHandle, Naming};
use thiserror::Error;

/// Rotated generations kept on disk.
const KEPT_LOG_FILES: usize = 3;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logger setup failed: {0}")]
    Setup(#[from] flexi_logger::FlexiLoggerError),
}

/// Line format: `[YYYY-MM-DD HH:MM:SS.mmm] [LEVEL] message`.
fn line_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.args()
    )
}

/// Initialize the rotating file sink.
///
/// The returned handle must stay alive for the process lifetime; dropping
/// it shuts the sink down.
pub fn init(config: &Config) -> Result<LoggerHandle, LoggingError> {
    let spec = FileSpec::try_from(&config.log_file)?;
    let handle = Logger::try_with_str("info")?
        .log_to_file(spec)
        .rotate(
            Criterion::Size(config.log_rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .format(line_format)
        .start()?;
    Ok(handle)
}
