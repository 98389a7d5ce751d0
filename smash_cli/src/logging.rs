// smash_cli/src/logging.rs
#![forbid(unsafe_code)]

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle, detailed_format};

/// Start the logger on stderr (stdout carries the move protocol).
///
/// `RUST_LOG` overrides `level` when set. Keep the handle alive for the whole run.
pub fn setup_logging(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(detailed_format)
        .start()
}
