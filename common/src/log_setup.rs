use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Starts the process-wide logger.
///
/// `base_level` is a `log` filter spec such as `"info"` or
/// `"greyscale=debug,warn"`; `RUST_LOG` takes precedence when set.
/// Everything goes to stderr, leaving stdout for program output.
///
/// The returned handle must be kept alive for as long as logging is needed.
pub fn setup_logging(base_level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(base_level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}
