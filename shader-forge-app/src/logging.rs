//! Logging setup for the application.

use crate::config::{AppConfig, LogLevel};
use env_logger::{Builder, Env};

/// Initializes the logger.
///
/// `RUST_LOG` takes precedence when set; otherwise `config.log_level` applies to
/// every module.
pub fn init_logger(config: &AppConfig) {
    let default_filter = match config.log_level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    };

    let env = Env::default().default_filter_or(default_filter);
    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None);

    // A logger may already be installed when running embedded in another tool.
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
        return;
    }

    log::debug!("Logger initialized with default level {:?}", config.log_level);
}
