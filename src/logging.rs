use log::{error, info, log_enabled, Level};

/// Initializes the logger with the `env_logger` crate.
///
/// Panics if a logger is already installed; use [`try_init_logger`] from
/// library hosts that may have set up their own.
pub fn init_logger() {
    env_logger::init();
}

/// Initializes `env_logger`, returning `false` if a logger was already set.
pub fn try_init_logger() -> bool {
    env_logger::try_init().is_ok()
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}
