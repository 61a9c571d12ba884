#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! This crate provides the `poll_*` logging macros used across the codebase
//! and minimal initializers for the global logger, one for the application
//! binary and one for unit tests.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! poll_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! poll_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! poll_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! poll_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! poll_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a terminal logger for the application binary.
///
/// Fails if a logger was already installed; the binary calls this exactly
/// once at startup.
pub fn initialize(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = initialize(level);
}
