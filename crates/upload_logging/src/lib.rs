#![deny(missing_docs)]
//! Shared logging utilities for the upload workspace.
//!
//! This crate provides the `upload_*` logging macros used across the codebase,
//! the application logger setup and a minimal test initializer for the global
//! logger.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use thiserror::Error;

/// Default log file, relative to the current working directory.
pub const DEFAULT_LOG_FILE: &str = "./upload.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! upload_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! upload_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! upload_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! upload_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! upload_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogDestination {
    /// Write to a log file.
    File,
    /// Write to terminal (stderr/stdout, mixed mode).
    #[default]
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Returned when a log destination name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log destination '{0}' (expected terminal, file or both)")]
pub struct UnknownDestination(String);

impl FromStr for LogDestination {
    type Err = UnknownDestination;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "terminal" | "term" => Ok(Self::Terminal),
            "both" => Ok(Self::Both),
            _ => Err(UnknownDestination(s.to_string())),
        }
    }
}

/// Initialize the global logger.
///
/// For `LogDestination::File` or `Both`, creates (truncates) `log_file`.
/// If the file cannot be created the terminal logger is still installed
/// when requested. Safe to call more than once; later calls are ignored.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_file: &Path) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(level, config, log_file) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

/// Default log file location as a path.
pub fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_parses_known_names() {
        assert_eq!("file".parse(), Ok(LogDestination::File));
        assert_eq!(" Terminal ".parse(), Ok(LogDestination::Terminal));
        assert_eq!("BOTH".parse(), Ok(LogDestination::Both));
        assert!("syslog".parse::<LogDestination>().is_err());
    }

    #[test]
    fn unknown_destination_names_the_choices() {
        let err = "syslog".parse::<LogDestination>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown log destination 'syslog' (expected terminal, file or both)"
        );
    }

    #[test]
    fn file_logger_creates_log_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("upload.log");
        let logger = create_file_logger(LevelFilter::Info, build_config(), &path);
        assert!(logger.is_some());
        assert!(path.exists());
    }

    #[test]
    fn file_logger_reports_missing_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("missing").join("upload.log");
        assert!(create_file_logger(LevelFilter::Info, build_config(), &path).is_none());
    }

    #[test]
    fn repeated_test_initialization_is_harmless() {
        initialize_for_tests();
        initialize_for_tests();
        upload_info!("logger initialized twice");
    }
}
