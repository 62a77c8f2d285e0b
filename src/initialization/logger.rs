//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting
//! and a selectable destination.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use env_logger::{Target, WriteStyle};
use log::LevelFilter;

/// Where diagnostic log output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard output (verbose mode)
    Stdout,
    /// Append to a file, creating it if needed
    File(PathBuf),
    /// Drop all output
    Discard,
}

impl LogTarget {
    /// Picks the destination from the CLI flags: verbose wins over a log file,
    /// and with neither the output is discarded.
    pub fn from_flags(verbose: bool, logfile: Option<PathBuf>) -> Self {
        match (verbose, logfile) {
            (true, _) => LogTarget::Stdout,
            (false, Some(path)) => LogTarget::File(path),
            (false, None) => LogTarget::Discard,
        }
    }
}

/// Initializes the logger with the specified level, format and destination.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors when writing to a terminal) and JSON formats for structured
/// logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
/// * `target` - Log destination
///
/// # Errors
///
/// Returns `InitializationError::LoggerSetupError` if the log file cannot be
/// opened and `InitializationError::LoggerError` if a logger is already set.
///
/// # Examples
///
/// ```bash
/// # Diagnostics on stdout
/// cert_status -d example.com -v
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=cert_status=debug,rustls=info cert_status -d example.com -v
/// ```
pub fn init_logger_with(
    level: LevelFilter,
    format: LogFormat,
    target: LogTarget,
) -> Result<(), InitializationError> {
    let colorize = target == LogTarget::Stdout;
    colored::control::set_override(colorize);

    // Read from RUST_LOG environment variable first, then override with CLI arg
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("rustls", LevelFilter::Warn);
    // Truncated or malformed UDP answers are retried internally by hickory
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("cert_status", level);

    match target {
        LogTarget::Stdout => {
            builder.target(Target::Stdout);
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    InitializationError::LoggerSetupError(format!(
                        "error opening file {}: {e}",
                        path.display()
                    ))
                })?;
            builder.target(Target::Pipe(Box::new(file)));
            builder.write_style(WriteStyle::Never);
        }
        LogTarget::Discard => {
            builder.target(Target::Pipe(Box::new(std::io::sink())));
            builder.write_style(WriteStyle::Never);
        }
    }

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%Y/%m/%d %H:%M:%S"),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() instead of init(): tests may initialize more than once
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
