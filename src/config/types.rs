//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and probe configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DNS_TIMEOUT_SECS, TCP_CONNECT_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How probe results are printed by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Days until expiry only (`label - days` when probing several endpoints)
    Lines,
    /// ASCII table with issuer, TLS version, query time and errors
    Table,
    /// JSON array of results
    Json,
}

/// Library configuration for the probing engine (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use cert_status::ProbeConfig;
/// use std::time::Duration;
///
/// let config = ProbeConfig {
///     handshake_timeout: Some(Duration::from_secs(5)),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Bound on the TCP connect of each probe
    pub connect_timeout: Duration,

    /// Optional bound on the TLS handshake (unbounded when `None`)
    pub handshake_timeout: Option<Duration>,

    /// Per-query DNS timeout
    pub dns_timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
            handshake_timeout: None,
            dns_timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
        }
    }
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What a valid value looks like
    pub message: String,
}

impl ProbeConfig {
    /// Checks that every timeout is usable.
    ///
    /// # Errors
    ///
    /// Returns the first field holding a zero duration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.connect_timeout.is_zero() {
            return Err(ConfigValidationError {
                field: "connect_timeout",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.dns_timeout.is_zero() {
            return Err(ConfigValidationError {
                field: "dns_timeout",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.handshake_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigValidationError {
                field: "handshake_timeout",
                message: "must be greater than 0 when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Days until expiry for one endpoint
/// cert_status -d example.com
///
/// # Table of several endpoints, one probed through a load balancer address
/// cert_status -d www.rust-lang.org,example.com:8443,shop.example.com:443:10.10.222.2 -t
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "cert_status",
    version,
    about = "A TLS certificate checker for expiration",
    long_about = "Connects to each endpoint, performs a TLS handshake and reports the \
certificate expiry.\n\nEach endpoint is `domain[:port[:host]]`. Without a port 443 is \
assumed, without a host the domain itself is resolved and dialed."
)]
pub struct Opt {
    /// Endpoints (domain:port:host) separated by ","
    /// Ex.: www.google.com.br:443,example.com:443,manage.openshift.com:443:10.10.222.2
    #[arg(
        short,
        long,
        value_delimiter = ',',
        required = true,
        num_args = 1..,
        env = "CERT_STATUS_DOMAINS"
    )]
    pub domains: Vec<String>,

    /// Display results in a table (same as --format table)
    #[arg(short = 't', long)]
    pub displaytable: bool,

    /// Output format: lines|table|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,

    /// Print results in input order instead of completion order
    #[arg(long)]
    pub sort: bool,

    /// Verbose output: log to stdout
    #[arg(short, long)]
    pub verbose: bool,

    /// Append log output to this file
    #[arg(short, long, env = "CERT_STATUS_LOGFILE")]
    pub logfile: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// TCP connect timeout in seconds
    #[arg(long, default_value_t = TCP_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,

    /// TLS handshake timeout in seconds (unbounded when omitted)
    #[arg(long)]
    pub handshake_timeout_secs: Option<u64>,

    /// DNS query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_secs: u64,
}

impl Opt {
    /// Output format after applying the `-t` shorthand.
    pub fn output_format(&self) -> OutputFormat {
        if self.displaytable {
            OutputFormat::Table
        } else {
            self.format
        }
    }
}

impl From<&Opt> for ProbeConfig {
    fn from(opt: &Opt) -> Self {
        Self {
            connect_timeout: Duration::from_secs(opt.connect_timeout_secs),
            handshake_timeout: opt.handshake_timeout_secs.map(Duration::from_secs),
            dns_timeout: Duration::from_secs(opt.dns_timeout_secs),
        }
    }
}
