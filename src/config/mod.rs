//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, default port)
//! - The library-level `ProbeConfig`
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{ConfigValidationError, LogFormat, LogLevel, Opt, OutputFormat, ProbeConfig};
