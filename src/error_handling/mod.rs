//! Error handling.
//!
//! This module provides:
//! - Initialization errors (logger, resolver, TLS configuration)
//! - Per-endpoint probe failures and their coarse classification
//!
//! Probe failures never abort a run: each one is captured in the `HostResult`
//! of the endpoint that produced it.

mod types;

// Re-export public API
pub use types::{InitializationError, ProbeError, ProbeErrorKind};
