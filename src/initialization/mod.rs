//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger (level, format, destination)
//! - DNS resolver
//! - TLS crypto provider
//!
//! All initialization functions return proper error types for error handling.

mod logger;
mod resolver;

use std::sync::Arc;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use logger::{init_logger_with, LogTarget};
pub use resolver::init_resolver;

/// Initializes the process-wide crypto provider for TLS operations.
///
/// Probes build their client configuration from an explicit provider, so this
/// only matters for other rustls users in the same process.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}

/// The crypto provider handed to every probe's TLS configuration.
pub fn probe_crypto_provider() -> Arc<CryptoProvider> {
    Arc::new(default_provider())
}
