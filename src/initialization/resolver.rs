//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_ATTEMPTS;
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver for connect-host lookups.
///
/// Uses the system configuration (`/etc/resolv.conf` and the hosts file) when
/// it can be read, falling back to the default public resolvers otherwise.
/// Either way the per-query timeout is `timeout` with a small, fixed number of
/// attempts so that an unresolvable name fails in bounded time.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the timeout is zero.
pub fn init_resolver(timeout: Duration) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    if timeout.is_zero() {
        return Err(InitializationError::DnsResolverError(
            "DNS timeout must be greater than 0".to_string(),
        ));
    }

    let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            log::warn!("Could not read system DNS configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };
    opts.timeout = timeout;
    opts.attempts = DNS_ATTEMPTS;

    Ok(Arc::new(TokioAsyncResolver::tokio(config, opts)))
}
