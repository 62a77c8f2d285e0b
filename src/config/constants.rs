//! Configuration constants.
//!
//! Timeouts and defaults used when a probe is configured without explicit values.

/// Port probed when a descriptor carries no (or an unparseable) port field.
pub const DEFAULT_PORT: u16 = 443;

/// Sentinel stored in `HostResult::expire_days` when no certificate was read.
pub const EXPIRE_DAYS_UNKNOWN: i64 = -1;

// Network operation timeouts
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 2;
/// DNS query timeout in seconds
/// Most lookups complete in well under a second; 3s fails fast on dead resolvers.
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// DNS query attempts per name server before giving up
pub const DNS_ATTEMPTS: usize = 2;
