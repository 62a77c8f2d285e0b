//! DNS resolution.
//!
//! Resolves the connect host of an endpoint using `hickory-resolver`. The
//! resolver itself is built once in `initialization::init_resolver` and shared
//! by every probe.

mod resolution;

// Re-export public API
pub use resolution::resolve_connect_host;
