//! cert_status library: concurrent TLS certificate probing
//!
//! Connects to a list of TLS endpoints in parallel, performs a handshake with
//! each, and reports the days until the leaf certificate expires together with
//! the issuing organization, the negotiated protocol version and the DNS names
//! the certificate covers.
//!
//! Certificates are inspected, never trust-validated: expired, self-signed and
//! mismatched certificates are all reported rather than rejected.
//!
//! # Example
//!
//! ```no_run
//! use cert_status::{check_hosts, ProbeConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! cert_status::initialization::init_crypto_provider();
//! let results = check_hosts(&ProbeConfig::default(), ["example.com", "example.org:443"]).await?;
//! for result in &results {
//!     match &result.error {
//!         None => println!("{} expires in {} days", result.host, result.expire_days),
//!         Some(e) => println!("{} failed: {e}", result.host),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
mod dns;
pub mod domain;
mod endpoint;
mod error_handling;
pub mod initialization;
mod models;
pub mod observer;
pub mod output;
mod run;
mod tls;

// Re-export public API
pub use config::{LogFormat, LogLevel, Opt, OutputFormat, ProbeConfig};
pub use endpoint::EndpointSpec;
pub use error_handling::{InitializationError, ProbeError, ProbeErrorKind};
pub use models::{CertificateSummary, HostResult};
pub use observer::{ChainPosition, LogObserver, NullObserver, PipelineStage, ProbeObserver};
pub use run::{check_host, check_hosts, check_hosts_parallel, ProbeContext};
pub use tls::{
    extract_issuer_info, extract_leaf_info, interpret_chain, tls_version_label,
    HandshakeSnapshot, LeafInfo, NegotiatedProtocol, TlsProber,
};
