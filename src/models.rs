use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::config::EXPIRE_DAYS_UNKNOWN;
use crate::error_handling::ProbeError;

/// Certificate details derived from a successful handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateSummary {
    /// Protocol label such as "TLS v1.3"
    pub tls_version: String,
    /// Whole days until the leaf expires, never negative
    pub expire_days: i64,
    /// Leaf not-after lies before the probe start
    pub expired: bool,
    /// Organization of the issuing certificate, empty if not presented
    pub issuer: String,
    /// SAN DNS names, or the subject common name when the leaf has none
    pub dns_names: Vec<String>,
}

/// Outcome of probing one endpoint.
///
/// Exactly one is produced per input descriptor, whether the probe succeeded
/// or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostResult {
    /// Position of the descriptor in the input
    pub index: usize,
    /// Endpoint label (`target:port:host`)
    pub host: String,
    /// Days until the leaf certificate expires, `-1` when no certificate was read
    pub expire_days: i64,
    /// The leaf certificate had already expired when the probe started
    pub expired: bool,
    /// Why the probe failed, if it did
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<ProbeError>,
    /// Issuer organization
    pub issuer: String,
    /// Negotiated protocol label
    pub tls_version: String,
    /// Wall-clock duration of the whole pipeline
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// DNS names covered by the leaf certificate
    pub dns_names: Vec<String>,
}

impl HostResult {
    /// A result with no certificate data yet.
    pub fn new(index: usize, host: impl Into<String>) -> Self {
        Self {
            index,
            host: host.into(),
            expire_days: EXPIRE_DAYS_UNKNOWN,
            expired: false,
            error: None,
            issuer: String::new(),
            tls_version: String::new(),
            elapsed: Duration::ZERO,
            dns_names: Vec::new(),
        }
    }

    /// A failed result. Certificate fields keep their empty defaults.
    pub fn failed(index: usize, host: impl Into<String>, error: ProbeError) -> Self {
        Self {
            error: Some(error),
            ..Self::new(index, host)
        }
    }

    /// Copies interpreted certificate data into this result.
    pub fn apply_summary(&mut self, summary: CertificateSummary) {
        self.tls_version = summary.tls_version;
        self.expire_days = summary.expire_days;
        self.expired = summary.expired;
        self.issuer = summary.issuer;
        self.dns_names = summary.dns_names;
    }

    /// Whether the probe completed without error.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

fn serialize_error<S: Serializer>(error: &Option<ProbeError>, s: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => s.serialize_some(&e.to_string()),
        None => s.serialize_none(),
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, s: S) -> Result<S::Ok, S::Error> {
    // Saturates after ~584 million years
    s.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
