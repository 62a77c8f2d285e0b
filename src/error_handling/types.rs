//! Error type definitions.
//!
//! This module defines the initialization errors and the per-endpoint probe
//! failures captured into each `HostResult`.

use std::time::Duration;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the logger with custom message (e.g., log file creation).
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),

    /// Error building the TLS client configuration.
    #[error("TLS client initialization error: {0}")]
    TlsConfigError(#[from] rustls::Error),

    /// The probe configuration was rejected.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigValidationError),
}

/// Why a single endpoint probe failed.
///
/// Every variant is terminal for its pipeline. Causes from the underlying
/// libraries are kept as text so results stay cheap to clone and render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The connect host could not be resolved to any address.
    #[error("could not resolve host name {host}: {reason}")]
    Resolution {
        /// Name that was looked up
        host: String,
        /// Resolver message
        reason: String,
    },

    /// The TCP connection was refused or otherwise failed.
    #[error("could not connect to {addr} - {host}: {reason}")]
    Connect {
        /// Dialed address
        addr: String,
        /// Connect host the address belongs to
        host: String,
        /// I/O error message
        reason: String,
    },

    /// The TCP connection did not complete in time.
    #[error("connection to {addr} - {host} timed out after {timeout:?}")]
    ConnectTimeout {
        /// Dialed address
        addr: String,
        /// Connect host the address belongs to
        host: String,
        /// Configured bound
        timeout: Duration,
    },

    /// The target name cannot be presented as a TLS server name.
    #[error("invalid TLS server name {name}: {reason}")]
    InvalidServerName {
        /// Rejected target name
        name: String,
        /// Parser message
        reason: String,
    },

    /// The TLS handshake failed.
    #[error("TLS handshake failed for {addr} - {target}: {reason}")]
    Handshake {
        /// Dialed address
        addr: String,
        /// Server name presented via SNI
        target: String,
        /// TLS error message
        reason: String,
    },

    /// The TLS handshake did not complete in time.
    #[error("TLS handshake with {addr} - {target} timed out after {timeout:?}")]
    HandshakeTimeout {
        /// Dialed address
        addr: String,
        /// Server name presented via SNI
        target: String,
        /// Configured bound
        timeout: Duration,
    },

    /// The handshake succeeded but the peer presented no certificate.
    #[error("peer {target} presented no certificates")]
    EmptyChain {
        /// Server name presented via SNI
        target: String,
    },

    /// The leaf certificate could not be decoded.
    #[error("could not parse certificate from {target}: {reason}")]
    Certificate {
        /// Server name presented via SNI
        target: String,
        /// Decoder message
        reason: String,
    },

    /// The probe task ended without producing a result (panic or abort).
    #[error("probe task for {label} failed: {reason}")]
    TaskFailed {
        /// Endpoint label of the lost pipeline
        label: String,
        /// Join error message
        reason: String,
    },
}

/// Coarse classification of probe failures, used for summaries and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ProbeErrorKind {
    /// DNS lookup failed
    Resolution,
    /// TCP connect failed or timed out
    Connect,
    /// TLS handshake failed or timed out
    Handshake,
    /// Handshake succeeded without a certificate chain
    EmptyChain,
    /// Leaf certificate could not be decoded
    Certificate,
    /// Probe task was lost
    Task,
}

impl ProbeError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::Resolution { .. } => ProbeErrorKind::Resolution,
            ProbeError::Connect { .. } | ProbeError::ConnectTimeout { .. } => {
                ProbeErrorKind::Connect
            }
            ProbeError::InvalidServerName { .. }
            | ProbeError::Handshake { .. }
            | ProbeError::HandshakeTimeout { .. } => ProbeErrorKind::Handshake,
            ProbeError::EmptyChain { .. } => ProbeErrorKind::EmptyChain,
            ProbeError::Certificate { .. } => ProbeErrorKind::Certificate,
            ProbeError::TaskFailed { .. } => ProbeErrorKind::Task,
        }
    }

    /// Whether the failure was caused by one of the configured timeouts.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ProbeError::ConnectTimeout { .. } | ProbeError::HandshakeTimeout { .. }
        )
    }
}

impl std::fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProbeErrorKind {
    /// Returns a human-readable string representation of the error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeErrorKind::Resolution => "DNS resolution error",
            ProbeErrorKind::Connect => "TCP connect error",
            ProbeErrorKind::Handshake => "TLS handshake error",
            ProbeErrorKind::EmptyChain => "Empty certificate chain",
            ProbeErrorKind::Certificate => "Certificate parse error",
            ProbeErrorKind::Task => "Probe task error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ProbeErrorKind::Resolution.as_str(), "DNS resolution error");
        assert_eq!(ProbeErrorKind::Connect.as_str(), "TCP connect error");
        assert_eq!(ProbeErrorKind::Handshake.as_str(), "TLS handshake error");
    }

    #[test]
    fn test_all_error_kinds_have_string_representation() {
        for kind in ProbeErrorKind::iter() {
            assert!(!kind.as_str().is_empty(), "{:?} should have non-empty string", kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_timeouts_share_kind_with_their_stage() {
        let connect = ProbeError::ConnectTimeout {
            addr: "10.0.0.1:443".to_string(),
            host: "10.0.0.1".to_string(),
            timeout: Duration::from_secs(2),
        };
        assert_eq!(connect.kind(), ProbeErrorKind::Connect);
        assert!(connect.is_timeout());

        let handshake = ProbeError::HandshakeTimeout {
            addr: "10.0.0.1:443".to_string(),
            target: "example.com".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(handshake.kind(), ProbeErrorKind::Handshake);
        assert!(handshake.is_timeout());
    }

    #[test]
    fn test_invalid_server_name_is_handshake_failure() {
        let err = ProbeError::InvalidServerName {
            name: "bad name".to_string(),
            reason: "invalid dns name".to_string(),
        };
        assert_eq!(err.kind(), ProbeErrorKind::Handshake);
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_error_messages_name_the_endpoint() {
        let err = ProbeError::Connect {
            addr: "127.0.0.1:1".to_string(),
            host: "localhost".to_string(),
            reason: "Connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:1"));
        assert!(msg.contains("localhost"));
        assert!(msg.contains("Connection refused"));
    }
}
