//! Negotiated protocol version labels.

use rustls::ProtocolVersion;
use serde::Serialize;

/// Negotiated protocol as a raw minor version plus session-resumption token.
///
/// Some TLS stacks report 1.2 and 1.3 with the same raw value and only differ
/// in whether a classic resumption token (`tls-unique`) exists. rustls reports
/// the version directly; this type maps it onto that pair so the labels stay
/// identical whichever way the version was learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NegotiatedProtocol {
    /// 0 = SSL 3.0, 1 = TLS 1.0, 2 = TLS 1.1, 3 = TLS 1.2 or 1.3
    pub raw_version: u8,
    /// Whether the session carries a classic resumption token
    pub resumption_token: bool,
}

impl NegotiatedProtocol {
    /// Maps a rustls protocol version, `None` for anything that is not SSL/TLS.
    pub fn from_rustls(version: ProtocolVersion) -> Option<Self> {
        let (raw_version, resumption_token) = match version {
            ProtocolVersion::SSLv3 => (0, true),
            ProtocolVersion::TLSv1_0 => (1, true),
            ProtocolVersion::TLSv1_1 => (2, true),
            ProtocolVersion::TLSv1_2 => (3, true),
            ProtocolVersion::TLSv1_3 => (3, false),
            _ => return None,
        };
        Some(Self {
            raw_version,
            resumption_token,
        })
    }

    /// Display label, e.g. "TLS v1.3". Empty for unknown raw versions.
    pub fn label(&self) -> &'static str {
        tls_version_label(self.raw_version, self.resumption_token).unwrap_or_default()
    }
}

/// Maps a raw version and resumption-token flag to its label.
///
/// Raw version 3 means TLS 1.2 when a resumption token is present and TLS 1.3
/// when it is absent.
pub fn tls_version_label(raw_version: u8, resumption_token: bool) -> Option<&'static str> {
    match raw_version {
        0 => Some("SSL v3"),
        1 => Some("TLS v1.0"),
        2 => Some("TLS v1.1"),
        3 if resumption_token => Some("TLS v1.2"),
        3 => Some("TLS v1.3"),
        _ => None,
    }
}
