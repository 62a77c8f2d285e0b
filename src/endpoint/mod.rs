//! Endpoint descriptor parsing.
//!
//! A descriptor names one endpoint to probe as `target[:port[:host]]`:
//! - `target` is the TLS server name (SNI) and the certificate we expect back
//! - `port` defaults to 443
//! - `host` is what actually gets resolved and dialed, defaulting to `target`
//!
//! Parsing never fails. A port field that is not a non-negative integer
//! silently falls back to 443, so `example.com:https` probes port 443. A number
//! that is too large for a TCP port (`example.com:70000`) is kept as written and
//! fails when dialed.

use std::fmt;

use serde::Serialize;

use crate::config::DEFAULT_PORT;

/// A parsed endpoint descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EndpointSpec {
    /// Server name presented via SNI
    pub target_name: String,
    /// Port to dial, as written; values above 65535 cannot be connected to
    pub port: u64,
    /// Name or address resolved and dialed
    pub connect_host: String,
}

impl EndpointSpec {
    /// Parses a `target[:port[:host]]` descriptor.
    ///
    /// Fields beyond the third are ignored.
    pub fn parse(descriptor: &str) -> Self {
        let mut fields = descriptor.split(':');
        // split always yields at least one item
        let target_name = fields.next().unwrap_or_default().to_string();
        let port = fields
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .unwrap_or(u64::from(DEFAULT_PORT));
        let connect_host = fields
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| target_name.clone());

        Self {
            target_name,
            port,
            connect_host,
        }
    }

    /// Human-readable `target:port:host` label used in results and logs.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// The port as a TCP port number, `None` if it is out of range.
    pub fn tcp_port(&self) -> Option<u16> {
        u16::try_from(self.port).ok()
    }
}

impl From<&str> for EndpointSpec {
    fn from(descriptor: &str) -> Self {
        Self::parse(descriptor)
    }
}

impl fmt::Display for EndpointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.target_name, self.port, self.connect_host)
    }
}
