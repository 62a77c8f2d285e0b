//! TLS probing and certificate interpretation.
//!
//! This module connects to an endpoint and captures what the server presents:
//! - Negotiated protocol version
//! - Peer certificate chain (leaf first)
//! - Remote address actually dialed
//!
//! Uses `tokio-rustls` for async TLS connections and `x509-parser` (in
//! `extract`) for certificate parsing. No trust validation is performed.

mod extract;
mod protocol;
mod verifier;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use rustls::client::ClientConnection;
use rustls::pki_types::{CertificateDer, ServerName};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use crate::config::ProbeConfig;
use crate::dns::resolve_connect_host;
use crate::endpoint::EndpointSpec;
use crate::error_handling::{InitializationError, ProbeError};
use crate::initialization::probe_crypto_provider;
use crate::observer::{PipelineStage, ProbeObserver};

pub use extract::{extract_issuer_info, extract_leaf_info, interpret_chain, LeafInfo};
pub use protocol::{tls_version_label, NegotiatedProtocol};

/// Connection state captured right after a successful handshake.
///
/// Owns copies of everything it holds; the connection it came from is already
/// closed by the time a caller sees it.
#[derive(Debug, Clone)]
pub struct HandshakeSnapshot {
    /// Server name presented via SNI
    pub target_name: String,
    /// Address that was dialed
    pub remote_addr: SocketAddr,
    /// Negotiated protocol
    pub protocol: NegotiatedProtocol,
    /// Peer chain as presented, leaf first
    pub peer_certificates: Vec<CertificateDer<'static>>,
}

impl HandshakeSnapshot {
    fn capture(
        conn: &ClientConnection,
        target_name: &str,
        remote_addr: SocketAddr,
    ) -> Result<Self, ProbeError> {
        let handshake_error = |reason: String| ProbeError::Handshake {
            addr: remote_addr.to_string(),
            target: target_name.to_string(),
            reason,
        };

        let version = conn
            .protocol_version()
            .ok_or_else(|| handshake_error("no protocol version negotiated".to_string()))?;
        let protocol = NegotiatedProtocol::from_rustls(version)
            .ok_or_else(|| handshake_error(format!("unsupported protocol version {version:?}")))?;

        Ok(Self {
            target_name: target_name.to_string(),
            remote_addr,
            protocol,
            peer_certificates: conn
                .peer_certificates()
                .map(<[CertificateDer<'static>]>::to_vec)
                .unwrap_or_default(),
        })
    }
}

/// Performs one resolve → connect → handshake attempt per endpoint.
///
/// A prober is shared read-only by every concurrent pipeline.
pub struct TlsProber {
    resolver: Arc<TokioAsyncResolver>,
    connector: TlsConnector,
    connect_timeout: Duration,
    handshake_timeout: Option<Duration>,
}

impl TlsProber {
    /// Creates a prober using `resolver` for connect-host lookups.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or the TLS client configuration
    /// cannot be built.
    pub fn new(
        config: &ProbeConfig,
        resolver: Arc<TokioAsyncResolver>,
    ) -> Result<Self, InitializationError> {
        config.validate()?;
        let client_config = verifier::build_client_config(probe_crypto_provider())?;

        Ok(Self {
            resolver,
            connector: TlsConnector::from(Arc::new(client_config)),
            connect_timeout: config.connect_timeout,
            handshake_timeout: config.handshake_timeout,
        })
    }

    /// Probes one endpoint.
    ///
    /// Stage transitions are reported to `observer`. The TCP and TLS
    /// connections are closed before this returns, on success and on every
    /// failure path.
    ///
    /// # Errors
    ///
    /// Returns the first failure among resolution, connect and handshake.
    /// Nothing is retried.
    pub async fn probe(
        &self,
        spec: &EndpointSpec,
        observer: &dyn ProbeObserver,
    ) -> Result<HandshakeSnapshot, ProbeError> {
        let label = spec.label();

        observer.stage(&label, PipelineStage::Resolving);
        let ip = resolve_connect_host(&spec.connect_host, &self.resolver).await?;

        observer.stage(&label, PipelineStage::Connecting);
        let port = spec.tcp_port().ok_or_else(|| ProbeError::Connect {
            addr: format!("{ip}:{}", spec.port),
            host: spec.connect_host.clone(),
            reason: "invalid port".to_string(),
        })?;
        let addr = SocketAddr::new(ip, port);
        let sock = self.connect(addr, &spec.connect_host).await?;
        observer.connected(&label, &addr.to_string());

        observer.stage(&label, PipelineStage::Handshaking);
        self.handshake(sock, addr, &spec.target_name).await
    }

    async fn connect(&self, addr: SocketAddr, host: &str) -> Result<TcpStream, ProbeError> {
        match tokio::time::timeout(self.connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(sock)) => Ok(sock),
            Ok(Err(e)) => Err(ProbeError::Connect {
                addr: addr.to_string(),
                host: host.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(ProbeError::ConnectTimeout {
                addr: addr.to_string(),
                host: host.to_string(),
                timeout: self.connect_timeout,
            }),
        }
    }

    async fn handshake(
        &self,
        sock: TcpStream,
        addr: SocketAddr,
        target_name: &str,
    ) -> Result<HandshakeSnapshot, ProbeError> {
        let server_name = ServerName::try_from(target_name.to_string()).map_err(|e| {
            ProbeError::InvalidServerName {
                name: target_name.to_string(),
                reason: e.to_string(),
            }
        })?;

        let connect = self.connector.connect(server_name, sock);
        let outcome = match self.handshake_timeout {
            Some(limit) => tokio::time::timeout(limit, connect).await.map_err(|_| {
                ProbeError::HandshakeTimeout {
                    addr: addr.to_string(),
                    target: target_name.to_string(),
                    timeout: limit,
                }
            })?,
            None => connect.await,
        };
        let mut tls_stream = outcome.map_err(|e| ProbeError::Handshake {
            addr: addr.to_string(),
            target: target_name.to_string(),
            reason: e.to_string(),
        })?;

        let snapshot = HandshakeSnapshot::capture(tls_stream.get_ref().1, target_name, addr);

        // Sends close_notify; the socket itself is released when the stream drops
        if let Err(e) = tls_stream.shutdown().await {
            log::debug!("Error closing TLS connection to {addr} - {target_name}: {e}");
        }

        snapshot
    }
}
