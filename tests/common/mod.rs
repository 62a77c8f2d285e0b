// Local TLS test servers shared by the integration tests.
//
// Every server binds 127.0.0.1:0 and runs until its task is aborted on drop.

#![allow(dead_code)] // Not every test file uses every helper

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cert_status::initialization::init_resolver;
use cert_status::{HostResult, PipelineStage, ProbeConfig, ProbeContext, ProbeObserver};
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::{ServerConfig, SupportedProtocolVersion};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;

/// Organization of the test CA, reported as the issuer.
pub const TEST_ISSUER: &str = "Cert Status Test CA";

/// A background server; aborted when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Descriptor dialing this server while presenting `localhost` as SNI.
    pub fn descriptor(&self) -> String {
        format!("localhost:{}:127.0.0.1", self.addr.port())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// `[leaf, ca]` chain for `localhost` plus the leaf key.
pub fn localhost_chain() -> (Vec<CertificateDer<'static>>, PrivateKeyDer<'static>) {
    let ca_key = KeyPair::generate().unwrap();
    let mut ca_params = CertificateParams::new(Vec::<String>::new()).unwrap();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params
        .distinguished_name
        .push(DnType::OrganizationName, TEST_ISSUER);
    ca_params
        .distinguished_name
        .push(DnType::CommonName, "Cert Status Test Root");
    let ca = ca_params.self_signed(&ca_key).unwrap();

    let leaf_key = KeyPair::generate().unwrap();
    let mut leaf_params = CertificateParams::new(vec!["localhost".to_string()]).unwrap();
    leaf_params
        .distinguished_name
        .push(DnType::CommonName, "localhost");
    leaf_params.not_after = rcgen::date_time_ymd(2099, 1, 1);
    let leaf = leaf_params.signed_by(&leaf_key, &ca, &ca_key).unwrap();

    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(leaf_key.serialize_der()));
    (vec![leaf.der().clone(), ca.der().clone()], key)
}

fn server_config(versions: &[&'static SupportedProtocolVersion]) -> ServerConfig {
    let (chain, key) = localhost_chain();
    ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_protocol_versions(versions)
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(chain, key)
        .unwrap()
}

/// TLS server presenting [`localhost_chain`] with the given protocol versions.
pub async fn spawn_tls_server(versions: &[&'static SupportedProtocolVersion]) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(server_config(versions)));

    let handle = tokio::spawn(async move {
        while let Ok((stream, _peer)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(mut tls) = acceptor.accept(stream).await {
                    // Wait for the client's close_notify
                    let mut buf = [0u8; 64];
                    let _ = tls.read(&mut buf).await;
                }
            });
        }
    });

    TestServer { addr, handle }
}

/// Server that answers every connection with plain HTTP and closes it.
pub async fn spawn_plaintext_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        while let Ok((mut stream, _peer)) = listener.accept().await {
            let _ = stream
                .write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n")
                .await;
            let _ = stream.shutdown().await;
        }
    });

    TestServer { addr, handle }
}

/// Server that accepts connections and never says anything.
pub async fn spawn_silent_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _peer)) = listener.accept().await {
            held.push(stream);
        }
    });

    TestServer { addr, handle }
}

/// Listener whose accept queue is full and never drained. The kernel drops
/// further SYNs, so new connection attempts stay pending until the client
/// gives up.
pub struct SaturatedListener {
    pub addr: SocketAddr,
    _listener: TcpListener,
    _queued: Vec<TcpStream>,
}

pub async fn saturated_listener() -> SaturatedListener {
    let socket = TcpSocket::new_v4().unwrap();
    socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let listener = socket.listen(1).unwrap();
    let addr = listener.local_addr().unwrap();

    // Fill the queue until an attempt hangs
    let mut queued = Vec::new();
    for _ in 0..64 {
        match tokio::time::timeout(Duration::from_millis(200), TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => queued.push(stream),
            _ => break,
        }
    }

    SaturatedListener {
        addr,
        _listener: listener,
        _queued: queued,
    }
}

/// A port on 127.0.0.1 with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// Fast-failing configuration for local tests.
pub fn test_config(handshake_timeout: Option<Duration>) -> ProbeConfig {
    ProbeConfig {
        connect_timeout: Duration::from_secs(2),
        handshake_timeout,
        dns_timeout: Duration::from_secs(1),
    }
}

/// Context with the given observer and a fresh resolver.
pub fn test_context(config: &ProbeConfig, observer: Arc<dyn ProbeObserver>) -> Arc<ProbeContext> {
    let resolver = init_resolver(config.dns_timeout).unwrap();
    Arc::new(ProbeContext::new(config, resolver, observer).unwrap())
}

/// Observer recording every stage transition and finished result.
#[derive(Default)]
pub struct RecordingObserver {
    pub stages: Mutex<Vec<(String, PipelineStage)>>,
    pub finished: Mutex<Vec<String>>,
}

impl RecordingObserver {
    /// Stages reported for `label`, in order.
    pub fn stages_for(&self, label: &str) -> Vec<PipelineStage> {
        self.stages
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| l == label)
            .map(|(_, s)| *s)
            .collect()
    }
}

impl ProbeObserver for RecordingObserver {
    fn stage(&self, label: &str, stage: PipelineStage) {
        self.stages.lock().unwrap().push((label.to_string(), stage));
    }

    fn finished(&self, result: &HostResult) {
        self.finished.lock().unwrap().push(result.host.clone());
    }
}

/// Checks the per-result invariants every probe outcome must satisfy.
pub fn assert_result_invariants(result: &HostResult) {
    assert!(!result.host.is_empty(), "empty label: {result:?}");
    match &result.error {
        None => {
            assert!(result.expire_days >= 0, "negative days: {result:?}");
            assert!(!result.tls_version.is_empty(), "no TLS version: {result:?}");
            assert!(!result.dns_names.is_empty(), "no DNS names: {result:?}");
        }
        Some(_) => {
            assert_eq!(result.expire_days, -1, "failed result with days: {result:?}");
            assert!(result.tls_version.is_empty());
            assert!(result.issuer.is_empty());
        }
    }
}
