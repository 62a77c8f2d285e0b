//! Diagnostic sink for probe pipelines.
//!
//! Pipelines never write diagnostics to a global destination themselves; they
//! report to the `ProbeObserver` held by their context. `LogObserver` forwards
//! everything to the `log` facade, `NullObserver` drops it.

use std::fmt;

use crate::models::HostResult;

/// Stages a single endpoint pipeline moves through.
///
/// `Started → Resolving → Connecting → Handshaking → Interpreting → Done`.
/// A failure while resolving, connecting or handshaking jumps straight to
/// `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Pipeline spawned
    Started,
    /// Looking up the connect host
    Resolving,
    /// Opening the TCP connection
    Connecting,
    /// Performing the TLS handshake
    Handshaking,
    /// Reading the peer certificate chain
    Interpreting,
    /// Result produced
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Started => "started",
            PipelineStage::Resolving => "resolving",
            PipelineStage::Connecting => "connecting",
            PipelineStage::Handshaking => "handshaking",
            PipelineStage::Interpreting => "interpreting",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Role of a certificate within the presented chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPosition {
    /// Position 0, the server's own certificate
    Leaf,
    /// Position 1, the certificate that issued the leaf
    Issuer,
    /// Any later position; inspected but not reflected in results
    Other(usize),
}

impl ChainPosition {
    /// Role of the certificate at `index` in the chain.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => ChainPosition::Leaf,
            1 => ChainPosition::Issuer,
            n => ChainPosition::Other(n),
        }
    }
}

/// Subject and validity of one certificate, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)] // Named after the X.509 subject attributes they hold
pub struct CertificateDetails {
    pub common_name: String,
    pub organizational_units: Vec<String>,
    pub organizations: Vec<String>,
    pub localities: Vec<String>,
    pub provinces: Vec<String>,
    pub countries: Vec<String>,
    /// Validity start as printed by the decoder
    pub not_before: String,
    /// Validity end as printed by the decoder
    pub not_after: String,
    pub dns_names: Vec<String>,
}

/// Receives diagnostics from probe pipelines.
///
/// Implementations are shared by all concurrently running pipelines and must
/// not rely on call ordering across endpoints.
pub trait ProbeObserver: Send + Sync {
    /// A pipeline entered `stage`.
    fn stage(&self, _label: &str, _stage: PipelineStage) {}

    /// A TCP connection to `addr` was established.
    fn connected(&self, _label: &str, _addr: &str) {}

    /// A certificate at `position` of the peer chain was inspected.
    fn certificate(&self, _label: &str, _position: ChainPosition, _details: &CertificateDetails) {}

    /// A pipeline produced its result.
    fn finished(&self, _result: &HostResult) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ProbeObserver for NullObserver {}

/// Observer that writes diagnostics through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ProbeObserver for LogObserver {
    fn stage(&self, label: &str, stage: PipelineStage) {
        match stage {
            PipelineStage::Started => log::info!("started {label}"),
            PipelineStage::Done => {}
            other => log::debug!("{label}: {other}"),
        }
    }

    fn connected(&self, label: &str, addr: &str) {
        log::info!("Connected to {addr} - {label}");
    }

    fn certificate(&self, label: &str, position: ChainPosition, details: &CertificateDetails) {
        match position {
            ChainPosition::Leaf => {
                log::info!(
                    "{label}: server key information: {{CN:{}, OU:{:?}, Org:{:?}, City:{:?}, State:{:?}, Country:{:?}, Valid:{{From:{}, To:{}}}}}",
                    details.common_name,
                    details.organizational_units,
                    details.organizations,
                    details.localities,
                    details.provinces,
                    details.countries,
                    details.not_before,
                    details.not_after
                );
                log::info!("{label}: DNS names={:?}", details.dns_names);
            }
            ChainPosition::Issuer => log::info!(
                "{label}: issued by: {{CN:{}, OU:{:?}, Org:{:?}}}",
                details.common_name,
                details.organizational_units,
                details.organizations
            ),
            ChainPosition::Other(n) => log::debug!(
                "{label}: ignoring chain certificate {n}: {{CN:{}, Org:{:?}, Valid:{{From:{}, To:{}}}}}",
                details.common_name,
                details.organizations,
                details.not_before,
                details.not_after
            ),
        }
    }

    fn finished(&self, result: &HostResult) {
        match &result.error {
            Some(e) => log::warn!("failed {} in {:?}: {e}", result.host, result.elapsed),
            None => log::info!("finished {} in {:?}", result.host, result.elapsed),
        }
    }
}
