//! Parallel probe orchestration.
//!
//! Fans out one Tokio task per endpoint descriptor and gathers every task's
//! result as it completes. There is no concurrency cap: N descriptors means N
//! probes in flight at once.

mod task;

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use hickory_resolver::TokioAsyncResolver;

use crate::config::ProbeConfig;
use crate::endpoint::EndpointSpec;
use crate::error_handling::{InitializationError, ProbeError};
use crate::initialization::init_resolver;
use crate::models::HostResult;
use crate::observer::{LogObserver, ProbeObserver};
use crate::tls::TlsProber;

pub use task::check_host;

/// Read-only resources shared by all pipelines of a run.
pub struct ProbeContext {
    /// Performs the network part of each probe
    pub prober: TlsProber,
    /// Receives diagnostics from every pipeline
    pub observer: Arc<dyn ProbeObserver>,
}

impl ProbeContext {
    /// Builds a context around an existing resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or TLS setup fails.
    pub fn new(
        config: &ProbeConfig,
        resolver: Arc<TokioAsyncResolver>,
        observer: Arc<dyn ProbeObserver>,
    ) -> Result<Self, InitializationError> {
        Ok(Self {
            prober: TlsProber::new(config, resolver)?,
            observer,
        })
    }

    /// Builds a context with a fresh resolver and a `LogObserver`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver, configuration or TLS setup is invalid.
    pub fn with_defaults(config: &ProbeConfig) -> Result<Self, InitializationError> {
        config.validate()?;
        let resolver = init_resolver(config.dns_timeout)?;
        Self::new(config, resolver, Arc::new(LogObserver))
    }
}

/// Probes every descriptor concurrently and returns one result per descriptor.
///
/// Results arrive in completion order; `HostResult::index` holds each
/// descriptor's input position. A pipeline that dies without producing a
/// result (a panic) is still represented, by a result carrying
/// `ProbeError::TaskFailed`.
///
/// Must be called from within a Tokio runtime.
pub async fn check_hosts_parallel<I, S>(ctx: Arc<ProbeContext>, descriptors: I) -> Vec<HostResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tasks = FuturesUnordered::new();

    for (index, descriptor) in descriptors.into_iter().enumerate() {
        let spec = EndpointSpec::parse(descriptor.as_ref());
        let label = spec.label();
        let ctx = Arc::clone(&ctx);
        let handle = tokio::spawn(async move { check_host(&ctx, index, spec).await });

        tasks.push(async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    log::error!("Probe task for {label} did not complete: {e}");
                    HostResult::failed(
                        index,
                        label.clone(),
                        ProbeError::TaskFailed {
                            label,
                            reason: e.to_string(),
                        },
                    )
                }
            }
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(result) = tasks.next().await {
        results.push(result);
    }
    results
}

/// Convenience entry point: builds a default context from `config` and probes
/// every descriptor.
///
/// # Errors
///
/// Fails only if the shared resources cannot be initialized. Individual probe
/// failures are reported inside the returned results.
///
/// # Example
///
/// ```no_run
/// use cert_status::{check_hosts, ProbeConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let results = check_hosts(&ProbeConfig::default(), ["example.com", "rust-lang.org:443"]).await?;
/// for result in &results {
///     println!("{} - {}", result.host, result.expire_days);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn check_hosts<I, S>(
    config: &ProbeConfig,
    descriptors: I,
) -> Result<Vec<HostResult>, InitializationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ctx = Arc::new(ProbeContext::with_defaults(config)?);
    Ok(check_hosts_parallel(ctx, descriptors).await)
}
