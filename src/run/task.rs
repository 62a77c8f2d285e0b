//! Per-endpoint pipeline.
//!
//! One pipeline runs per descriptor: probe the endpoint, interpret the chain on
//! success, and always hand back exactly one `HostResult`.

use std::time::Instant;

use chrono::Utc;

use crate::endpoint::EndpointSpec;
use crate::models::HostResult;
use crate::observer::PipelineStage;
use crate::tls::interpret_chain;

use super::ProbeContext;

/// Runs the probe pipeline for one endpoint.
///
/// Measures its own wall-clock time and reports `Started`/`Done` plus every
/// intermediate stage to the context's observer. Never fails: any error ends
/// up in `HostResult::error`.
pub async fn check_host(ctx: &ProbeContext, index: usize, spec: EndpointSpec) -> HostResult {
    let process_start = Instant::now();
    let started_at = Utc::now();
    let label = spec.label();
    let observer = ctx.observer.as_ref();

    observer.stage(&label, PipelineStage::Started);
    let mut result = HostResult::new(index, label.clone());

    match ctx.prober.probe(&spec, observer).await {
        Ok(snapshot) => {
            observer.stage(&label, PipelineStage::Interpreting);
            match interpret_chain(&label, &snapshot, started_at, observer) {
                Ok(summary) => result.apply_summary(summary),
                Err(e) => result.error = Some(e),
            }
        }
        Err(e) => result.error = Some(e),
    }

    result.elapsed = process_start.elapsed();
    observer.stage(&label, PipelineStage::Done);
    observer.finished(&result);
    result
}
