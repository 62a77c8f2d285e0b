//! Connect-host resolution.

use std::net::IpAddr;

use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::ProbeError;

/// Resolves a connect host to the address that will be dialed.
///
/// IP literals are returned as-is without touching the resolver. For names the
/// first address of the A/AAAA answer is used.
///
/// # Errors
///
/// Returns `ProbeError::Resolution` if the lookup fails or yields no address.
pub async fn resolve_connect_host(
    host: &str,
    resolver: &TokioAsyncResolver,
) -> Result<IpAddr, ProbeError> {
    if let Some(ip) = parse_ip_literal(host) {
        return Ok(ip);
    }

    let response = resolver
        .lookup_ip(host)
        .await
        .map_err(|e| ProbeError::Resolution {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

    response.iter().next().ok_or_else(|| ProbeError::Resolution {
        host: host.to_string(),
        reason: "no IP addresses found".to_string(),
    })
}

/// Accepts plain and bracketed (`[::1]`) IP literals.
fn parse_ip_literal(host: &str) -> Option<IpAddr> {
    let trimmed = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    trimmed.parse().ok()
}
