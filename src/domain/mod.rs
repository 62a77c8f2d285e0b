//! Target name validation.
//!
//! A target name must either be an IP literal or contain a registrable domain
//! according to the Public Suffix List (e.g. `www.example.co.uk` is accepted,
//! `localhost` and `co.uk` are not).

use std::net::IpAddr;

use thiserror::Error;

/// A target name that cannot be probed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid domain: {0}")]
pub struct InvalidDomain(pub String);

/// Returns the registrable domain of `name`, or `None` for IP literals.
///
/// # Errors
///
/// Returns `InvalidDomain` if `name` is empty or has no registrable domain.
pub fn registrable_domain(name: &str) -> Result<Option<String>, InvalidDomain> {
    let trimmed = name.trim_start_matches('[').trim_end_matches(']');
    if trimmed.parse::<IpAddr>().is_ok() {
        return Ok(None);
    }

    let lowered = name.to_ascii_lowercase();
    match psl::domain_str(&lowered) {
        Some(domain) if !name.is_empty() => Ok(Some(domain.to_string())),
        _ => Err(InvalidDomain(name.to_string())),
    }
}

/// Checks that `name` can be used as a probe target.
///
/// # Errors
///
/// Returns `InvalidDomain` naming the rejected target.
pub fn validate_target_name(name: &str) -> Result<(), InvalidDomain> {
    registrable_domain(name).map(|_| ())
}
