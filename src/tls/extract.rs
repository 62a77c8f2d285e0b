//! Certificate chain interpretation.
//!
//! Only the first two chain positions feed the result: the leaf provides the
//! expiry countdown and DNS names, the next certificate names the issuer.
//! Anything after that is reported to the observer and otherwise ignored.

use chrono::{DateTime, Utc};
use x509_parser::prelude::*;

use crate::error_handling::ProbeError;
use crate::models::CertificateSummary;
use crate::observer::{CertificateDetails, ChainPosition, ProbeObserver};
use crate::tls::HandshakeSnapshot;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Data taken from the leaf certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafInfo {
    /// Whole days from the probe start to not-after, clamped at zero
    pub expire_days: i64,
    /// not-after lies before the probe start
    pub expired: bool,
    /// SAN DNS names, or the common name when there are none
    pub dns_names: Vec<String>,
}

/// Derives the result fields from a captured chain.
///
/// `started_at` is the probe start time the expiry countdown is measured from.
///
/// # Errors
///
/// Returns `ProbeError::EmptyChain` if the peer presented no certificate and
/// `ProbeError::Certificate` if the leaf cannot be decoded. Undecodable
/// certificates further up the chain are logged and skipped.
///
/// A completed handshake without any certificate (PSK-only, for instance) is
/// an error here rather than a success with empty fields: a successful result
/// always carries a non-negative day count and a protocol version.
pub fn interpret_chain(
    label: &str,
    snapshot: &HandshakeSnapshot,
    started_at: DateTime<Utc>,
    observer: &dyn ProbeObserver,
) -> Result<CertificateSummary, ProbeError> {
    let chain = &snapshot.peer_certificates;

    let leaf_der = chain.first().ok_or_else(|| ProbeError::EmptyChain {
        target: snapshot.target_name.clone(),
    })?;
    let (_, leaf) =
        parse_x509_certificate(leaf_der.as_ref()).map_err(|e| ProbeError::Certificate {
            target: snapshot.target_name.clone(),
            reason: e.to_string(),
        })?;
    let leaf_info = extract_leaf_info(&leaf, started_at);
    let mut details = certificate_details(&leaf);
    details.dns_names = leaf_info.dns_names.clone();
    observer.certificate(label, ChainPosition::Leaf, &details);

    let mut issuer = String::new();
    for (index, der) in chain.iter().enumerate().skip(1) {
        let cert = match parse_x509_certificate(der.as_ref()) {
            Ok((_, cert)) => cert,
            Err(e) => {
                log::warn!("{label}: skipping undecodable chain certificate {index}: {e}");
                continue;
            }
        };
        let position = ChainPosition::from_index(index);
        observer.certificate(label, position, &certificate_details(&cert));
        if position == ChainPosition::Issuer {
            issuer = extract_issuer_info(&cert);
        }
    }

    Ok(CertificateSummary {
        tls_version: snapshot.protocol.label().to_string(),
        expire_days: leaf_info.expire_days,
        expired: leaf_info.expired,
        issuer,
        dns_names: leaf_info.dns_names,
    })
}

/// Expiry countdown and DNS names of the leaf certificate.
pub fn extract_leaf_info(cert: &X509Certificate<'_>, started_at: DateTime<Utc>) -> LeafInfo {
    let remaining_secs = cert.validity().not_after.timestamp() - started_at.timestamp();
    // Integer division truncates partial days toward zero
    let days = remaining_secs / SECONDS_PER_DAY;

    let sans = subject_alt_dns_names(cert);
    let dns_names = if sans.is_empty() {
        vec![common_name(cert)]
    } else {
        sans
    };

    LeafInfo {
        expire_days: days.max(0),
        expired: remaining_secs < 0,
        dns_names,
    }
}

/// Organization of the issuing certificate (chain position 1).
///
/// Returns the first organization entry of its subject, or an empty string.
pub fn extract_issuer_info(cert: &X509Certificate<'_>) -> String {
    cert.subject()
        .iter_organization()
        .next()
        .and_then(|org| org.as_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn common_name(cert: &X509Certificate<'_>) -> String {
    cert.subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// DNS entries of the Subject Alternative Name extension, in order.
/// Other name types (IP addresses, emails, URIs) are ignored.
fn subject_alt_dns_names(cert: &X509Certificate<'_>) -> Vec<String> {
    match cert.subject_alternative_name() {
        Ok(Some(ext)) => ext
            .value
            .general_names
            .iter()
            .filter_map(|name| match name {
                GeneralName::DNSName(dns) => Some(dns.to_string()),
                _ => None,
            })
            .collect(),
        Ok(None) => Vec::new(),
        Err(e) => {
            log::warn!("Malformed subject alternative name extension: {e}");
            Vec::new()
        }
    }
}

fn attribute_values<'a, 'b: 'a>(
    values: impl Iterator<Item = &'a AttributeTypeAndValue<'b>>,
) -> Vec<String> {
    values
        .filter_map(|attr| attr.as_str().ok())
        .map(str::to_string)
        .collect()
}

fn certificate_details(cert: &X509Certificate<'_>) -> CertificateDetails {
    let subject = cert.subject();
    CertificateDetails {
        common_name: common_name(cert),
        organizational_units: attribute_values(subject.iter_organizational_unit()),
        organizations: attribute_values(subject.iter_organization()),
        localities: attribute_values(subject.iter_locality()),
        provinces: attribute_values(subject.iter_state_or_province()),
        countries: attribute_values(subject.iter_country()),
        not_before: cert.validity().not_before.to_string(),
        not_after: cert.validity().not_after.to_string(),
        dns_names: Vec::new(),
    }
}
