//! Result rendering for the command line.
//!
//! Three formats:
//! - lines: just the days until expiry (one endpoint) or `label - days` per
//!   endpoint, with an empty line for each failed probe
//! - table: one row per endpoint with timing, expiry date, error, issuer and
//!   TLS version
//! - json: the serialized results
//!
//! A certificate that had already expired shows `expired` instead of a day
//! count and expiry date in both text formats.

mod table;

use chrono::{DateTime, Days, Local};

use crate::config::OutputFormat;
use crate::models::HostResult;

pub use table::render_table;

/// Shown in place of the day count for an already-expired certificate.
pub const EXPIRED: &str = "expired";

/// Restores input order; results otherwise arrive in completion order.
pub fn sort_by_input(results: &mut [HostResult]) {
    results.sort_by_key(|r| r.index);
}

/// Renders `results` in the requested format. `now` anchors expiry dates.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(
    results: &[HostResult],
    format: OutputFormat,
    now: DateTime<Local>,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Lines => Ok(render_lines(results)),
        OutputFormat::Table => Ok(render_table(results, now)),
        OutputFormat::Json => serde_json::to_string_pretty(results),
    }
}

/// Line-oriented output.
///
/// A single result prints only its day count (`-1` if it failed, `expired`
/// for an already-expired certificate) so the tool
/// can be used directly in monitoring scripts.
pub fn render_lines(results: &[HostResult]) -> String {
    if let [only] = results {
        return format!("{}\n", days_cell(only));
    }

    let mut out = String::new();
    for result in results {
        if result.is_success() {
            out.push_str(&format!("{} - {}\n", result.host, days_cell(result)));
        } else {
            out.push('\n');
        }
    }
    out
}

/// Day count of a result, or `expired`.
fn days_cell(result: &HostResult) -> String {
    if result.expired {
        EXPIRED.to_string()
    } else {
        result.expire_days.to_string()
    }
}

/// Human-facing expiry date: `now` plus `expire_days`, e.g. "2 Jan 2006".
pub fn expiry_date(now: DateTime<Local>, expire_days: i64) -> String {
    let date = now.date_naive();
    let shifted = match u64::try_from(expire_days) {
        Ok(days) => date.checked_add_days(Days::new(days)),
        Err(_) => date.checked_sub_days(Days::new(expire_days.unsigned_abs())),
    };
    shifted
        .map(|d| d.format("%-d %b %Y").to_string())
        .unwrap_or_default()
}
