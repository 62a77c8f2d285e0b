//! ASCII table output.

use chrono::{DateTime, Local};

use crate::models::HostResult;

use super::{days_cell, expiry_date, EXPIRED};

const HEADER: [&str; 7] = [
    "DAYS",
    "DOMAIN:PORT:HOST",
    "QUERY TIME",
    "EXPIRE DATE",
    "ERROR",
    "ISSUER",
    "TLS VER",
];

/// Renders one row per result. Failed probes leave the day count and expiry
/// date blank and show the error text instead. Expired certificates show
/// `expired` in both columns.
pub fn render_table(results: &[HostResult], now: DateTime<Local>) -> String {
    let rows: Vec<[String; 7]> = results.iter().map(|r| row(r, now)).collect();

    let mut widths = HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut out = separator.clone();
    out.push_str(&format_row(&HEADER.map(String::from), &widths));
    out.push_str(&separator);
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }
    if !rows.is_empty() {
        out.push_str(&separator);
    }
    out
}

fn row(result: &HostResult, now: DateTime<Local>) -> [String; 7] {
    let (days, expires, error) = match &result.error {
        None if result.expired => (EXPIRED.to_string(), EXPIRED.to_string(), String::new()),
        None => (
            days_cell(result),
            expiry_date(now, result.expire_days),
            String::new(),
        ),
        Some(e) => (String::new(), String::new(), e.to_string()),
    };
    [
        days,
        result.host.clone(),
        format!("{:?}", result.elapsed),
        expires,
        error,
        result.issuer.clone(),
        result.tls_version.clone(),
    ]
}

fn format_row(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str(&format!(" {cell:<width$} |"));
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ProbeError;
    use chrono::TimeZone;
    use std::time::Duration;

    #[test]
    fn test_render_table_layout() {
        let now = Local.with_ymd_and_hms(2026, 1, 30, 12, 0, 0).unwrap();
        let mut good = HostResult::new(0, "a.com:443:a.com");
        good.expire_days = 2;
        good.issuer = "Example CA".to_string();
        good.tls_version = "TLS v1.2".to_string();
        good.elapsed = Duration::from_millis(5);
        let bad = HostResult::failed(
            1,
            "b.com:443:b.com",
            ProbeError::Resolution {
                host: "b.com".to_string(),
                reason: "no record found".to_string(),
            },
        );

        let table = render_table(&[good, bad], now);
        let lines: Vec<&str> = table.lines().collect();

        // separator, header, separator, two rows, separator
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("DOMAIN:PORT:HOST"));
        assert!(lines[3].starts_with("| 2 "));
        assert!(lines[3].contains("1 Feb 2026"));
        assert!(lines[3].contains("Example CA"));
        assert!(lines[3].contains("5ms"));
        assert!(lines[4].starts_with("|      |"));
        assert!(lines[4].contains("could not resolve host name b.com"));
        // Every line has the same width
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_render_table_expired_row() {
        let now = Local.with_ymd_and_hms(2026, 1, 30, 12, 0, 0).unwrap();
        let mut old = HostResult::new(0, "old.com:443:old.com");
        old.expire_days = 0;
        old.expired = true;
        old.tls_version = "TLS v1.3".to_string();

        let table = render_table(&[old], now);
        let row = table.lines().nth(3).unwrap();
        let cells: Vec<&str> = row.split('|').map(str::trim).collect();

        // Leading empty cell from the border, then DAYS and the label
        assert_eq!(cells[1], "expired");
        assert_eq!(cells[2], "old.com:443:old.com");
        assert_eq!(cells[4], "expired");
        assert!(!row.contains("30 Jan 2026"));
    }

    #[test]
    fn test_render_table_empty() {
        let now = Local.with_ymd_and_hms(2026, 1, 30, 12, 0, 0).unwrap();
        assert_eq!(render_table(&[], now).lines().count(), 3);
    }
}
