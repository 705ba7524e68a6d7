//! Shared formatting helpers for the dashboard and the report.
//!
//! All pure formatting functions (no ratatui styles, no plotting) live here.

use chrono::{DateTime, Local, Utc};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format byte count as human-readable size with 1024 steps.
///
/// `0` → `"0 B"`, `1536` → `"1.50 KB"`, `1073741824` → `"1.00 GB"`.
/// Negative input (never produced by PostgreSQL size functions) is clamped to 0.
pub fn format_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, BYTE_UNITS[unit])
}

/// Format duration in seconds using the largest unit that keeps the value >= 1.
///
/// Boundaries at 60, 3600 and 86400: `45` → `"45.0 seconds"`,
/// `125` → `"2.1 minutes"`, `7300` → `"2.0 hours"`, `90000` → `"1.0 days"`.
pub fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        format!("{:.1} seconds", secs)
    } else if secs < 3600.0 {
        format!("{:.1} minutes", secs / 60.0)
    } else if secs < 86400.0 {
        format!("{:.1} hours", secs / 3600.0)
    } else {
        format!("{:.1} days", secs / 86400.0)
    }
}

/// Format milliseconds for latency display: `"0.4 ms"`, `"12.3 ms"`, `"1.25 s"`.
pub fn format_ms(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else {
        format!("{:.1} ms", ms)
    }
}

/// Format a percentage with one decimal: `"99.1%"`.
pub fn format_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Format a 0..1 ratio with two decimals: `"0.97"`.
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.2}", ratio)
}

/// Format a UTC timestamp in local time for display.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Format an optional timestamp as compact age relative to `now`:
/// `"3s"`, `"5m"`, `"2h"`, `"7d"`, or `"-"` when absent or in the future.
pub fn format_age(ts: Option<&DateTime<Utc>>, now: &DateTime<Utc>) -> String {
    let Some(ts) = ts else {
        return "-".to_string();
    };
    let age = now.signed_duration_since(*ts).num_seconds();
    if age < 0 {
        return "-".to_string();
    }
    if age < 60 {
        format!("{}s", age)
    } else if age < 3600 {
        format!("{}m", age / 60)
    } else if age < 86400 {
        format!("{}h", age / 3600)
    } else {
        format!("{}d", age / 86400)
    }
}

/// Truncate string to `max_chars` characters with unicode ellipsis (`…`).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Normalize text for single-line display.
/// Replaces newlines and tabs with spaces and collapses runs of spaces.
pub fn normalize_for_display(s: &str) -> String {
    let s = s.replace('\n', " ").replace('\r', "").replace('\t', " ");
    let mut result = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch == ' ' {
            if !prev_space {
                result.push(ch);
            }
            prev_space = true;
        } else {
            result.push(ch);
            prev_space = false;
        }
    }
    result
}

/// First line of `version()` output up to the build details:
/// `"PostgreSQL 16.2 on x86_64-pc-linux-gnu, ..."` → `"PostgreSQL 16.2"`.
pub fn short_version(version: &str) -> String {
    version
        .split(" on ")
        .next()
        .unwrap_or(version)
        .split(',')
        .next()
        .unwrap_or(version)
        .trim()
        .to_string()
}
