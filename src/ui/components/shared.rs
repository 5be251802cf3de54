//! Shared component helpers.

use chrono::DateTime;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Truncates multiline text to a compact single-line preview.
pub fn short_preview(text: &str, max_chars: usize) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() <= max_chars {
        return normalized;
    }

    if max_chars <= 3 {
        return normalized.chars().take(max_chars).collect();
    }

    let mut out = String::new();
    for ch in normalized.chars().take(max_chars - 3) {
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Formats an ISO-8601 timestamp into a compact age like "3days ago".
///
/// Malformed timestamps come out as an empty string so tag rows can
/// drop the annotation instead of showing garbage.
pub fn short_age(iso: &str) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(iso) else {
        return String::new();
    };

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or_default();

    let age_ms = (now_ms - then.timestamp_millis()).max(0) as u64;
    let formatted = humantime::format_duration(Duration::from_millis(age_ms)).to_string();

    // Take only the most significant unit (first space-delimited token) + "ago".
    let unit = formatted.split_whitespace().next().unwrap_or("?");
    format!("{unit} ago")
}
