// libs/triage-cell/src/services/timefmt.rs
use chrono::{NaiveTime, Timelike};

use shared_models::appointment::parse_wall_time;

/// Convert a raw time string to 12-hour display form ("14:30" -> "2:30 PM").
///
/// Idempotent: a value already carrying AM/PM passes through unchanged, so a
/// re-render can never corrupt a previously formatted cell. Empty input
/// yields empty output; an unparseable value is returned as-is.
pub fn format_12h(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let upper = trimmed.to_ascii_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        return trimmed.to_string();
    }

    match parse_wall_time(trimmed) {
        Some(time) => format_time(time),
        None => trimmed.to_string(),
    }
}

/// 12-hour clock rendering of a wall-clock time, no leading zero on the hour.
pub fn format_time(time: NaiveTime) -> String {
    let meridiem = if time.hour() >= 12 { "PM" } else { "AM" };
    let hour = match time.hour() % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour, time.minute(), meridiem)
}

/// Display form for an optional time; a missing time renders blank.
pub fn format_display(time: Option<NaiveTime>) -> String {
    time.map(format_time).unwrap_or_default()
}
