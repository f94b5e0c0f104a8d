//! Reusable formatting utilities for CLI output
//!
//! Dates travel as ISO-8601 text. These helpers parse them, normalize operator
//! input, and render human deltas ("3 days", "1 hour").

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// ISO-8601 in UTC with second precision, e.g. `2024-01-15T18:00:00+00:00`.
pub fn to_iso(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Normalize a date typed by the operator: `now` or any ISO-8601 form.
pub fn normalize_date_input(input: &str, now: DateTime<Utc>) -> Option<String> {
    if input.trim().eq_ignore_ascii_case("now") {
        return Some(to_iso(now));
    }

    parse_date(input).map(to_iso)
}

fn plural(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{} {}s", count, unit)
    } else {
        format!("{} {}", count, unit)
    }
}

/// Largest whole unit of `later - earlier`.
///
/// Returns whether `later` is strictly after `earlier`, and the absolute delta text.
pub fn format_delta(later: DateTime<Utc>, earlier: DateTime<Utc>) -> (bool, String) {
    let seconds = (later - earlier).num_seconds().abs();

    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    let text = if days > 0 {
        plural(days, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        plural(secs, "second")
    };

    (later > earlier, text)
}

/// Time left before `end`, or time elapsed since it.
pub fn format_deadline(end: Option<&str>, now: DateTime<Utc>) -> String {
    match end.and_then(parse_date) {
        None => "--".to_string(),
        Some(end) => match format_delta(now, end) {
            (true, delta) => format!("Closed {} ago", delta),
            (false, delta) => format!("{} remaining", delta),
        },
    }
}

/// Length of the interval between two ISO dates.
pub fn format_span(start: Option<&str>, end: Option<&str>) -> String {
    match (start.and_then(parse_date), end.and_then(parse_date)) {
        (Some(start), Some(end)) => format_delta(end, start).1,
        _ => "--".to_string(),
    }
}

/// Render an optional text, `--` when unset.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "--".to_string(),
    }
}

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
