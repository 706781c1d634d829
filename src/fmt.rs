//! Shared formatting helpers for table cells.
//!
//! All pure formatting functions (no ratatui styles, no layout) live here.

use chrono::{DateTime, Utc};

/// Format duration in seconds as compact text: `"3m5s"`, `"2h10m"`.
///
/// Negative input renders as `"-"`.
pub fn format_duration(secs: i64) -> String {
    if secs < 0 {
        return "-".to_string();
    }
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d{}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Format fractional seconds, switching to milliseconds below one second.
///
/// `0.0123` -> `"12ms"`, `4.5` -> `"4.5s"`, `185.0` -> `"3m5s"`.
pub fn format_elapsed(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "-".to_string();
    }
    // Round before picking the unit so 0.9996 does not print as 1000ms.
    let millis = (secs * 1000.0).round();
    if millis < 1000.0 {
        return format!("{:.0}ms", millis);
    }
    let tenths = (secs * 10.0).round() / 10.0;
    if tenths < 60.0 {
        format!("{:.1}s", tenths)
    } else {
        format_duration(secs.round() as i64)
    }
}

/// Format a unix timestamp as UTC wall-clock time (`"14:03:27"`).
pub fn format_clock(epoch_secs: i64) -> String {
    match DateTime::<Utc>::from_timestamp(epoch_secs, 0) {
        Some(dt) if epoch_secs > 0 => dt.format("%H:%M:%S").to_string(),
        _ => "-".to_string(),
    }
}

/// Truncate string to max length (in chars) with unicode ellipsis (`…`).
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

/// Normalize query text for single-line display.
/// Replaces line breaks and tabs with spaces and collapses runs of spaces.
pub fn normalize_query(s: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_buckets() {
        assert_eq!(format_duration(-1), "-");
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(185), "3m5s");
        assert_eq!(format_duration(7800), "2h10m");
        assert_eq!(format_duration(90000), "1d1h");
    }

    #[test]
    fn elapsed_uses_ms_below_one_second() {
        assert_eq!(format_elapsed(0.0123), "12ms");
        assert_eq!(format_elapsed(4.5), "4.5s");
        assert_eq!(format_elapsed(185.0), "3m5s");
        assert_eq!(format_elapsed(-2.0), "-");
    }

    #[test]
    fn elapsed_rounds_before_choosing_unit() {
        assert_eq!(format_elapsed(0.9994), "999ms");
        assert_eq!(format_elapsed(0.9996), "1.0s");
        assert_eq!(format_elapsed(59.94), "59.9s");
        assert_eq!(format_elapsed(59.96), "1m0s");
        assert_eq!(format_elapsed(119.6), "2m0s");
    }

    #[test]
    fn clock_is_utc() {
        // 2026-02-07T14:03:27Z
        assert_eq!(format_clock(1_770_473_007), "14:03:27");
        assert_eq!(format_clock(0), "-");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(
            normalize_query("SELECT *\n  FROM\tt\r\n"),
            "SELECT * FROM t "
        );
    }
}
