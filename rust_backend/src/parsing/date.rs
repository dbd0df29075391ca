use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;

use crate::error::{WidgetError, WidgetResult};

const ATTRIBUTE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date widget value (`YYYY-MM-DD`).
pub fn parse_date(text: &str) -> WidgetResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), ATTRIBUTE_DATE_FORMAT)
        .map_err(|_| WidgetError::MalformedDate(text.to_string()))
}

/// Whole days between the Unix epoch and `date`.
pub fn days_since_epoch(date: NaiveDate) -> i64 {
    // NaiveDate::default() is 1970-01-01
    date.signed_duration_since(NaiveDate::default()).num_days()
}

/// Format `date` with a strftime pattern, falling back to ISO when the
/// pattern cannot be rendered.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(pattern)) {
        Ok(()) => out,
        Err(_) => {
            log::warn!("Cannot format date with pattern '{}', using ISO", pattern);
            date.format(ATTRIBUTE_DATE_FORMAT).to_string()
        }
    }
}

/// Try each pattern in turn as a date-time, then as a date.
pub fn parse_datetime(text: &str, patterns: &[String]) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    patterns.iter().find_map(|pattern| {
        NaiveDateTime::parse_from_str(text, pattern).ok().or_else(|| {
            NaiveDate::parse_from_str(text, pattern)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
    })
}
