use crate::error::{WidgetError, WidgetResult};

/// A time of day normalized for export and filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTime {
    /// Zero-padded `HH:MM`
    pub time_str: String,
    /// Minutes since midnight
    pub minutes: u32,
}

/// Parse an `HH:MM` time string.
///
/// Hours and minutes are both required non-negative integers; they are not
/// bounded, so `24:00` is the end of the day (1440). Anything after the
/// minutes component (e.g. seconds) is ignored.
pub fn parse_time(time_string: &str) -> WidgetResult<ParsedTime> {
    let malformed = || WidgetError::MalformedTime(time_string.to_string());

    let mut parts = time_string.split(':');
    let hours = parts.next().ok_or_else(malformed)?;
    let minutes = parts.next().ok_or_else(malformed)?;

    let hours: u32 = hours.trim().parse().map_err(|_| malformed())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| malformed())?;
    let total = hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(malformed)?;

    Ok(ParsedTime {
        time_str: format!("{:02}:{:02}", hours, minutes),
        minutes: total,
    })
}

/// Parse an optional time; `None` and empty strings mean "not set".
pub fn parse_optional_time(time_string: Option<&str>) -> WidgetResult<Option<ParsedTime>> {
    match time_string {
        Some(s) if !s.trim().is_empty() => parse_time(s).map(Some),
        _ => Ok(None),
    }
}
