//! Provider duration parsing and travel time formatting.

use std::fmt;

use crate::error::ParseError;

/// Placeholder shown for a travel mode with no route.
pub const NO_ROUTE_PLACEHOLDER: &str = "N/A";

/// Converts a provider duration such as `"3600s"` into whole minutes.
///
/// An absent or empty duration counts as zero minutes. Seconds are floored.
pub fn parse_duration(raw: Option<&str>) -> Result<i64, ParseError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(0),
        Some(raw) => raw,
    };

    let digits = raw.strip_suffix('s').unwrap_or(raw);
    let seconds: i64 = digits.parse().map_err(|_| ParseError::new(raw))?;

    Ok(seconds.div_euclid(60))
}

/// A travel time that is either a number of minutes or a display-only
/// placeholder carried through formatting untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelTime {
    Minutes(i64),
    Placeholder(String),
}

impl TravelTime {
    pub fn unavailable() -> Self {
        Self::Placeholder(NO_ROUTE_PLACEHOLDER.to_string())
    }
}

impl From<i64> for TravelTime {
    fn from(minutes: i64) -> Self {
        Self::Minutes(minutes)
    }
}

impl From<i32> for TravelTime {
    fn from(minutes: i32) -> Self {
        Self::Minutes(i64::from(minutes))
    }
}

impl From<&str> for TravelTime {
    fn from(placeholder: &str) -> Self {
        Self::Placeholder(placeholder.to_string())
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_travel_time(self.clone()))
    }
}

/// Renders minutes as `"1 hr 30 mins"`, `"2 hrs"` or `"45 mins"`.
///
/// Placeholders are returned as-is.
pub fn format_travel_time(value: impl Into<TravelTime>) -> String {
    let total_minutes = match value.into() {
        TravelTime::Minutes(minutes) => minutes,
        TravelTime::Placeholder(text) => return text,
    };

    let hours = total_minutes.div_euclid(60);
    let minutes = total_minutes.rem_euclid(60);

    if hours > 0 {
        let unit = if hours > 1 { "hrs" } else { "hr" };
        if minutes == 0 {
            format!("{hours} {unit}")
        } else {
            format!("{hours} {unit} {minutes} mins")
        }
    } else {
        format!("{minutes} mins")
    }
}
