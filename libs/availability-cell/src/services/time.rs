use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Malformed time of day: {0:?}")]
    Malformed(String),

    #[error("Time of day out of range: {0:?}")]
    OutOfRange(String),

    #[error("Malformed booking timestamp: {0:?}")]
    MalformedTimestamp(String),
}

/// Parses `"HH:MM"` or `"HH:MM:SS"` into minutes since midnight.
///
/// Seconds are truncated. `"24:00"` is accepted so a shift can end at
/// midnight; anything later is rejected.
pub fn minutes_of(label: &str) -> Result<u32, TimeParseError> {
    let trimmed = label.trim();
    let mut parts = trimmed.split(':');

    let hours = parts.next().and_then(parse_field);
    let minutes = parts.next().and_then(parse_field);
    let seconds = match parts.next() {
        // Postgres may render fractional seconds ("07:00:00.000")
        Some(raw) => raw.split('.').next().and_then(parse_field),
        None => Some(0),
    };

    let (hours, minutes, seconds) = match (hours, minutes, seconds, parts.next()) {
        (Some(h), Some(m), Some(s), None) => (h, m, s),
        _ => return Err(TimeParseError::Malformed(label.to_string())),
    };

    if minutes >= 60 || seconds >= 60 {
        return Err(TimeParseError::OutOfRange(label.to_string()));
    }

    let total = hours * 60 + minutes;
    if total > MINUTES_PER_DAY || (total == MINUTES_PER_DAY && seconds > 0) {
        return Err(TimeParseError::OutOfRange(label.to_string()));
    }

    Ok(total)
}

/// Formats minutes since midnight as zero-padded `"HH:MM"`.
pub fn label_of(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn parse_field(raw: &str) -> Option<u32> {
    if raw.len() != 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Minute-resolution time of day. Ordering is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub fn from_minutes(minutes: u32) -> Result<Self, TimeParseError> {
        if minutes > MINUTES_PER_DAY {
            return Err(TimeParseError::OutOfRange(minutes.to_string()));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn label(&self) -> String {
        label_of(self.0)
    }

    /// Time-of-day component of a stored `booking_time`.
    ///
    /// Offset-carrying timestamps keep the wall-clock time in their own
    /// offset; naive timestamps are taken as written.
    pub fn of_booking_time(raw: &str) -> Result<Self, TimeParseError> {
        parse_booking_timestamp(raw).map(|timestamp| Self::from(timestamp.time()))
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self(time.hour() * 60 + time.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        minutes_of(s).map(Self)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub fn parse_booking_timestamp(raw: &str) -> Result<NaiveDateTime, TimeParseError> {
    let trimmed = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_local());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| TimeParseError::MalformedTimestamp(raw.to_string()))
}

/// serde adapter for `booking_time` columns.
pub fn deserialize_booking_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_booking_timestamp(&raw).map_err(serde::de::Error::custom)
}
