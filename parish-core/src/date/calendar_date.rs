//! Calendar days normalized from raw record values.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::raw::{RawDate, date_prefix};
use crate::error::ParseFailure;
use crate::recurrence::RecurrenceAnchor;

/// Naive date-time layouts tried for text that doesn't start with `YYYY-MM-DD`.
const DATETIME_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
];

/// Naive date layouts tried after the date-time ones.
const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// A year/month/day triple with no time-of-day and no zone.
///
/// `day` is checked against the longest the month can ever be, so Feb 29 is
/// kept as written even for non-leap years. Whether it exists is decided when
/// the date is projected onto a concrete year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > max_day_in_month(month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// The yearly recurrence point of this date.
    pub fn anchor(&self) -> RecurrenceAnchor {
        RecurrenceAnchor {
            month: self.month,
            day: self.day,
        }
    }

    /// The concrete day, if it exists (Feb 29 of a non-leap year doesn't).
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Longest a month can be in any year.
pub(crate) fn max_day_in_month(month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 29,
        _ => 0,
    }
}

/// Normalize a raw date value into a `CalendarDate`.
///
/// `zone` is the local zone: instants (native or parsed from offset-carrying
/// text) are read as the calendar day they fall on there. Text that starts
/// with `YYYY-MM-DD` is read literally and never touches `zone`.
pub fn parse_calendar_date<Z: TimeZone>(
    raw: Option<&RawDate>,
    zone: &Z,
) -> Result<CalendarDate, ParseFailure> {
    let Some(raw) = raw else {
        return Err(ParseFailure::EmptyInput);
    };

    match raw {
        RawDate::DateText(text) => parse_date_text(text),
        RawDate::TimestampText(text) => parse_timestamp_text(text, zone),
        RawDate::NativeInstant(instant) => Ok(instant.with_timezone(zone).date_naive().into()),
        RawDate::NativeDate(date) => Ok((*date).into()),
    }
}

fn parse_date_text(text: &str) -> Result<CalendarDate, ParseFailure> {
    if text.trim().is_empty() {
        return Err(ParseFailure::EmptyInput);
    }

    date_prefix(text)
        .and_then(|(year, month, day)| CalendarDate::new(year, month, day))
        .ok_or_else(|| ParseFailure::UnparseableInput(text.to_string()))
}

fn parse_timestamp_text<Z: TimeZone>(text: &str, zone: &Z) -> Result<CalendarDate, ParseFailure> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseFailure::EmptyInput);
    }

    // Text that still carries a date prefix (e.g. built by hand) keeps the literal path
    if date_prefix(text).is_some() {
        return parse_date_text(text);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(zone).date_naive().into());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(zone).date_naive().into());
    }

    // Naive values are already wall-clock values in the local zone
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt.date().into());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date.into());
        }
    }

    Err(ParseFailure::UnparseableInput(text.to_string()))
}
