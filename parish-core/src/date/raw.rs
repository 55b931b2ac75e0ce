//! Raw date values as they arrive from records.

use chrono::{DateTime, NaiveDate, Utc};

/// A date value of not-yet-known shape.
///
/// Text is classified once, in [`RawDate::from_text`]: a leading `YYYY-MM-DD`
/// takes the date-only path, which never goes through zone-aware parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDate {
    /// Text starting with `YYYY-MM-DD`, optionally followed by a time part
    DateText(String),
    /// Any other text (RFC 2822, `05/15/1990`, `May 15, 1990`, ...)
    TimestampText(String),
    /// An instant; the calendar day is read in the caller's zone
    NativeInstant(DateTime<Utc>),
    /// A calendar day with no zone attached
    NativeDate(NaiveDate),
}

impl RawDate {
    /// Classify a piece of text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if date_prefix(&text).is_some() {
            RawDate::DateText(text)
        } else {
            RawDate::TimestampText(text)
        }
    }

    /// Classify an optional field, treating blank text as absent.
    pub fn from_field(text: Option<&str>) -> Option<Self> {
        let text = text?.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self::from_text(text))
    }
}

impl From<&str> for RawDate {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for RawDate {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}

impl From<DateTime<Utc>> for RawDate {
    fn from(instant: DateTime<Utc>) -> Self {
        RawDate::NativeInstant(instant)
    }
}

impl From<NaiveDate> for RawDate {
    fn from(date: NaiveDate) -> Self {
        RawDate::NativeDate(date)
    }
}

/// Read the leading `YYYY-MM-DD` of `text` as numbers.
///
/// The prefix must be followed by the end of the text or a time separator
/// (`T`, `t` or a space). The numbers are not range-checked here.
pub(crate) fn date_prefix(text: &str) -> Option<(i32, u32, u32)> {
    let text = text.trim();
    let bytes = text.as_bytes();
    if bytes.len() < 10 {
        return None;
    }

    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if !(digits(0..4) && bytes[4] == b'-' && digits(5..7) && bytes[7] == b'-' && digits(8..10)) {
        return None;
    }

    if !matches!(bytes.get(10), None | Some(b'T' | b't' | b' ')) {
        return None;
    }

    // The first ten bytes are ASCII, so slicing on them is safe
    let year = text[0..4].parse().ok()?;
    let month = text[5..7].parse().ok()?;
    let day = text[8..10].parse().ok()?;
    Some((year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_date_is_date_text() {
        assert!(matches!(RawDate::from_text("1990-05-15"), RawDate::DateText(_)));
    }

    #[test]
    fn timestamp_with_leading_date_is_date_text() {
        assert!(matches!(
            RawDate::from_text("1990-05-15T00:00:00Z"),
            RawDate::DateText(_)
        ));
        assert!(matches!(
            RawDate::from_text("1990-05-15 08:30"),
            RawDate::DateText(_)
        ));
    }

    #[test]
    fn other_shapes_are_timestamp_text() {
        assert!(matches!(RawDate::from_text("05/15/1990"), RawDate::TimestampText(_)));
        assert!(matches!(RawDate::from_text("not-a-date"), RawDate::TimestampText(_)));
        // Trailing garbage glued to the date is not a time separator
        assert!(matches!(RawDate::from_text("1990-05-15Z"), RawDate::TimestampText(_)));
    }

    #[test]
    fn blank_field_is_absent() {
        assert_eq!(RawDate::from_field(None), None);
        assert_eq!(RawDate::from_field(Some("   ")), None);
        assert!(RawDate::from_field(Some(" 1990-05-15 ")).is_some());
    }

    #[test]
    fn date_prefix_reads_numbers_without_range_checks() {
        assert_eq!(date_prefix("2000-12-25"), Some((2000, 12, 25)));
        assert_eq!(date_prefix("2000-13-40T10:00"), Some((2000, 13, 40)));
        assert_eq!(date_prefix("2000-1-5"), None);
        assert_eq!(date_prefix("ééééééééééé"), None);
    }
}
