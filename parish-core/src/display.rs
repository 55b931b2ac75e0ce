//! Presentation helpers.
//!
//! Unlike the ranking, display is lenient: text that can't be read as a date
//! is shown as stored rather than hidden.

use chrono::TimeZone;

use crate::date::{CalendarDate, RawDate, date_prefix, parse_calendar_date};

/// `dd/mm/yyyy` for a calendar date.
pub fn format_date(date: &CalendarDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day, date.month, date.year)
}

/// `dd/mm/yyyy` for a stored date value of any shape.
///
/// A leading `YYYY-MM-DD` is rearranged as text. Anything else goes through
/// the date parser, and is returned unchanged if that fails.
pub fn format_br<Z: TimeZone>(raw: &str, zone: &Z) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some((year, month, day)) = date_prefix(trimmed) {
        return format!("{:02}/{:02}/{:04}", day, month, year);
    }

    match parse_calendar_date(Some(&RawDate::from_text(trimmed)), zone) {
        Ok(date) => format_date(&date),
        Err(_) => raw.to_string(),
    }
}

/// `HH:MM` with zero padding; returned unchanged unless it looks like `H:M`.
pub fn format_time(raw: &str) -> String {
    let mut parts = raw.split(':');
    match (parts.next(), parts.next()) {
        (Some(h), Some(m)) if !h.is_empty() && !m.is_empty() => format!("{:0>2}:{:0>2}", h, m),
        _ => raw.to_string(),
    }
}

/// Cents as Brazilian currency, e.g. `R$ 1.234,56`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let units = (abs / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, c) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{sign}R$ {grouped},{:02}", abs % 100)
}

/// Relative day label (e.g. "Today", "Tomorrow", "In 5 days")
pub fn relative_day(days_until: i64) -> String {
    match days_until {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("In {} days", n),
    }
}
