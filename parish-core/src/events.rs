//! Upcoming events for the dashboard.
//!
//! One-off events are listed from today onwards. Yearly events (church
//! anniversaries and the like) are projected the same way birthdays are.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;

use crate::date::{RawDate, parse_calendar_date};
use crate::records::{EventRecord, Recurrence};
use crate::recurrence::{RecurrenceRules, next_occurrence};

/// An event placed on the upcoming list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEvent {
    pub title: String,
    pub location: Option<String>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub days_until: i64,
    pub recurrence: Recurrence,
    pub attended: bool,
}

impl UpcomingEvent {
    pub fn label(&self) -> String {
        match &self.location {
            Some(location) => format!("{} • {}", self.title, location),
            None => self.title.clone(),
        }
    }
}

/// Parse a time of day such as `19:00`, `9:5` or `19:00:00`.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let mut parts = raw.trim().split(':');
    let hour = parts.next()?.trim().parse().ok()?;
    let minute = parts.next()?.trim().parse().ok()?;
    let second = match parts.next() {
        Some(s) => s.trim().parse().ok()?,
        None => 0,
    };
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn place(event: &EventRecord, today: NaiveDate, rules: &RecurrenceRules) -> Option<UpcomingEvent> {
    if event.title.trim().is_empty() {
        return None;
    }

    let raw = RawDate::from_field(event.date.as_deref());
    let stored = match parse_calendar_date(raw.as_ref(), &rules.zone) {
        Ok(date) => date,
        Err(e) => {
            debug!(title = %event.title, error = %e, "skipping event without a usable date");
            return None;
        }
    };

    let date = match event.recurrence {
        Recurrence::Once => stored.to_naive().filter(|date| *date >= today)?,
        Recurrence::Yearly => match next_occurrence(stored.anchor(), today, rules.leap_day) {
            Ok(occurrence) => occurrence.date,
            Err(e) => {
                debug!(title = %event.title, error = %e, "skipping yearly event");
                return None;
            }
        },
    };

    let location = event
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    Some(UpcomingEvent {
        title: event.title.clone(),
        location,
        date,
        time: event.time.as_deref().and_then(parse_time_of_day),
        days_until: (date - today).num_days(),
        recurrence: event.recurrence,
        attended: event.attended,
    })
}

/// The next `limit` events on or after `today`.
///
/// Same-day events are ordered untimed first, then by time, then by label.
pub fn upcoming_events(
    events: &[EventRecord],
    today: NaiveDate,
    limit: usize,
    rules: &RecurrenceRules,
) -> Vec<UpcomingEvent> {
    let mut upcoming: Vec<UpcomingEvent> = events
        .iter()
        .filter_map(|event| place(event, today, rules))
        .collect();

    upcoming.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.time.cmp(&b.time))
            .then_with(|| a.label().cmp(&b.label()))
    });
    upcoming.truncate(limit);
    upcoming
}
