//! Ranking subjects (members, yearly events) by their next anniversary.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::date::{CalendarDate, RawDate, parse_calendar_date};
use crate::error::ParishError;
use crate::recurrence::{RecurrenceRules, UpcomingOccurrence, next_occurrence};

/// Something with a yearly date: a member's birthday, a yearly event.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub label: String,
    pub raw: Option<RawDate>,
}

impl Subject {
    pub fn new(label: impl Into<String>, raw: Option<RawDate>) -> Self {
        Self {
            label: label.into(),
            raw,
        }
    }
}

/// A subject placed on the upcoming list. Built for display, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    /// The stored date, as entered
    pub original: CalendarDate,
    pub occurrence: UpcomingOccurrence,
}

/// Project one subject; `Err` means it has no usable date.
pub fn project_subject(
    subject: &Subject,
    today: NaiveDate,
    rules: &RecurrenceRules,
) -> Result<RankedEntry, ParishError> {
    let original = parse_calendar_date(subject.raw.as_ref(), &rules.zone)?;
    let occurrence = next_occurrence(original.anchor(), today, rules.leap_day)?;

    Ok(RankedEntry {
        label: subject.label.clone(),
        original,
        occurrence,
    })
}

/// The `limit` subjects whose anniversary comes soonest.
///
/// Subjects without a usable date are left out. Ties on the day count are
/// broken by label so the output is the same on every call.
pub fn rank_upcoming(
    subjects: &[Subject],
    today: NaiveDate,
    limit: usize,
    rules: &RecurrenceRules,
) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = subjects
        .iter()
        .filter_map(|subject| match project_subject(subject, today, rules) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(label = %subject.label, error = %e, "skipping subject without a usable date");
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.occurrence
            .days_until
            .cmp(&b.occurrence.days_until)
            .then_with(|| a.label.cmp(&b.label))
    });
    ranked.truncate(limit);
    ranked
}
