//! Yearly recurrence: projecting a month/day onto the next matching day.
//!
//! Birthdays and yearly events are stored as full dates, but only their
//! month and day recur. Projection is always done on calendar days
//! (`NaiveDate`), never on timestamps, so a non-zero time of day on "now"
//! can't push today's anniversary into next year.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::date::max_day_in_month;
use crate::error::ProjectionFailure;

/// The month/day pair that recurs every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecurrenceAnchor {
    pub month: u32,
    pub day: u32,
}

/// Where a Feb 29 anchor lands in a year without Feb 29.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeapDayPolicy {
    /// Last day of February
    #[default]
    Feb28,
    /// First day of March
    Mar1,
}

impl LeapDayPolicy {
    fn resolve(self, year: i32) -> Option<NaiveDate> {
        match self {
            LeapDayPolicy::Feb28 => NaiveDate::from_ymd_opt(year, 2, 28),
            LeapDayPolicy::Mar1 => NaiveDate::from_ymd_opt(year, 3, 1),
        }
    }
}

/// How raw dates are read and how anniversaries are projected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecurrenceRules {
    /// Zone instants are read in
    pub zone: Tz,
    pub leap_day: LeapDayPolicy,
}

impl Default for RecurrenceRules {
    fn default() -> Self {
        Self {
            zone: Tz::UTC,
            leap_day: LeapDayPolicy::default(),
        }
    }
}

/// The next occurrence of an anchor, on or after today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpcomingOccurrence {
    pub date: NaiveDate,
    /// Whole days from today; 0 when the occurrence is today
    pub days_until: i64,
}

impl RecurrenceAnchor {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    fn validate(&self) -> Result<(), ProjectionFailure> {
        let valid = (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= max_day_in_month(self.month);
        if valid {
            Ok(())
        } else {
            Err(ProjectionFailure::InvalidAnchor {
                month: self.month,
                day: self.day,
            })
        }
    }

    /// The concrete day this anchor falls on in `year`.
    pub fn in_year(&self, year: i32, policy: LeapDayPolicy) -> Result<NaiveDate, ProjectionFailure> {
        self.validate()?;

        let date = match NaiveDate::from_ymd_opt(year, self.month, self.day) {
            Some(date) => Some(date),
            None if self.month == 2 && self.day == 29 => policy.resolve(year),
            None => None,
        };

        date.ok_or(ProjectionFailure::InvalidAnchor {
            month: self.month,
            day: self.day,
        })
    }
}

/// Project `anchor` onto the first matching day on or after `today`.
///
/// An anchor that falls on `today` yields `days_until == 0`; one that
/// already passed this year rolls over to next year.
pub fn next_occurrence(
    anchor: RecurrenceAnchor,
    today: NaiveDate,
    policy: LeapDayPolicy,
) -> Result<UpcomingOccurrence, ProjectionFailure> {
    let mut candidate = anchor.in_year(today.year(), policy)?;

    if candidate < today {
        candidate = anchor.in_year(today.year() + 1, policy)?;
    }

    Ok(UpcomingOccurrence {
        date: candidate,
        days_until: (candidate - today).num_days(),
    })
}
