//! Date inputs and their normalization.

mod calendar_date;
mod raw;

pub use calendar_date::{CalendarDate, parse_calendar_date};
pub use raw::RawDate;

pub(crate) use calendar_date::max_day_in_month;
pub(crate) use raw::date_prefix;

use chrono::{NaiveDate, TimeZone, Utc};

/// The current calendar day in `zone`.
///
/// This is the only clock read in the crate. Capture it once per dashboard
/// load and pass it down, so every subject is compared against the same day.
pub fn today_in<Z: TimeZone>(zone: &Z) -> NaiveDate {
    Utc::now().with_timezone(zone).date_naive()
}
