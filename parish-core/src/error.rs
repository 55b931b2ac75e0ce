//! Error types for parish.

use thiserror::Error;

/// Why a raw date value could not be turned into a `CalendarDate`.
///
/// Callers treat this as "no date available" and skip the subject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("date is empty")]
    EmptyInput,

    #[error("unrecognized date '{0}'")]
    UnparseableInput(String),
}

/// Why a recurrence anchor could not be projected onto a calendar year.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionFailure {
    #[error("invalid anchor: month {month}, day {day}")]
    InvalidAnchor { month: u32, day: u32 },
}

/// Errors that can occur in parish operations.
#[derive(Error, Debug)]
pub enum ParishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Records file error: {0}")]
    Records(String),

    #[error("Unknown time zone '{0}'")]
    TimeZone(String),

    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error(transparent)]
    Projection(#[from] ProjectionFailure),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for parish operations.
pub type ParishResult<T> = Result<T, ParishError>;
