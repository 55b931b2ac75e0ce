//! Core library for parish.
//!
//! This crate provides what the dashboard needs from stored records:
//! - `date` and `recurrence` for reading stored dates and projecting
//!   birthdays and yearly events onto the next occurrence
//! - `ranking` and `events` for the upcoming lists
//! - `store` for the paginated record source the lists are read from
//! - `dashboard` to put it all together

pub mod config;
pub mod dashboard;
pub mod date;
pub mod display;
pub mod error;
pub mod events;
pub mod ledger;
pub mod ranking;
pub mod records;
pub mod recurrence;
pub mod store;
