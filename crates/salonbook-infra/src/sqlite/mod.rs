//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools. Dates are stored as `YYYY-MM-DD`, times as
//! `HH:MM:SS`, and timestamps as RFC 3339, all of which compare
//! lexicographically in chronological order.

pub mod appointment;
pub mod employee;
pub mod notification;
pub mod pool;
pub mod review;
pub mod salon;
pub mod service;
pub mod slot;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use salonbook_types::error::RepositoryError;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| RepositoryError::Query(format!("invalid date '{s}': {e}")))
}

pub(crate) fn parse_time(s: &str) -> Result<NaiveTime, RepositoryError> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .map_err(|e| RepositoryError::Query(format!("invalid time '{s}': {e}")))
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime '{s}': {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(crate) fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}
