use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::salon::SalonId;

/// Unique identifier for a time slot, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub Uuid);

impl SlotId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SlotId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A fixed-date, fixed-time-range calendar unit belonging to one salon.
///
/// A slot can be booked once: booking flips `is_available` to false, and a
/// cancellation flips it back. Invariant (enforced by the slot ledger): no two
/// slots for the same salon and date overlap in `[start, end)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: SlotId,
    pub salon_id: SalonId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl TimeSlot {
    /// Inclusive-boundary match used when booking: a slot running 09:00-09:30
    /// accepts a requested time of exactly 09:30.
    pub fn covers(&self, time: NaiveTime) -> bool {
        self.start_time <= time && time <= self.end_time
    }

    /// Overlap test against another interval on the same date:
    /// `start < other.end && end > other.start`.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && self.end_time > start
    }
}

/// One `{start, end}` pair inside a [`DaySlots`] group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTime {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Available slots for one date, as shown on the booking page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlots {
    pub date: NaiveDate,
    /// Weekday name for display, e.g. "Monday".
    pub day_name: String,
    pub times: Vec<SlotTime>,
}

impl DaySlots {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            day_name: weekday_name(date),
            times: Vec::new(),
        }
    }
}

/// Full English weekday name for a date.
pub fn weekday_name(date: NaiveDate) -> String {
    match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
    .to_string()
}

/// Request to publish a new time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSlotRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
