//! Time slot repository trait definition.

use chrono::{NaiveDate, NaiveTime};
use salonbook_types::error::RepositoryError;
use salonbook_types::salon::SalonId;
use salonbook_types::slot::{SlotId, TimeSlot};

/// Repository trait for the per-salon slot calendar.
///
/// Booking-side mutation (reserving a slot together with creating its
/// appointment) is deliberately NOT here: that atomic unit lives on
/// [`AppointmentRepository`](super::appointment::AppointmentRepository) so a
/// single transaction can span both tables.
pub trait SlotRepository: Send + Sync {
    /// Insert a new slot.
    fn insert(
        &self,
        slot: &TimeSlot,
    ) -> impl std::future::Future<Output = Result<TimeSlot, RepositoryError>> + Send;

    /// Get a slot by id.
    fn get_by_id(
        &self,
        id: &SlotId,
    ) -> impl std::future::Future<Output = Result<Option<TimeSlot>, RepositoryError>> + Send;

    /// Find any slot for the salon and date whose interval overlaps
    /// `[start, end)`, regardless of availability.
    fn find_overlapping(
        &self,
        salon_id: &SalonId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> impl std::future::Future<Output = Result<Option<TimeSlot>, RepositoryError>> + Send;

    /// Find the available slot covering `time` with inclusive boundaries
    /// (`start <= time <= end`).
    fn find_available(
        &self,
        salon_id: &SalonId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> impl std::future::Future<Output = Result<Option<TimeSlot>, RepositoryError>> + Send;

    /// List available slots from `from_date` onward, ordered by date then
    /// start time.
    fn list_available_from(
        &self,
        salon_id: &SalonId,
        from_date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<TimeSlot>, RepositoryError>> + Send;

    /// List every slot (available or not) within an inclusive date range,
    /// ordered by date then start time.
    fn list_window(
        &self,
        salon_id: &SalonId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<TimeSlot>, RepositoryError>> + Send;

    /// Mark the slot whose start time equals `start_time` for that salon and
    /// date as available again. Silently does nothing when no slot matches.
    fn release(
        &self,
        salon_id: &SalonId,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a slot by id.
    fn delete(
        &self,
        id: &SlotId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
