//! Appointment repository trait definition.
//!
//! This trait carries the two atomic seams of the booking engine: reserving a
//! slot together with inserting its appointment, and cancelling an
//! appointment together with releasing its slot. Implementations must run
//! each of those pairs in a single transaction.

use chrono::NaiveDate;
use salonbook_types::appointment::{Appointment, AppointmentId, AppointmentStatus};
use salonbook_types::error::RepositoryError;
use salonbook_types::salon::SalonId;
use salonbook_types::slot::SlotId;
use salonbook_types::user::UserId;

/// Date and price of one completed visit, for earnings summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedVisit {
    pub date: NaiveDate,
    pub price: f64,
}

/// Repository trait for appointment persistence.
pub trait AppointmentRepository: Send + Sync {
    /// Atomically reserve the slot and insert the appointment.
    ///
    /// The reservation is a compare-and-set: it succeeds only while the slot
    /// is still available. Losing the CAS returns
    /// [`RepositoryError::Conflict`] and leaves nothing written -- under
    /// concurrent bookings for the same slot exactly one caller wins.
    fn create_booked(
        &self,
        appointment: &Appointment,
        slot_id: &SlotId,
    ) -> impl std::future::Future<Output = Result<Appointment, RepositoryError>> + Send;

    /// Get an appointment by id.
    fn get_by_id(
        &self,
        id: &AppointmentId,
    ) -> impl std::future::Future<Output = Result<Option<Appointment>, RepositoryError>> + Send;

    /// Set the lifecycle status. Lifecycle legality is checked by the
    /// booking engine, not here.
    fn set_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Atomically set the appointment to cancelled and release the slot
    /// matched by salon + date + start_time == appointment time. The slot
    /// release is a silent no-op when no slot matches.
    fn cancel_and_release(
        &self,
        appointment: &Appointment,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Persist the payment fields of an appointment.
    /// Persist payment fields, conditional on the deposit being unpaid.
    /// `Conflict` when it was already paid, so a concurrent double charge
    /// loses the same way a concurrent booking does.
    fn record_payment(
        &self,
        appointment: &Appointment,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All appointments of a customer, newest date and time first.
    fn list_for_customer(
        &self,
        customer_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>, RepositoryError>> + Send;

    /// Appointments of a salon in a given status.
    fn list_for_salon(
        &self,
        salon_id: &SalonId,
        status: AppointmentStatus,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>, RepositoryError>> + Send;

    /// Dates and service prices of all completed visits for a salon.
    fn completed_visits(
        &self,
        salon_id: &SalonId,
    ) -> impl std::future::Future<Output = Result<Vec<CompletedVisit>, RepositoryError>> + Send;

    /// Whether a completed appointment exists for the (customer, salon) pair.
    fn exists_completed(
        &self,
        customer_id: &UserId,
        salon_id: &SalonId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
