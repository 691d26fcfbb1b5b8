//! Booking engine: turns booking requests into appointments and walks them
//! through their lifecycle.
//!
//! The appointment state machine:
//!
//! ```text
//! pending --confirm--> confirmed --complete--> completed
//! pending --cancel--> cancelled
//! confirmed --cancel--> cancelled
//! ```
//!
//! Booking reserves the time slot and inserts the appointment as one atomic
//! unit; under concurrent requests for the same slot exactly one succeeds
//! and the loser observes `SlotUnavailable`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use salonbook_types::appointment::{
    Appointment, AppointmentId, AppointmentStatus, BookingOutcome, BookingRequest, PaymentRequest,
    PaymentStatus, round2, DEPOSIT_RATE, DISCOUNT_RATE,
};
use salonbook_types::error::BookingError;
use salonbook_types::notification::NotificationKind;
use salonbook_types::salon::{Salon, SalonId};
use salonbook_types::user::CurrentUser;

use crate::notify::{NotificationSink, Notifier};
use crate::repository::appointment::AppointmentRepository;
use crate::repository::salon::SalonRepository;
use crate::repository::service::ServiceRepository;
use crate::repository::slot::SlotRepository;

/// A customer's appointments split around today.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerAppointments {
    pub upcoming: Vec<Appointment>,
    pub past: Vec<Appointment>,
}

/// Completed-visit earnings for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthEarnings {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

/// Owner dashboard earnings: the running month plus full history.
#[derive(Debug, Clone, Serialize)]
pub struct EarningsSummary {
    pub current_month: f64,
    /// Newest month first.
    pub history: Vec<MonthEarnings>,
}

/// Service orchestrating the appointment lifecycle.
pub struct BookingService<A, SV, SA, L, N>
where
    A: AppointmentRepository,
    SV: ServiceRepository,
    SA: SalonRepository,
    L: SlotRepository,
    N: NotificationSink,
{
    appointment_repo: A,
    service_repo: SV,
    salon_repo: SA,
    slot_repo: L,
    notifier: Notifier<N>,
}

impl<A, SV, SA, L, N> BookingService<A, SV, SA, L, N>
where
    A: AppointmentRepository,
    SV: ServiceRepository,
    SA: SalonRepository,
    L: SlotRepository,
    N: NotificationSink,
{
    pub fn new(
        appointment_repo: A,
        service_repo: SV,
        salon_repo: SA,
        slot_repo: L,
        sink: N,
    ) -> Self {
        Self {
            appointment_repo,
            service_repo,
            salon_repo,
            slot_repo,
            notifier: Notifier::new(sink),
        }
    }

    async fn salon(&self, id: &SalonId) -> Result<Salon, BookingError> {
        self.salon_repo
            .get_by_id(id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?
            .ok_or(BookingError::NotFound)
    }

    async fn appointment(&self, id: &AppointmentId) -> Result<Appointment, BookingError> {
        self.appointment_repo
            .get_by_id(id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?
            .ok_or(BookingError::NotFound)
    }

    fn check_transition(
        current: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<(), BookingError> {
        if current.can_transition_to(next) {
            Ok(())
        } else {
            Err(BookingError::InvalidStateTransition {
                from: current,
                to: next,
            })
        }
    }

    /// Book an appointment: validate the service, reserve a covering slot,
    /// compute deposit pricing, insert the appointment, notify the owner.
    ///
    /// When `pay_deposit` is set the outcome directs the caller into the
    /// payment flow; the deposit itself is recorded later through
    /// [`BookingService::record_payment`].
    pub async fn book(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        request: BookingRequest,
    ) -> Result<BookingOutcome, BookingError> {
        if !acting.is_customer() {
            return Err(BookingError::Forbidden(
                "only customers can book appointments".to_string(),
            ));
        }

        let service = self
            .service_repo
            .get_by_id(&request.service_id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?
            .filter(|s| s.salon_id == *salon_id)
            .ok_or(BookingError::NotFound)?;

        let salon = self.salon(salon_id).await?;

        let slot = self
            .slot_repo
            .find_available(salon_id, request.date, request.time)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?
            .ok_or(BookingError::SlotUnavailable)?;

        let (deposit_amount, discounted_price) = if request.pay_deposit {
            (
                round2(service.price * DEPOSIT_RATE),
                round2(service.price * DISCOUNT_RATE),
            )
        } else {
            (0.0, 0.0)
        };

        let appointment = Appointment {
            id: AppointmentId::new(),
            customer_id: acting.id,
            salon_id: *salon_id,
            service_id: service.id,
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Pending,
            has_paid_deposit: false,
            deposit_amount,
            payment_method: None,
            payment_status: PaymentStatus::Unpaid,
            discounted_price,
            transaction_id: None,
            created_at: chrono::Utc::now(),
        };

        // Reserve + insert is one transaction; a lost CAS means another
        // request took the slot between find_available and here.
        let appointment = self
            .appointment_repo
            .create_booked(&appointment, &slot.id)
            .await
            .map_err(|e| match e {
                salonbook_types::error::RepositoryError::Conflict(_) => {
                    BookingError::SlotUnavailable
                }
                other => BookingError::Storage(other.to_string()),
            })?;

        self.notifier
            .send(
                &salon.owner_id,
                "New appointment booking received",
                NotificationKind::Appointment,
                Some(appointment.id.0),
            )
            .await;

        tracing::info!(
            appointment = %appointment.id,
            salon = %salon_id,
            pay_deposit = request.pay_deposit,
            "appointment booked"
        );

        Ok(BookingOutcome {
            payment_required: request.pay_deposit,
            appointment,
        })
    }

    /// Confirm a pending appointment. Owner-only.
    pub async fn confirm(
        &self,
        acting: &CurrentUser,
        appointment_id: &AppointmentId,
    ) -> Result<Appointment, BookingError> {
        let mut appointment = self.appointment(appointment_id).await?;
        let salon = self.salon(&appointment.salon_id).await?;

        if !acting.is_salon_owner() || salon.owner_id != acting.id {
            return Err(BookingError::Forbidden(
                "only the salon owner can confirm appointments".to_string(),
            ));
        }
        Self::check_transition(appointment.status, AppointmentStatus::Confirmed)?;

        self.appointment_repo
            .set_status(appointment_id, AppointmentStatus::Confirmed)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        appointment.status = AppointmentStatus::Confirmed;

        self.notifier
            .send(
                &appointment.customer_id,
                &format!("Your appointment at {} has been confirmed!", salon.name),
                NotificationKind::Appointment,
                Some(appointment.id.0),
            )
            .await;

        Ok(appointment)
    }

    /// Cancel a pending or confirmed appointment and release its slot.
    /// Permitted for the booking customer and the owning salon owner; the
    /// counterparty is notified.
    pub async fn cancel(
        &self,
        acting: &CurrentUser,
        appointment_id: &AppointmentId,
    ) -> Result<Appointment, BookingError> {
        let mut appointment = self.appointment(appointment_id).await?;
        let salon = self.salon(&appointment.salon_id).await?;

        let is_booking_customer = acting.is_customer() && appointment.customer_id == acting.id;
        let is_owning_owner = acting.is_salon_owner() && salon.owner_id == acting.id;
        if !is_booking_customer && !is_owning_owner {
            return Err(BookingError::Forbidden(
                "not a party to this appointment".to_string(),
            ));
        }
        Self::check_transition(appointment.status, AppointmentStatus::Cancelled)?;

        // Status change and slot release are one transaction.
        self.appointment_repo
            .cancel_and_release(&appointment)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        appointment.status = AppointmentStatus::Cancelled;

        if is_booking_customer {
            self.notifier
                .send(
                    &salon.owner_id,
                    "An appointment has been cancelled by the customer",
                    NotificationKind::Appointment,
                    Some(appointment.id.0),
                )
                .await;
        } else {
            self.notifier
                .send(
                    &appointment.customer_id,
                    &format!(
                        "Your appointment at {} has been cancelled by the salon",
                        salon.name
                    ),
                    NotificationKind::Appointment,
                    Some(appointment.id.0),
                )
                .await;
        }

        Ok(appointment)
    }

    /// Mark a confirmed appointment as completed. Owner-only. The customer
    /// is notified and prompted to leave a review.
    pub async fn complete(
        &self,
        acting: &CurrentUser,
        appointment_id: &AppointmentId,
    ) -> Result<Appointment, BookingError> {
        let mut appointment = self.appointment(appointment_id).await?;
        let salon = self.salon(&appointment.salon_id).await?;

        if !acting.is_salon_owner() || salon.owner_id != acting.id {
            return Err(BookingError::Forbidden(
                "only the salon owner can complete appointments".to_string(),
            ));
        }
        Self::check_transition(appointment.status, AppointmentStatus::Completed)?;

        self.appointment_repo
            .set_status(appointment_id, AppointmentStatus::Completed)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        appointment.status = AppointmentStatus::Completed;

        self.notifier
            .send(
                &appointment.customer_id,
                &format!(
                    "Your appointment at {} has been marked as completed. Please leave a review!",
                    salon.name
                ),
                NotificationKind::Appointment,
                Some(appointment.id.0),
            )
            .await;

        Ok(appointment)
    }

    /// Record the deposit payment for an appointment.
    ///
    /// Idempotency guard: a deposit can be paid at most once; a second call
    /// fails without touching the stored amounts. Deposit and discount are
    /// recomputed from the service's current price at payment time.
    pub async fn record_payment(
        &self,
        acting: &CurrentUser,
        appointment_id: &AppointmentId,
        request: PaymentRequest,
    ) -> Result<Appointment, BookingError> {
        let mut appointment = self.appointment(appointment_id).await?;

        if !acting.is_customer() || appointment.customer_id != acting.id {
            return Err(BookingError::Forbidden(
                "only the booking customer can pay the deposit".to_string(),
            ));
        }
        if appointment.has_paid_deposit {
            return Err(BookingError::DepositAlreadyPaid);
        }
        if request.payment_method.trim().is_empty() || request.transaction_id.trim().is_empty() {
            return Err(BookingError::Validation(
                "payment method and transaction id are required".to_string(),
            ));
        }

        let service = self
            .service_repo
            .get_by_id(&appointment.service_id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?
            .ok_or(BookingError::NotFound)?;
        let salon = self.salon(&appointment.salon_id).await?;

        appointment.has_paid_deposit = true;
        appointment.deposit_amount = round2(service.price * DEPOSIT_RATE);
        appointment.discounted_price = round2(service.price * DISCOUNT_RATE);
        appointment.payment_method = Some(request.payment_method);
        appointment.payment_status = PaymentStatus::Completed;
        appointment.transaction_id = Some(request.transaction_id);

        self.appointment_repo
            .record_payment(&appointment)
            .await
            .map_err(|e| match e {
                salonbook_types::error::RepositoryError::Conflict(_) => {
                    BookingError::DepositAlreadyPaid
                }
                other => BookingError::Storage(other.to_string()),
            })?;

        self.notifier
            .send(
                &salon.owner_id,
                "Deposit payment received for an appointment",
                NotificationKind::Payment,
                Some(appointment.id.0),
            )
            .await;

        Ok(appointment)
    }

    /// Fetch one appointment, visible only to its parties.
    pub async fn get(
        &self,
        acting: &CurrentUser,
        appointment_id: &AppointmentId,
    ) -> Result<Appointment, BookingError> {
        let appointment = self.appointment(appointment_id).await?;
        let salon = self.salon(&appointment.salon_id).await?;
        if appointment.customer_id != acting.id && salon.owner_id != acting.id {
            return Err(BookingError::Forbidden(
                "not a party to this appointment".to_string(),
            ));
        }
        Ok(appointment)
    }

    /// A customer's appointments, split into upcoming (today or later) and
    /// past, each newest first.
    pub async fn customer_appointments(
        &self,
        acting: &CurrentUser,
        today: NaiveDate,
    ) -> Result<CustomerAppointments, BookingError> {
        let all = self
            .appointment_repo
            .list_for_customer(&acting.id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?;

        let (upcoming, past) = all.into_iter().partition(|a| a.date >= today);
        Ok(CustomerAppointments { upcoming, past })
    }

    /// A salon's appointments in one status. Owner-only.
    pub async fn salon_appointments(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, BookingError> {
        let salon = self.salon(salon_id).await?;
        if !acting.is_salon_owner() || salon.owner_id != acting.id {
            return Err(BookingError::Forbidden(
                "only the salon owner can list salon appointments".to_string(),
            ));
        }
        self.appointment_repo
            .list_for_salon(salon_id, status)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))
    }

    /// Earnings over completed visits, grouped per calendar month.
    /// Owner-only.
    pub async fn earnings(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        today: NaiveDate,
    ) -> Result<EarningsSummary, BookingError> {
        let salon = self.salon(salon_id).await?;
        if !acting.is_salon_owner() || salon.owner_id != acting.id {
            return Err(BookingError::Forbidden(
                "only the salon owner can view earnings".to_string(),
            ));
        }

        let visits = self
            .appointment_repo
            .completed_visits(salon_id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?;

        let mut history: Vec<MonthEarnings> = Vec::new();
        for visit in &visits {
            let (year, month) = (visit.date.year(), visit.date.month());
            match history.iter_mut().find(|m| m.year == year && m.month == month) {
                Some(entry) => entry.total = round2(entry.total + visit.price),
                None => history.push(MonthEarnings {
                    year,
                    month,
                    total: round2(visit.price),
                }),
            }
        }
        history.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));

        let current_month = history
            .iter()
            .find(|m| m.year == today.year() && m.month == today.month())
            .map(|m| m.total)
            .unwrap_or(0.0);

        Ok(EarningsSummary {
            current_month,
            history,
        })
    }
}
