//! Appointment lifecycle endpoint handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use salonbook_core::service::booking::{CustomerAppointments, EarningsSummary};
use salonbook_types::appointment::{
    Appointment, AppointmentId, AppointmentStatus, BookingOutcome, BookingRequest, PaymentRequest,
};
use salonbook_types::salon::SalonId;

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::state::AppState;

/// POST /api/v1/salons/{id}/appointments - Book a slot at the salon.
pub async fn book(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(salon_id): Path<SalonId>,
    Json(body): Json<BookingRequest>,
) -> Result<Json<BookingOutcome>, AppError> {
    Ok(Json(state.booking.book(&acting, &salon_id, body).await?))
}

/// GET /api/v1/appointments/{id} - Fetch one appointment. Visible to its
/// customer and the salon owner.
pub async fn get(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(state.booking.get(&acting, &appointment_id).await?))
}

/// POST /api/v1/appointments/{id}/confirm - Owner accepts a pending booking.
pub async fn confirm(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(state.booking.confirm(&acting, &appointment_id).await?))
}

/// POST /api/v1/appointments/{id}/cancel - Cancel and release the slot.
pub async fn cancel(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(state.booking.cancel(&acting, &appointment_id).await?))
}

/// POST /api/v1/appointments/{id}/complete - Owner marks the visit done.
pub async fn complete(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(state.booking.complete(&acting, &appointment_id).await?))
}

/// POST /api/v1/appointments/{id}/payment - Record the deposit payment.
pub async fn record_payment(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(appointment_id): Path<AppointmentId>,
    Json(body): Json<PaymentRequest>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(
        state
            .booking
            .record_payment(&acting, &appointment_id, body)
            .await?,
    ))
}

/// GET /api/v1/me/appointments - The caller's bookings split into upcoming
/// and past.
pub async fn my_appointments(
    State(state): State<AppState>,
    Identity(acting): Identity,
) -> Result<Json<CustomerAppointments>, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(state.booking.customer_appointments(&acting, today).await?))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// GET /api/v1/salons/{id}/appointments?status=... - Owner dashboard list,
/// filtered by lifecycle state. Defaults to pending.
pub async fn salon_appointments(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(salon_id): Path<SalonId>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = match query.status.as_deref() {
        Some(raw) => raw
            .parse::<AppointmentStatus>()
            .map_err(AppError::Validation)?,
        None => AppointmentStatus::Pending,
    };

    Ok(Json(
        state
            .booking
            .salon_appointments(&acting, &salon_id, status)
            .await?,
    ))
}

/// GET /api/v1/salons/{id}/earnings - Completed-visit earnings per month.
pub async fn earnings(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(salon_id): Path<SalonId>,
) -> Result<Json<EarningsSummary>, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(state.booking.earnings(&acting, &salon_id, today).await?))
}
