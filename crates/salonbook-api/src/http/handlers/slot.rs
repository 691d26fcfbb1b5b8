//! Time slot endpoint handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

use salonbook_types::salon::SalonId;
use salonbook_types::slot::{AddSlotRequest, DaySlots, SlotId, TimeSlot};

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::http::response::StatusResponse;
use crate::state::AppState;

/// POST /api/v1/salons/{id}/slots - Publish a bookable window.
pub async fn add_slot(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(salon_id): Path<SalonId>,
    Json(body): Json<AddSlotRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    Ok(Json(state.slots.add_slot(&acting, &salon_id, body).await?))
}

/// GET /api/v1/salons/{id}/slots - Available upcoming slots grouped by date,
/// for the booking page. Public.
pub async fn list_upcoming(
    State(state): State<AppState>,
    Path(salon_id): Path<SalonId>,
) -> Result<Json<Vec<DaySlots>>, AppError> {
    Ok(Json(state.slots.list_upcoming(&salon_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /api/v1/salons/{id}/slots/calendar?from=...&to=... - Every slot in the
/// window, available or not, for the owner calendar. Defaults to the next 30
/// days.
pub async fn calendar(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(salon_id): Path<SalonId>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let from = query.from.unwrap_or_else(|| Utc::now().date_naive());
    let to = query.to.unwrap_or(from + Duration::days(30));
    if to < from {
        return Err(AppError::Validation(
            "'to' date must not precede 'from'".to_string(),
        ));
    }

    let slots = state.slots.list_window(&acting, &salon_id, from, to).await?;
    Ok(Json(slots))
}

/// DELETE /api/v1/slots/{id} - Remove a slot from the calendar.
pub async fn delete_slot(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(slot_id): Path<SlotId>,
) -> Result<Json<StatusResponse>, AppError> {
    state.slots.delete_slot(&acting, &slot_id).await?;
    Ok(Json(StatusResponse::ok_with("time slot deleted")))
}
