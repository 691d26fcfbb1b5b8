//! Service menu endpoint handlers.

use axum::extract::{Path, State};
use axum::Json;

use salonbook_types::salon::SalonId;
use salonbook_types::service::{Service, ServiceId, ServiceRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::state::AppState;

/// POST /api/v1/salons/{id}/services - Add a service to the menu.
pub async fn add_service(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(salon_id): Path<SalonId>,
    Json(body): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    Ok(Json(state.catalog.add_service(&acting, &salon_id, body).await?))
}

/// GET /api/v1/salons/{id}/services - The salon's service menu.
pub async fn list_services(
    State(state): State<AppState>,
    Path(salon_id): Path<SalonId>,
) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(state.catalog.list_services(&salon_id).await?))
}

/// PUT /api/v1/services/{id} - Replace a service's fields.
pub async fn update_service(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(service_id): Path<ServiceId>,
    Json(body): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    Ok(Json(
        state.catalog.update_service(&acting, &service_id, body).await?,
    ))
}

/// DELETE /api/v1/services/{id} - Remove a service from the menu.
pub async fn delete_service(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(service_id): Path<ServiceId>,
) -> Result<axum::http::StatusCode, AppError> {
    state.catalog.delete_service(&acting, &service_id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
