//! Salon endpoint handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use salonbook_core::service::review::RatingSummary;
use salonbook_types::employee::Employee;
use salonbook_types::salon::{CreateSalonRequest, Salon, SalonId, SalonImage, UpdateSalonRequest};
use salonbook_types::service::Service;

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::state::AppState;

/// Everything the salon detail page needs in one response.
#[derive(Debug, Serialize)]
pub struct SalonDetail {
    pub salon: Salon,
    pub services: Vec<Service>,
    pub employees: Vec<Employee>,
    pub images: Vec<SalonImage>,
    pub rating: RatingSummary,
}

/// POST /api/v1/salons - Register a salon listing.
pub async fn create_salon(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Json(body): Json<CreateSalonRequest>,
) -> Result<Json<Salon>, AppError> {
    let salon = state.catalog.create_salon(&acting, body).await?;
    Ok(Json(salon))
}

/// GET /api/v1/salons - Browse all salons.
pub async fn list_salons(State(state): State<AppState>) -> Result<Json<Vec<Salon>>, AppError> {
    Ok(Json(state.catalog.list_salons().await?))
}

/// GET /api/v1/salons/{id} - Salon detail with services, staff, images, and
/// rating summary.
pub async fn get_salon(
    State(state): State<AppState>,
    Path(id): Path<SalonId>,
) -> Result<Json<SalonDetail>, AppError> {
    let salon = state.catalog.get_salon(&id).await?;
    let services = state.catalog.list_services(&id).await?;
    let employees = state.catalog.list_employees(&id).await?;
    let images = state.catalog.salon_images(&id).await?;
    let rating = state.reviews.rating_summary(&id).await?;

    Ok(Json(SalonDetail {
        salon,
        services,
        employees,
        images,
        rating,
    }))
}

/// GET /api/v1/me/salon - The acting owner's salon, if registered.
pub async fn my_salon(
    State(state): State<AppState>,
    Identity(acting): Identity,
) -> Result<Json<Option<Salon>>, AppError> {
    Ok(Json(state.catalog.salon_of_owner(&acting).await?))
}

/// PUT /api/v1/salons/{id} - Update profile fields.
pub async fn update_salon(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(id): Path<SalonId>,
    Json(body): Json<UpdateSalonRequest>,
) -> Result<Json<Salon>, AppError> {
    Ok(Json(state.catalog.update_salon(&acting, &id, body).await?))
}

/// DELETE /api/v1/salons/{id} - Delete a salon and everything it owns.
pub async fn delete_salon(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(id): Path<SalonId>,
) -> Result<axum::http::StatusCode, AppError> {
    state.catalog.delete_salon(&acting, &id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// POST /api/v1/salons/{id}/images?filename=... - Attach an uploaded image.
/// The request body is the raw image bytes.
pub async fn upload_image(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(id): Path<SalonId>,
    Query(query): Query<UploadQuery>,
    body: axum::body::Bytes,
) -> Result<Json<SalonImage>, AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("image body is empty".to_string()));
    }
    let image = state
        .catalog
        .attach_image(&acting, &id, &body, &query.filename)
        .await?;
    Ok(Json(image))
}
