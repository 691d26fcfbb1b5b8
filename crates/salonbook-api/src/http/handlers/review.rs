//! Review endpoint handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use salonbook_core::service::review::RatingSummary;
use salonbook_types::review::{Review, ReviewRequest};
use salonbook_types::salon::SalonId;

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::state::AppState;

/// POST /api/v1/salons/{id}/reviews - Post or replace the caller's review.
pub async fn post_review(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(salon_id): Path<SalonId>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(state.reviews.post(&acting, &salon_id, body).await?))
}

#[derive(Debug, Serialize)]
pub struct SalonReviews {
    pub reviews: Vec<Review>,
    pub rating: RatingSummary,
}

/// GET /api/v1/salons/{id}/reviews - All reviews plus the rating summary.
/// Public.
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(salon_id): Path<SalonId>,
) -> Result<Json<SalonReviews>, AppError> {
    let reviews = state.reviews.list_for_salon(&salon_id).await?;
    let rating = state.reviews.rating_summary(&salon_id).await?;
    Ok(Json(SalonReviews { reviews, rating }))
}
