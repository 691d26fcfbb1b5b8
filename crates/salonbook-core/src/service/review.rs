//! Review ledger: verified-visit salon ratings.
//!
//! A review may only be posted by a customer who has at least one completed
//! appointment at the salon, and each (customer, salon) pair holds at most
//! one review. Posting again replaces the earlier one.

use chrono::Utc;
use serde::Serialize;

use salonbook_types::error::ReviewError;
use salonbook_types::review::{Review, ReviewId, ReviewRequest, MAX_RATING, MIN_RATING};
use salonbook_types::salon::SalonId;
use salonbook_types::user::CurrentUser;

use crate::repository::appointment::AppointmentRepository;
use crate::repository::review::ReviewRepository;

/// Aggregate rating for a salon listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    /// 0.0 when the salon has no reviews yet.
    pub average: f64,
    pub count: usize,
}

pub struct ReviewService<R: ReviewRepository, A: AppointmentRepository> {
    review_repo: R,
    appointment_repo: A,
}

impl<R: ReviewRepository, A: AppointmentRepository> ReviewService<R, A> {
    pub fn new(review_repo: R, appointment_repo: A) -> Self {
        Self {
            review_repo,
            appointment_repo,
        }
    }

    /// Post a review, or replace the caller's existing one for this salon.
    ///
    /// Requires a completed appointment at the salon; the rating must be an
    /// integer in 1..=5.
    pub async fn post(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        request: ReviewRequest,
    ) -> Result<Review, ReviewError> {
        if !acting.is_customer() {
            return Err(ReviewError::Validation(
                "only customers can post reviews".to_string(),
            ));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
            return Err(ReviewError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }

        let visited = self
            .appointment_repo
            .exists_completed(&acting.id, salon_id)
            .await
            .map_err(|e| ReviewError::Storage(e.to_string()))?;
        if !visited {
            return Err(ReviewError::PreconditionFailed);
        }

        let review = Review {
            id: ReviewId::new(),
            customer_id: acting.id,
            salon_id: *salon_id,
            rating: request.rating,
            comment: request.comment,
            posted_at: Utc::now(),
        };

        self.review_repo
            .upsert(&review)
            .await
            .map_err(|e| ReviewError::Storage(e.to_string()))
    }

    /// All reviews for a salon, newest first. Public.
    pub async fn list_for_salon(&self, salon_id: &SalonId) -> Result<Vec<Review>, ReviewError> {
        self.review_repo
            .list_for_salon(salon_id)
            .await
            .map_err(|e| ReviewError::Storage(e.to_string()))
    }

    /// Average rating and review count for a salon listing.
    pub async fn rating_summary(&self, salon_id: &SalonId) -> Result<RatingSummary, ReviewError> {
        let reviews = self.list_for_salon(salon_id).await?;
        let average = self
            .review_repo
            .average_rating(salon_id)
            .await
            .map_err(|e| ReviewError::Storage(e.to_string()))?;
        Ok(RatingSummary {
            average,
            count: reviews.len(),
        })
    }
}
