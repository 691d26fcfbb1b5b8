//! Review repository trait definition.

use salonbook_types::error::RepositoryError;
use salonbook_types::review::Review;
use salonbook_types::salon::SalonId;
use salonbook_types::user::UserId;

/// Repository trait for review persistence.
///
/// The natural key is the (customer, salon) pair: at most one row exists per
/// pair and [`ReviewRepository::upsert`] overwrites it in place.
pub trait ReviewRepository: Send + Sync {
    /// Insert the review, or overwrite rating, comment, and timestamp of the
    /// existing row for the same (customer, salon) pair. Returns the stored
    /// review (the original row id survives an overwrite).
    fn upsert(
        &self,
        review: &Review,
    ) -> impl std::future::Future<Output = Result<Review, RepositoryError>> + Send;

    /// The review a customer left for a salon, if any.
    fn find_by_pair(
        &self,
        customer_id: &UserId,
        salon_id: &SalonId,
    ) -> impl std::future::Future<Output = Result<Option<Review>, RepositoryError>> + Send;

    /// All reviews for a salon, newest first.
    fn list_for_salon(
        &self,
        salon_id: &SalonId,
    ) -> impl std::future::Future<Output = Result<Vec<Review>, RepositoryError>> + Send;

    /// Arithmetic mean of the salon's ratings; 0.0 when there are none.
    fn average_rating(
        &self,
        salon_id: &SalonId,
    ) -> impl std::future::Future<Output = Result<f64, RepositoryError>> + Send;
}
