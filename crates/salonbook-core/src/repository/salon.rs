//! Salon repository trait definition.

use salonbook_types::error::RepositoryError;
use salonbook_types::salon::{Salon, SalonId, SalonImage};
use salonbook_types::user::UserId;

/// Repository trait for salon persistence.
///
/// Implementations live in salonbook-infra (e.g. SqliteSalonRepository).
pub trait SalonRepository: Send + Sync {
    /// Insert a new salon. Returns the stored salon.
    fn create(
        &self,
        salon: &Salon,
    ) -> impl std::future::Future<Output = Result<Salon, RepositoryError>> + Send;

    /// Get a salon by id.
    fn get_by_id(
        &self,
        id: &SalonId,
    ) -> impl std::future::Future<Output = Result<Option<Salon>, RepositoryError>> + Send;

    /// Get the salon managed by an owner, if any.
    fn find_by_owner(
        &self,
        owner_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<Salon>, RepositoryError>> + Send;

    /// List all salons, newest first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Salon>, RepositoryError>> + Send;

    /// Update an existing salon. Returns the updated salon.
    fn update(
        &self,
        salon: &Salon,
    ) -> impl std::future::Future<Output = Result<Salon, RepositoryError>> + Send;

    /// Delete a salon and every record it owns: services, employees, images,
    /// and time slots go with it in one transaction.
    fn delete(
        &self,
        id: &SalonId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Attach an image record to a salon.
    fn add_image(
        &self,
        image: &SalonImage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List images attached to a salon.
    fn list_images(
        &self,
        salon_id: &SalonId,
    ) -> impl std::future::Future<Output = Result<Vec<SalonImage>, RepositoryError>> + Send;
}
