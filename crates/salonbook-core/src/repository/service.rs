//! Service (catalog entry) repository trait definition.

use salonbook_types::error::RepositoryError;
use salonbook_types::salon::SalonId;
use salonbook_types::service::{Service, ServiceId};

/// Repository trait for service persistence.
pub trait ServiceRepository: Send + Sync {
    /// Insert a new service.
    fn create(
        &self,
        service: &Service,
    ) -> impl std::future::Future<Output = Result<Service, RepositoryError>> + Send;

    /// Get a service by id.
    fn get_by_id(
        &self,
        id: &ServiceId,
    ) -> impl std::future::Future<Output = Result<Option<Service>, RepositoryError>> + Send;

    /// List the services offered by a salon.
    fn list_for_salon(
        &self,
        salon_id: &SalonId,
    ) -> impl std::future::Future<Output = Result<Vec<Service>, RepositoryError>> + Send;

    /// Update an existing service.
    fn update(
        &self,
        service: &Service,
    ) -> impl std::future::Future<Output = Result<Service, RepositoryError>> + Send;

    /// Delete a service by id.
    fn delete(
        &self,
        id: &ServiceId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
