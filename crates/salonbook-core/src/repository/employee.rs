//! Employee repository trait definition.

use salonbook_types::employee::{Employee, EmployeeId};
use salonbook_types::error::RepositoryError;
use salonbook_types::salon::SalonId;

/// Repository trait for employee persistence.
pub trait EmployeeRepository: Send + Sync {
    /// Insert a new employee.
    fn create(
        &self,
        employee: &Employee,
    ) -> impl std::future::Future<Output = Result<Employee, RepositoryError>> + Send;

    /// Get an employee by id.
    fn get_by_id(
        &self,
        id: &EmployeeId,
    ) -> impl std::future::Future<Output = Result<Option<Employee>, RepositoryError>> + Send;

    /// List the staff of a salon.
    fn list_for_salon(
        &self,
        salon_id: &SalonId,
    ) -> impl std::future::Future<Output = Result<Vec<Employee>, RepositoryError>> + Send;

    /// Delete an employee by id.
    fn delete(
        &self,
        id: &EmployeeId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
