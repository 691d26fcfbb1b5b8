//! Catalog store: salons and the services, employees, and images they own.
//!
//! Every mutation checks ownership first. A salon strictly owns its
//! collections, so deleting a salon takes its services, employees, images,
//! and time slots with it.

use chrono::Utc;
use uuid::Uuid;

use salonbook_types::employee::{Employee, EmployeeId, EmployeeRequest};
use salonbook_types::error::CatalogError;
use salonbook_types::salon::{
    CreateSalonRequest, Salon, SalonId, SalonImage, UpdateSalonRequest,
};
use salonbook_types::service::{Service, ServiceId, ServiceRequest};
use salonbook_types::user::CurrentUser;

use crate::repository::employee::EmployeeRepository;
use crate::repository::salon::SalonRepository;
use crate::repository::service::ServiceRepository;
use crate::storage::ImageStore;

pub struct CatalogService<SA, SV, E, I>
where
    SA: SalonRepository,
    SV: ServiceRepository,
    E: EmployeeRepository,
    I: ImageStore,
{
    salon_repo: SA,
    service_repo: SV,
    employee_repo: E,
    images: I,
}

impl<SA, SV, E, I> CatalogService<SA, SV, E, I>
where
    SA: SalonRepository,
    SV: ServiceRepository,
    E: EmployeeRepository,
    I: ImageStore,
{
    pub fn new(salon_repo: SA, service_repo: SV, employee_repo: E, images: I) -> Self {
        Self {
            salon_repo,
            service_repo,
            employee_repo,
            images,
        }
    }

    /// Resolve a salon and verify `acting` owns it.
    async fn owned_salon(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
    ) -> Result<Salon, CatalogError> {
        let salon = self
            .salon_repo
            .get_by_id(salon_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?
            .ok_or(CatalogError::NotFound)?;

        if !acting.is_salon_owner() || salon.owner_id != acting.id {
            return Err(CatalogError::Forbidden(
                "only the salon owner can modify this salon".to_string(),
            ));
        }
        Ok(salon)
    }

    fn validate_service(request: &ServiceRequest) -> Result<(), CatalogError> {
        if request.name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "service name is required".to_string(),
            ));
        }
        if request.price < 0.0 {
            return Err(CatalogError::Validation(
                "price must not be negative".to_string(),
            ));
        }
        if request.duration_minutes == 0 {
            return Err(CatalogError::Validation(
                "duration must be at least one minute".to_string(),
            ));
        }
        Ok(())
    }

    // -- salons --

    /// Register a new salon listing. One listing per owner.
    pub async fn create_salon(
        &self,
        acting: &CurrentUser,
        request: CreateSalonRequest,
    ) -> Result<Salon, CatalogError> {
        if !acting.is_salon_owner() {
            return Err(CatalogError::Forbidden(
                "only salon owners can register a salon".to_string(),
            ));
        }
        if request.name.trim().is_empty() || request.location.trim().is_empty() {
            return Err(CatalogError::Validation(
                "salon name and location are required".to_string(),
            ));
        }

        let existing = self
            .salon_repo
            .find_by_owner(&acting.id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;
        if existing.is_some() {
            return Err(CatalogError::Validation(
                "this account already has a salon".to_string(),
            ));
        }

        let now = Utc::now();
        let salon = Salon {
            id: SalonId::new(),
            owner_id: acting.id,
            name: request.name,
            description: request.description,
            location: request.location,
            phone: request.phone,
            opening_time: None,
            closing_time: None,
            weekly_closing: None,
            created_at: now,
            updated_at: now,
        };

        let salon = self
            .salon_repo
            .create(&salon)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;
        tracing::info!(salon = %salon.id, owner = %salon.owner_id, "salon registered");
        Ok(salon)
    }

    pub async fn get_salon(&self, salon_id: &SalonId) -> Result<Salon, CatalogError> {
        self.salon_repo
            .get_by_id(salon_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?
            .ok_or(CatalogError::NotFound)
    }

    /// The acting owner's salon, if registered.
    pub async fn salon_of_owner(
        &self,
        acting: &CurrentUser,
    ) -> Result<Option<Salon>, CatalogError> {
        self.salon_repo
            .find_by_owner(&acting.id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    /// Every salon listing, for the browse page.
    pub async fn list_salons(&self) -> Result<Vec<Salon>, CatalogError> {
        self.salon_repo
            .list()
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    /// Update profile fields; absent fields are left untouched.
    pub async fn update_salon(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        request: UpdateSalonRequest,
    ) -> Result<Salon, CatalogError> {
        let mut salon = self.owned_salon(acting, salon_id).await?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(CatalogError::Validation(
                    "salon name must not be empty".to_string(),
                ));
            }
            salon.name = name;
        }
        if let Some(location) = request.location {
            salon.location = location;
        }
        if let Some(description) = request.description {
            salon.description = Some(description);
        }
        if let Some(phone) = request.phone {
            salon.phone = Some(phone);
        }
        if let Some(opening) = request.opening_time {
            salon.opening_time = Some(opening);
        }
        if let Some(closing) = request.closing_time {
            salon.closing_time = Some(closing);
        }
        if let Some(day) = request.weekly_closing {
            salon.weekly_closing = Some(day);
        }
        salon.updated_at = Utc::now();

        self.salon_repo
            .update(&salon)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    /// Delete a salon and everything it owns.
    pub async fn delete_salon(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
    ) -> Result<(), CatalogError> {
        self.owned_salon(acting, salon_id).await?;
        self.salon_repo
            .delete(salon_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;
        tracing::info!(salon = %salon_id, "salon deleted");
        Ok(())
    }

    /// Store an uploaded image and attach it to the salon listing.
    pub async fn attach_image(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        bytes: &[u8],
        original_name: &str,
    ) -> Result<SalonImage, CatalogError> {
        self.owned_salon(acting, salon_id).await?;

        let path = self
            .images
            .store(bytes, original_name)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;

        let image = SalonImage {
            id: Uuid::now_v7(),
            salon_id: *salon_id,
            image_path: path,
        };
        self.salon_repo
            .add_image(&image)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;
        Ok(image)
    }

    pub async fn salon_images(
        &self,
        salon_id: &SalonId,
    ) -> Result<Vec<SalonImage>, CatalogError> {
        self.salon_repo
            .list_images(salon_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    // -- services --

    pub async fn add_service(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        request: ServiceRequest,
    ) -> Result<Service, CatalogError> {
        self.owned_salon(acting, salon_id).await?;
        Self::validate_service(&request)?;

        let service = Service {
            id: ServiceId::new(),
            salon_id: *salon_id,
            name: request.name,
            description: request.description,
            price: request.price,
            duration_minutes: request.duration_minutes,
        };
        self.service_repo
            .create(&service)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    pub async fn list_services(&self, salon_id: &SalonId) -> Result<Vec<Service>, CatalogError> {
        self.service_repo
            .list_for_salon(salon_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    pub async fn update_service(
        &self,
        acting: &CurrentUser,
        service_id: &ServiceId,
        request: ServiceRequest,
    ) -> Result<Service, CatalogError> {
        let mut service = self
            .service_repo
            .get_by_id(service_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?
            .ok_or(CatalogError::NotFound)?;
        self.owned_salon(acting, &service.salon_id).await?;
        Self::validate_service(&request)?;

        service.name = request.name;
        service.description = request.description;
        service.price = request.price;
        service.duration_minutes = request.duration_minutes;

        self.service_repo
            .update(&service)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    pub async fn delete_service(
        &self,
        acting: &CurrentUser,
        service_id: &ServiceId,
    ) -> Result<(), CatalogError> {
        let service = self
            .service_repo
            .get_by_id(service_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?
            .ok_or(CatalogError::NotFound)?;
        self.owned_salon(acting, &service.salon_id).await?;

        self.service_repo
            .delete(service_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    // -- employees --

    pub async fn add_employee(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        request: EmployeeRequest,
        photo: Option<(&[u8], &str)>,
    ) -> Result<Employee, CatalogError> {
        self.owned_salon(acting, salon_id).await?;
        if request.name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "employee name is required".to_string(),
            ));
        }

        let image_path = match photo {
            Some((bytes, original_name)) => Some(
                self.images
                    .store(bytes, original_name)
                    .await
                    .map_err(|e| CatalogError::Storage(e.to_string()))?,
            ),
            None => None,
        };

        let employee = Employee {
            id: EmployeeId::new(),
            salon_id: *salon_id,
            name: request.name,
            role: request.role,
            image_path,
        };
        self.employee_repo
            .create(&employee)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    pub async fn list_employees(
        &self,
        salon_id: &SalonId,
    ) -> Result<Vec<Employee>, CatalogError> {
        self.employee_repo
            .list_for_salon(salon_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    pub async fn delete_employee(
        &self,
        acting: &CurrentUser,
        employee_id: &EmployeeId,
    ) -> Result<(), CatalogError> {
        let employee = self
            .employee_repo
            .get_by_id(employee_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?
            .ok_or(CatalogError::NotFound)?;
        self.owned_salon(acting, &employee.salon_id).await?;

        self.employee_repo
            .delete(employee_id)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }
}
