//! In-memory repository fakes shared by the service tests.
//!
//! `MemStore` implements every repository port plus the notification sink
//! and the image store, backed by mutex-guarded vectors. A clone shares the
//! same underlying tables, mirroring how the sqlite repositories share one
//! pool.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use salonbook_types::appointment::{Appointment, AppointmentId, AppointmentStatus};
use salonbook_types::employee::{Employee, EmployeeId};
use salonbook_types::error::{NotificationError, RepositoryError};
use salonbook_types::notification::{Notification, NotificationId, NotificationKind};
use salonbook_types::review::Review;
use salonbook_types::salon::{Salon, SalonId, SalonImage};
use salonbook_types::service::{Service, ServiceId};
use salonbook_types::slot::{SlotId, TimeSlot};
use salonbook_types::user::UserId;

use crate::notify::NotificationSink;
use crate::repository::appointment::{AppointmentRepository, CompletedVisit};
use crate::repository::employee::EmployeeRepository;
use crate::repository::notification::NotificationRepository;
use crate::repository::review::ReviewRepository;
use crate::repository::salon::SalonRepository;
use crate::repository::service::ServiceRepository;
use crate::repository::slot::SlotRepository;
use crate::storage::ImageStore;

#[derive(Default)]
struct Tables {
    salons: Mutex<Vec<Salon>>,
    images: Mutex<Vec<SalonImage>>,
    services: Mutex<Vec<Service>>,
    employees: Mutex<Vec<Employee>>,
    slots: Mutex<Vec<TimeSlot>>,
    appointments: Mutex<Vec<Appointment>>,
    reviews: Mutex<Vec<Review>>,
    notifications: Mutex<Vec<Notification>>,
}

#[derive(Clone, Default)]
pub struct MemStore(Arc<Tables>);

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications_for(&self, user_id: &UserId) -> Vec<Notification> {
        self.0
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == *user_id)
            .cloned()
            .collect()
    }

    pub fn slot(&self, id: &SlotId) -> Option<TimeSlot> {
        self.0
            .slots
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == *id)
            .cloned()
    }

    pub fn appointment(&self, id: &AppointmentId) -> Option<Appointment> {
        self.0
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == *id)
            .cloned()
    }

    pub fn push_appointment(&self, appointment: Appointment) {
        self.0.appointments.lock().unwrap().push(appointment);
    }
}

impl SalonRepository for MemStore {
    async fn create(&self, salon: &Salon) -> Result<Salon, RepositoryError> {
        self.0.salons.lock().unwrap().push(salon.clone());
        Ok(salon.clone())
    }

    async fn get_by_id(&self, id: &SalonId) -> Result<Option<Salon>, RepositoryError> {
        Ok(self
            .0
            .salons
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == *id)
            .cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Option<Salon>, RepositoryError> {
        Ok(self
            .0
            .salons
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.owner_id == *owner_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Salon>, RepositoryError> {
        Ok(self.0.salons.lock().unwrap().clone())
    }

    async fn update(&self, salon: &Salon) -> Result<Salon, RepositoryError> {
        let mut salons = self.0.salons.lock().unwrap();
        let existing = salons
            .iter_mut()
            .find(|s| s.id == salon.id)
            .ok_or(RepositoryError::NotFound)?;
        *existing = salon.clone();
        Ok(salon.clone())
    }

    async fn delete(&self, id: &SalonId) -> Result<(), RepositoryError> {
        self.0.salons.lock().unwrap().retain(|s| s.id != *id);
        // Owned collections go with the salon
        self.0.services.lock().unwrap().retain(|s| s.salon_id != *id);
        self.0.employees.lock().unwrap().retain(|e| e.salon_id != *id);
        self.0.images.lock().unwrap().retain(|i| i.salon_id != *id);
        self.0.slots.lock().unwrap().retain(|s| s.salon_id != *id);
        Ok(())
    }

    async fn add_image(&self, image: &SalonImage) -> Result<(), RepositoryError> {
        self.0.images.lock().unwrap().push(image.clone());
        Ok(())
    }

    async fn list_images(&self, salon_id: &SalonId) -> Result<Vec<SalonImage>, RepositoryError> {
        Ok(self
            .0
            .images
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.salon_id == *salon_id)
            .cloned()
            .collect())
    }
}

impl ServiceRepository for MemStore {
    async fn create(&self, service: &Service) -> Result<Service, RepositoryError> {
        self.0.services.lock().unwrap().push(service.clone());
        Ok(service.clone())
    }

    async fn get_by_id(&self, id: &ServiceId) -> Result<Option<Service>, RepositoryError> {
        Ok(self
            .0
            .services
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == *id)
            .cloned())
    }

    async fn list_for_salon(&self, salon_id: &SalonId) -> Result<Vec<Service>, RepositoryError> {
        Ok(self
            .0
            .services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.salon_id == *salon_id)
            .cloned()
            .collect())
    }

    async fn update(&self, service: &Service) -> Result<Service, RepositoryError> {
        let mut services = self.0.services.lock().unwrap();
        let existing = services
            .iter_mut()
            .find(|s| s.id == service.id)
            .ok_or(RepositoryError::NotFound)?;
        *existing = service.clone();
        Ok(service.clone())
    }

    async fn delete(&self, id: &ServiceId) -> Result<(), RepositoryError> {
        self.0.services.lock().unwrap().retain(|s| s.id != *id);
        Ok(())
    }
}

impl EmployeeRepository for MemStore {
    async fn create(&self, employee: &Employee) -> Result<Employee, RepositoryError> {
        self.0.employees.lock().unwrap().push(employee.clone());
        Ok(employee.clone())
    }

    async fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Ok(self
            .0
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == *id)
            .cloned())
    }

    async fn list_for_salon(&self, salon_id: &SalonId) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self
            .0
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.salon_id == *salon_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        self.0.employees.lock().unwrap().retain(|e| e.id != *id);
        Ok(())
    }
}

impl SlotRepository for MemStore {
    async fn insert(&self, slot: &TimeSlot) -> Result<TimeSlot, RepositoryError> {
        self.0.slots.lock().unwrap().push(slot.clone());
        Ok(slot.clone())
    }

    async fn get_by_id(&self, id: &SlotId) -> Result<Option<TimeSlot>, RepositoryError> {
        Ok(self.slot(id))
    }

    async fn find_overlapping(
        &self,
        salon_id: &SalonId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Option<TimeSlot>, RepositoryError> {
        Ok(self
            .0
            .slots
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.salon_id == *salon_id && s.date == date && s.overlaps(start, end))
            .cloned())
    }

    async fn find_available(
        &self,
        salon_id: &SalonId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Option<TimeSlot>, RepositoryError> {
        Ok(self
            .0
            .slots
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.salon_id == *salon_id && s.date == date && s.is_available && s.covers(time))
            .cloned())
    }

    async fn list_available_from(
        &self,
        salon_id: &SalonId,
        from_date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, RepositoryError> {
        let mut slots: Vec<TimeSlot> = self
            .0
            .slots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.salon_id == *salon_id && s.is_available && s.date >= from_date)
            .cloned()
            .collect();
        slots.sort_by_key(|s| (s.date, s.start_time));
        Ok(slots)
    }

    async fn list_window(
        &self,
        salon_id: &SalonId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeSlot>, RepositoryError> {
        let mut slots: Vec<TimeSlot> = self
            .0
            .slots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.salon_id == *salon_id && s.date >= from && s.date <= to)
            .cloned()
            .collect();
        slots.sort_by_key(|s| (s.date, s.start_time));
        Ok(slots)
    }

    async fn release(
        &self,
        salon_id: &SalonId,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Result<(), RepositoryError> {
        let mut slots = self.0.slots.lock().unwrap();
        if let Some(slot) = slots
            .iter_mut()
            .find(|s| s.salon_id == *salon_id && s.date == date && s.start_time == start_time)
        {
            slot.is_available = true;
        }
        Ok(())
    }

    async fn delete(&self, id: &SlotId) -> Result<(), RepositoryError> {
        self.0.slots.lock().unwrap().retain(|s| s.id != *id);
        Ok(())
    }
}

impl AppointmentRepository for MemStore {
    async fn create_booked(
        &self,
        appointment: &Appointment,
        slot_id: &SlotId,
    ) -> Result<Appointment, RepositoryError> {
        // Both tables behind one lock ordering keeps the fake's CAS atomic.
        let mut slots = self.0.slots.lock().unwrap();
        let slot = slots
            .iter_mut()
            .find(|s| s.id == *slot_id)
            .ok_or(RepositoryError::NotFound)?;
        if !slot.is_available {
            return Err(RepositoryError::Conflict("slot already reserved".to_string()));
        }
        slot.is_available = false;
        self.0.appointments.lock().unwrap().push(appointment.clone());
        Ok(appointment.clone())
    }

    async fn get_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, RepositoryError> {
        Ok(self.appointment(id))
    }

    async fn set_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> Result<(), RepositoryError> {
        let mut appointments = self.0.appointments.lock().unwrap();
        let existing = appointments
            .iter_mut()
            .find(|a| a.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        existing.status = status;
        Ok(())
    }

    async fn cancel_and_release(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        self.set_status(&appointment.id, AppointmentStatus::Cancelled)
            .await?;
        SlotRepository::release(
            self,
            &appointment.salon_id,
            appointment.date,
            appointment.time,
        )
        .await
    }

    async fn record_payment(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        let mut appointments = self.0.appointments.lock().unwrap();
        let existing = appointments
            .iter_mut()
            .find(|a| a.id == appointment.id)
            .ok_or(RepositoryError::NotFound)?;
        if existing.has_paid_deposit {
            return Err(RepositoryError::Conflict("deposit already paid".to_string()));
        }
        *existing = appointment.clone();
        Ok(())
    }

    async fn list_for_customer(
        &self,
        customer_id: &UserId,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        let mut appointments: Vec<Appointment> = self
            .0
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.customer_id == *customer_id)
            .cloned()
            .collect();
        appointments.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
        Ok(appointments)
    }

    async fn list_for_salon(
        &self,
        salon_id: &SalonId,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        Ok(self
            .0
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.salon_id == *salon_id && a.status == status)
            .cloned()
            .collect())
    }

    async fn completed_visits(
        &self,
        salon_id: &SalonId,
    ) -> Result<Vec<CompletedVisit>, RepositoryError> {
        let appointments = self.0.appointments.lock().unwrap();
        let services = self.0.services.lock().unwrap();
        Ok(appointments
            .iter()
            .filter(|a| a.salon_id == *salon_id && a.status == AppointmentStatus::Completed)
            .filter_map(|a| {
                services
                    .iter()
                    .find(|s| s.id == a.service_id)
                    .map(|s| CompletedVisit {
                        date: a.date,
                        price: s.price,
                    })
            })
            .collect())
    }

    async fn exists_completed(
        &self,
        customer_id: &UserId,
        salon_id: &SalonId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.0.appointments.lock().unwrap().iter().any(|a| {
            a.customer_id == *customer_id
                && a.salon_id == *salon_id
                && a.status == AppointmentStatus::Completed
        }))
    }
}

impl ReviewRepository for MemStore {
    async fn upsert(&self, review: &Review) -> Result<Review, RepositoryError> {
        let mut reviews = self.0.reviews.lock().unwrap();
        if let Some(existing) = reviews
            .iter_mut()
            .find(|r| r.customer_id == review.customer_id && r.salon_id == review.salon_id)
        {
            existing.rating = review.rating;
            existing.comment = review.comment.clone();
            existing.posted_at = review.posted_at;
            return Ok(existing.clone());
        }
        reviews.push(review.clone());
        Ok(review.clone())
    }

    async fn find_by_pair(
        &self,
        customer_id: &UserId,
        salon_id: &SalonId,
    ) -> Result<Option<Review>, RepositoryError> {
        Ok(self
            .0
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.customer_id == *customer_id && r.salon_id == *salon_id)
            .cloned())
    }

    async fn list_for_salon(&self, salon_id: &SalonId) -> Result<Vec<Review>, RepositoryError> {
        let mut reviews: Vec<Review> = self
            .0
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.salon_id == *salon_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(reviews)
    }

    async fn average_rating(&self, salon_id: &SalonId) -> Result<f64, RepositoryError> {
        let reviews = self.0.reviews.lock().unwrap();
        let ratings: Vec<i32> = reviews
            .iter()
            .filter(|r| r.salon_id == *salon_id)
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return Ok(0.0);
        }
        Ok(ratings.iter().sum::<i32>() as f64 / ratings.len() as f64)
    }
}

impl NotificationRepository for MemStore {
    async fn insert(&self, notification: &Notification) -> Result<(), RepositoryError> {
        self.0
            .notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(())
    }

    async fn get_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        Ok(self
            .0
            .notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == *id)
            .cloned())
    }

    async fn list_unread(&self, user_id: &UserId) -> Result<Vec<Notification>, RepositoryError> {
        let mut unread: Vec<Notification> = self
            .0
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == *user_id && !n.is_read)
            .cloned()
            .collect();
        unread.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(unread)
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), RepositoryError> {
        let mut notifications = self.0.notifications.lock().unwrap();
        let existing = notifications
            .iter_mut()
            .find(|n| n.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        existing.is_read = true;
        Ok(())
    }

    async fn clear_for_user(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.0
            .notifications
            .lock()
            .unwrap()
            .retain(|n| n.user_id != *user_id);
        Ok(())
    }
}

impl NotificationSink for MemStore {
    async fn notify(
        &self,
        user_id: &UserId,
        content: &str,
        kind: NotificationKind,
        related_id: Option<Uuid>,
    ) -> Result<(), NotificationError> {
        let notification = Notification {
            id: NotificationId::new(),
            user_id: *user_id,
            content: content.to_string(),
            kind,
            related_id,
            is_read: false,
            created_at: Utc::now(),
        };
        NotificationRepository::insert(self, &notification)
            .await
            .map_err(|e| NotificationError::Storage(e.to_string()))
    }
}

/// A minimal pending appointment for tests that only need the slot-matching
/// fields populated.
pub fn pending_appointment(salon_id: &SalonId, date: NaiveDate, time: &str) -> Appointment {
    Appointment {
        id: AppointmentId::new(),
        customer_id: UserId::new(),
        salon_id: *salon_id,
        service_id: ServiceId::new(),
        date,
        time: time.parse().unwrap(),
        status: AppointmentStatus::Pending,
        has_paid_deposit: false,
        deposit_amount: 0.0,
        payment_method: None,
        payment_status: salonbook_types::appointment::PaymentStatus::Unpaid,
        discounted_price: 0.0,
        transaction_id: None,
        created_at: Utc::now(),
    }
}

impl ImageStore for MemStore {
    async fn store(&self, _bytes: &[u8], original_name: &str) -> Result<String, RepositoryError> {
        Ok(format!("uploads/{}_{original_name}", Uuid::now_v7()))
    }
}
