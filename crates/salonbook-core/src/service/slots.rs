//! Slot ledger: a salon's bookable calendar.
//!
//! Owners publish fixed time windows; the ledger enforces that no two
//! windows for the same salon and date overlap, and serves the grouped
//! listings shown on the booking page and the owner calendar.

use chrono::{NaiveDate, Utc};

use salonbook_types::error::SlotError;
use salonbook_types::salon::SalonId;
use salonbook_types::slot::{AddSlotRequest, DaySlots, SlotId, SlotTime, TimeSlot};
use salonbook_types::user::CurrentUser;

use crate::repository::salon::SalonRepository;
use crate::repository::slot::SlotRepository;

/// Service enforcing slot exclusivity and serving calendar views.
pub struct SlotService<L: SlotRepository, S: SalonRepository> {
    slot_repo: L,
    salon_repo: S,
}

impl<L: SlotRepository, S: SalonRepository> SlotService<L, S> {
    pub fn new(slot_repo: L, salon_repo: S) -> Self {
        Self {
            slot_repo,
            salon_repo,
        }
    }

    /// Resolve the salon and verify `acting` owns it.
    async fn owned_salon(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
    ) -> Result<(), SlotError> {
        let salon = self
            .salon_repo
            .get_by_id(salon_id)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))?
            .ok_or(SlotError::NotFound)?;

        if !acting.is_salon_owner() || salon.owner_id != acting.id {
            return Err(SlotError::Forbidden(
                "only the salon owner can manage time slots".to_string(),
            ));
        }
        Ok(())
    }

    /// Publish a new bookable window.
    ///
    /// Rejected when the date is in the past, the interval is empty or
    /// inverted, or the interval overlaps any existing slot for that salon
    /// and date -- available or not.
    pub async fn add_slot(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        request: AddSlotRequest,
    ) -> Result<TimeSlot, SlotError> {
        self.owned_salon(acting, salon_id).await?;

        if request.date < Utc::now().date_naive() {
            return Err(SlotError::Validation(
                "can't add slots for past dates".to_string(),
            ));
        }
        if request.start_time >= request.end_time {
            return Err(SlotError::Validation(
                "end time must be after start time".to_string(),
            ));
        }

        let overlapping = self
            .slot_repo
            .find_overlapping(salon_id, request.date, request.start_time, request.end_time)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))?;
        if overlapping.is_some() {
            return Err(SlotError::Validation(
                "this time slot overlaps with an existing one".to_string(),
            ));
        }

        let slot = TimeSlot {
            id: SlotId::new(),
            salon_id: *salon_id,
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            is_available: true,
        };

        self.slot_repo
            .insert(&slot)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))
    }

    /// Remove a slot from the calendar. Owner-only.
    pub async fn delete_slot(
        &self,
        acting: &CurrentUser,
        slot_id: &SlotId,
    ) -> Result<(), SlotError> {
        let slot = self
            .slot_repo
            .get_by_id(slot_id)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))?
            .ok_or(SlotError::NotFound)?;

        self.owned_salon(acting, &slot.salon_id).await?;

        self.slot_repo
            .delete(slot_id)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))
    }

    /// Available slots from today onward, grouped by date and ordered by
    /// date then start time. Each group carries the weekday name for display.
    pub async fn list_upcoming(&self, salon_id: &SalonId) -> Result<Vec<DaySlots>, SlotError> {
        let today = Utc::now().date_naive();
        let slots = self
            .slot_repo
            .list_available_from(salon_id, today)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))?;

        Ok(group_by_date(&slots))
    }

    /// Every slot (available or not) inside an inclusive date range, for the
    /// owner-side calendar. Owner-only.
    pub async fn list_window(
        &self,
        acting: &CurrentUser,
        salon_id: &SalonId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeSlot>, SlotError> {
        self.owned_salon(acting, salon_id).await?;

        self.slot_repo
            .list_window(salon_id, from, to)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))
    }
}

/// Fold a date-then-start ordered slot list into per-date groups.
fn group_by_date(slots: &[TimeSlot]) -> Vec<DaySlots> {
    let mut groups: Vec<DaySlots> = Vec::new();
    for slot in slots {
        if groups.last().map(|g| g.date) != Some(slot.date) {
            groups.push(DaySlots::new(slot.date));
        }
        if let Some(group) = groups.last_mut() {
            group.times.push(SlotTime {
                start: slot.start_time,
                end: slot.end_time,
            });
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::appointment::AppointmentRepository;
    use crate::testing::MemStore;
    use chrono::Duration;
    use salonbook_types::salon::Salon;
    use salonbook_types::user::UserId;

    fn future_date(days: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(days)
    }

    async fn setup() -> (MemStore, SlotService<MemStore, MemStore>, CurrentUser, SalonId) {
        let store = MemStore::new();
        let owner = CurrentUser::salon_owner(UserId::new());
        let salon = Salon {
            id: SalonId::new(),
            owner_id: owner.id,
            name: "Shear Genius".to_string(),
            description: None,
            location: "12 High St".to_string(),
            phone: None,
            opening_time: None,
            closing_time: None,
            weekly_closing: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        SalonRepository::create(&store, &salon).await.unwrap();
        let service = SlotService::new(store.clone(), store.clone());
        (store, service, owner, salon.id)
    }

    fn request(date: NaiveDate, start: &str, end: &str) -> AddSlotRequest {
        AddSlotRequest {
            date,
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_add_slot_rejects_past_date() {
        let (_store, service, owner, salon_id) = setup().await;
        let err = service
            .add_slot(&owner, &salon_id, request(future_date(-1), "09:00:00", "10:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_slot_rejects_inverted_interval() {
        let (_store, service, owner, salon_id) = setup().await;
        let err = service
            .add_slot(&owner, &salon_id, request(future_date(1), "10:00:00", "09:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_slot_rejects_overlap_even_with_unavailable_slot() {
        let (store, service, owner, salon_id) = setup().await;
        let date = future_date(2);
        let slot = service
            .add_slot(&owner, &salon_id, request(date, "09:00:00", "10:00:00"))
            .await
            .unwrap();

        // Make the existing slot unavailable; overlap must still be rejected
        store
            .create_booked(
                &crate::testing::pending_appointment(&salon_id, date, "09:00:00"),
                &slot.id,
            )
            .await
            .unwrap();

        let err = service
            .add_slot(&owner, &salon_id, request(date, "09:30:00", "10:30:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::Validation(_)));

        // Touching interval is fine
        service
            .add_slot(&owner, &salon_id, request(date, "10:00:00", "11:00:00"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_slot_requires_owner() {
        let (_store, service, _owner, salon_id) = setup().await;
        let stranger = CurrentUser::salon_owner(UserId::new());
        let err = service
            .add_slot(&stranger, &salon_id, request(future_date(1), "09:00:00", "10:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::Forbidden(_)));

        let customer = CurrentUser::customer(UserId::new());
        let err = service
            .add_slot(&customer, &salon_id, request(future_date(1), "09:00:00", "10:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_list_upcoming_groups_by_date_in_order() {
        let (_store, service, owner, salon_id) = setup().await;
        let d1 = future_date(1);
        let d2 = future_date(3);

        // Inserted out of order on purpose
        service
            .add_slot(&owner, &salon_id, request(d2, "09:00:00", "10:00:00"))
            .await
            .unwrap();
        service
            .add_slot(&owner, &salon_id, request(d1, "14:00:00", "15:00:00"))
            .await
            .unwrap();
        service
            .add_slot(&owner, &salon_id, request(d1, "09:00:00", "10:00:00"))
            .await
            .unwrap();

        let groups = service.list_upcoming(&salon_id).await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, d1);
        assert_eq!(groups[1].date, d2);
        assert_eq!(groups[0].times.len(), 2);
        assert_eq!(groups[0].times[0].start, "09:00:00".parse().unwrap());
        assert_eq!(groups[0].times[1].start, "14:00:00".parse().unwrap());
        assert_eq!(
            groups[0].day_name,
            salonbook_types::slot::weekday_name(d1)
        );
    }

    #[tokio::test]
    async fn test_delete_slot_owner_only() {
        let (store, service, owner, salon_id) = setup().await;
        let slot = service
            .add_slot(&owner, &salon_id, request(future_date(1), "09:00:00", "10:00:00"))
            .await
            .unwrap();

        let stranger = CurrentUser::salon_owner(UserId::new());
        let err = service.delete_slot(&stranger, &slot.id).await.unwrap_err();
        assert!(matches!(err, SlotError::Forbidden(_)));

        service.delete_slot(&owner, &slot.id).await.unwrap();
        assert!(store.slot(&slot.id).is_none());
    }
}
