//! SQLite appointment repository implementation.
//!
//! Carries the two atomic seams of the booking engine. `create_booked` runs
//! the slot compare-and-set and the appointment insert in one writer
//! transaction; `cancel_and_release` pairs the status change with the slot
//! release the same way. The writer pool is a single connection, so these
//! transactions also serialize against every other write.

use sqlx::Row;

use salonbook_core::repository::appointment::{AppointmentRepository, CompletedVisit};
use salonbook_types::appointment::{Appointment, AppointmentId, AppointmentStatus, PaymentStatus};
use salonbook_types::error::RepositoryError;
use salonbook_types::salon::SalonId;
use salonbook_types::slot::SlotId;
use salonbook_types::user::UserId;

use super::pool::DatabasePool;
use super::{format_date, format_datetime, format_time, parse_date, parse_datetime, parse_time, query_err};

/// SQLite-backed implementation of `AppointmentRepository`.
pub struct SqliteAppointmentRepository {
    pool: DatabasePool,
}

impl SqliteAppointmentRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_appointment(row: &sqlx::sqlite::SqliteRow) -> Result<Appointment, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_err)?;
    let customer_id: String = row.try_get("customer_id").map_err(query_err)?;
    let salon_id: String = row.try_get("salon_id").map_err(query_err)?;
    let service_id: String = row.try_get("service_id").map_err(query_err)?;
    let date: String = row.try_get("date").map_err(query_err)?;
    let time: String = row.try_get("time").map_err(query_err)?;
    let status: String = row.try_get("status").map_err(query_err)?;
    let has_paid_deposit: i64 = row.try_get("has_paid_deposit").map_err(query_err)?;
    let payment_status: String = row.try_get("payment_status").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;

    Ok(Appointment {
        id: id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid appointment id: {e}")))?,
        customer_id: customer_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid customer id: {e}")))?,
        salon_id: salon_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid salon id: {e}")))?,
        service_id: service_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid service id: {e}")))?,
        date: parse_date(&date)?,
        time: parse_time(&time)?,
        status: status
            .parse::<AppointmentStatus>()
            .map_err(RepositoryError::Query)?,
        has_paid_deposit: has_paid_deposit != 0,
        deposit_amount: row.try_get("deposit_amount").map_err(query_err)?,
        payment_method: row.try_get("payment_method").map_err(query_err)?,
        payment_status: payment_status
            .parse::<PaymentStatus>()
            .map_err(RepositoryError::Query)?,
        discounted_price: row.try_get("discounted_price").map_err(query_err)?,
        transaction_id: row.try_get("transaction_id").map_err(query_err)?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl AppointmentRepository for SqliteAppointmentRepository {
    async fn create_booked(
        &self,
        appointment: &Appointment,
        slot_id: &SlotId,
    ) -> Result<Appointment, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        // Optimistic CAS: only flips while the slot is still available
        let reserved = sqlx::query(
            "UPDATE time_slots SET is_available = 0 WHERE id = ? AND is_available = 1",
        )
        .bind(slot_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(query_err)?;

        if reserved.rows_affected() == 0 {
            // Rolling back leaves nothing written for the losing booker
            tx.rollback().await.map_err(query_err)?;
            return Err(RepositoryError::Conflict(
                "slot already reserved".to_string(),
            ));
        }

        sqlx::query(
            "INSERT INTO appointments (id, customer_id, salon_id, service_id, date, time, status, has_paid_deposit, deposit_amount, payment_method, payment_status, discounted_price, transaction_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(appointment.id.to_string())
        .bind(appointment.customer_id.to_string())
        .bind(appointment.salon_id.to_string())
        .bind(appointment.service_id.to_string())
        .bind(format_date(appointment.date))
        .bind(format_time(appointment.time))
        .bind(appointment.status.to_string())
        .bind(appointment.has_paid_deposit as i64)
        .bind(appointment.deposit_amount)
        .bind(&appointment.payment_method)
        .bind(appointment.payment_status.to_string())
        .bind(appointment.discounted_price)
        .bind(&appointment.transaction_id)
        .bind(format_datetime(&appointment.created_at))
        .execute(&mut *tx)
        .await
        .map_err(query_err)?;

        tx.commit().await.map_err(query_err)?;
        Ok(appointment.clone())
    }

    async fn get_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM appointments WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_appointment).transpose()
    }

    async fn set_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn cancel_and_release(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        let cancelled = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
            .bind(AppointmentStatus::Cancelled.to_string())
            .bind(appointment.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(query_err)?;
        if cancelled.rows_affected() == 0 {
            tx.rollback().await.map_err(query_err)?;
            return Err(RepositoryError::NotFound);
        }

        // Slot matched by salon + date + start time; no match is a no-op
        sqlx::query(
            "UPDATE time_slots SET is_available = 1
             WHERE salon_id = ? AND date = ? AND start_time = ?",
        )
        .bind(appointment.salon_id.to_string())
        .bind(format_date(appointment.date))
        .bind(format_time(appointment.time))
        .execute(&mut *tx)
        .await
        .map_err(query_err)?;

        tx.commit().await.map_err(query_err)
    }

    async fn record_payment(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        // Same CAS shape as the slot reserve: only an unpaid row is updated
        let result = sqlx::query(
            "UPDATE appointments SET has_paid_deposit = ?, deposit_amount = ?, payment_method = ?, payment_status = ?, discounted_price = ?, transaction_id = ?
             WHERE id = ? AND has_paid_deposit = 0",
        )
        .bind(appointment.has_paid_deposit as i64)
        .bind(appointment.deposit_amount)
        .bind(&appointment.payment_method)
        .bind(appointment.payment_status.to_string())
        .bind(appointment.discounted_price)
        .bind(&appointment.transaction_id)
        .bind(appointment.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Conflict(
                "deposit already paid".to_string(),
            ));
        }
        Ok(())
    }

    async fn list_for_customer(
        &self,
        customer_id: &UserId,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM appointments WHERE customer_id = ? ORDER BY date DESC, time DESC",
        )
        .bind(customer_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter().map(row_to_appointment).collect()
    }

    async fn list_for_salon(
        &self,
        salon_id: &SalonId,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM appointments WHERE salon_id = ? AND status = ? ORDER BY date, time",
        )
        .bind(salon_id.to_string())
        .bind(status.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter().map(row_to_appointment).collect()
    }

    async fn completed_visits(
        &self,
        salon_id: &SalonId,
    ) -> Result<Vec<CompletedVisit>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT a.date AS date, s.price AS price
             FROM appointments a JOIN services s ON s.id = a.service_id
             WHERE a.salon_id = ? AND a.status = ?
             ORDER BY a.date",
        )
        .bind(salon_id.to_string())
        .bind(AppointmentStatus::Completed.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter()
            .map(|row| {
                let date: String = row.try_get("date").map_err(query_err)?;
                Ok(CompletedVisit {
                    date: parse_date(&date)?,
                    price: row.try_get("price").map_err(query_err)?,
                })
            })
            .collect()
    }

    async fn exists_completed(
        &self,
        customer_id: &UserId,
        salon_id: &SalonId,
    ) -> Result<bool, RepositoryError> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM appointments WHERE customer_id = ? AND salon_id = ? AND status = ?",
        )
        .bind(customer_id.to_string())
        .bind(salon_id.to_string())
        .bind(AppointmentStatus::Completed.to_string())
        .fetch_one(&self.pool.reader)
        .await
        .map_err(query_err)?;

        Ok(row.0 > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::testing::test_pool;
    use crate::sqlite::salon::SqliteSalonRepository;
    use crate::sqlite::service::SqliteServiceRepository;
    use crate::sqlite::slot::SqliteSlotRepository;
    use chrono::Utc;
    use salonbook_core::repository::salon::SalonRepository;
    use salonbook_core::repository::service::ServiceRepository;
    use salonbook_core::repository::slot::SlotRepository;
    use salonbook_types::salon::Salon;
    use salonbook_types::service::{Service, ServiceId};
    use salonbook_types::slot::TimeSlot;

    struct Seed {
        salon_id: SalonId,
        service_id: ServiceId,
        slot: TimeSlot,
    }

    async fn seed(pool: &DatabasePool) -> Seed {
        let now = Utc::now();
        let salon = Salon {
            id: SalonId::new(),
            owner_id: UserId::new(),
            name: "Test Salon".to_string(),
            description: None,
            location: "1 Main St".to_string(),
            phone: None,
            opening_time: None,
            closing_time: None,
            weekly_closing: None,
            created_at: now,
            updated_at: now,
        };
        SqliteSalonRepository::new(pool.clone())
            .create(&salon)
            .await
            .unwrap();

        let service = Service {
            id: ServiceId::new(),
            salon_id: salon.id,
            name: "Haircut".to_string(),
            description: None,
            price: 60.0,
            duration_minutes: 30,
        };
        SqliteServiceRepository::new(pool.clone())
            .create(&service)
            .await
            .unwrap();

        let slot = TimeSlot {
            id: salonbook_types::slot::SlotId::new(),
            salon_id: salon.id,
            date: "2030-06-01".parse().unwrap(),
            start_time: "09:00:00".parse().unwrap(),
            end_time: "09:30:00".parse().unwrap(),
            is_available: true,
        };
        SqliteSlotRepository::new(pool.clone())
            .insert(&slot)
            .await
            .unwrap();

        Seed {
            salon_id: salon.id,
            service_id: service.id,
            slot,
        }
    }

    fn make_appointment(seed: &Seed) -> Appointment {
        Appointment {
            id: AppointmentId::new(),
            customer_id: UserId::new(),
            salon_id: seed.salon_id,
            service_id: seed.service_id,
            date: seed.slot.date,
            time: seed.slot.start_time,
            status: AppointmentStatus::Pending,
            has_paid_deposit: false,
            deposit_amount: 0.0,
            payment_method: None,
            payment_status: PaymentStatus::Unpaid,
            discounted_price: 0.0,
            transaction_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_booked_roundtrip() {
        let pool = test_pool().await;
        let seed = seed(&pool).await;
        let repo = SqliteAppointmentRepository::new(pool.clone());

        let appointment = make_appointment(&seed);
        repo.create_booked(&appointment, &seed.slot.id).await.unwrap();

        let found = repo.get_by_id(&appointment.id).await.unwrap().unwrap();
        assert_eq!(found.status, AppointmentStatus::Pending);
        assert_eq!(found.date, seed.slot.date);
        assert_eq!(found.time, seed.slot.start_time);

        // The slot is now reserved
        let slot = SqliteSlotRepository::new(pool)
            .get_by_id(&seed.slot.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!slot.is_available);
    }

    #[tokio::test]
    async fn test_create_booked_cas_loser_conflicts() {
        let pool = test_pool().await;
        let seed = seed(&pool).await;
        let repo = SqliteAppointmentRepository::new(pool.clone());

        repo.create_booked(&make_appointment(&seed), &seed.slot.id)
            .await
            .unwrap();

        let loser = make_appointment(&seed);
        let err = repo.create_booked(&loser, &seed.slot.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        // The losing insert left no appointment row behind
        assert!(repo.get_by_id(&loser.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_bookings_one_winner() {
        let pool = test_pool().await;
        let seed = seed(&pool).await;

        let a = SqliteAppointmentRepository::new(pool.clone());
        let b = SqliteAppointmentRepository::new(pool.clone());
        let (appt_a, appt_b) = (make_appointment(&seed), make_appointment(&seed));
        let slot_id = seed.slot.id;

        let (ra, rb) = tokio::join!(
            a.create_booked(&appt_a, &slot_id),
            b.create_booked(&appt_b, &slot_id),
        );

        let winners = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "exactly one booking must win");
        let loser = if ra.is_ok() { rb } else { ra };
        assert!(matches!(loser.unwrap_err(), RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_cancel_and_release_restores_slot() {
        let pool = test_pool().await;
        let seed = seed(&pool).await;
        let repo = SqliteAppointmentRepository::new(pool.clone());

        let appointment = make_appointment(&seed);
        repo.create_booked(&appointment, &seed.slot.id).await.unwrap();
        repo.cancel_and_release(&appointment).await.unwrap();

        let found = repo.get_by_id(&appointment.id).await.unwrap().unwrap();
        assert_eq!(found.status, AppointmentStatus::Cancelled);

        let slot = SqliteSlotRepository::new(pool)
            .get_by_id(&seed.slot.id)
            .await
            .unwrap()
            .unwrap();
        assert!(slot.is_available);
    }

    #[tokio::test]
    async fn test_record_payment_persists_fields() {
        let pool = test_pool().await;
        let seed = seed(&pool).await;
        let repo = SqliteAppointmentRepository::new(pool);

        let mut appointment = make_appointment(&seed);
        repo.create_booked(&appointment, &seed.slot.id).await.unwrap();

        appointment.has_paid_deposit = true;
        appointment.deposit_amount = 1.8;
        appointment.discounted_price = 57.0;
        appointment.payment_method = Some("card".to_string());
        appointment.payment_status = PaymentStatus::Completed;
        appointment.transaction_id = Some("txn-9".to_string());
        repo.record_payment(&appointment).await.unwrap();

        let found = repo.get_by_id(&appointment.id).await.unwrap().unwrap();
        assert!(found.has_paid_deposit);
        assert_eq!(found.deposit_amount, 1.8);
        assert_eq!(found.payment_status, PaymentStatus::Completed);
        assert_eq!(found.transaction_id.as_deref(), Some("txn-9"));
    }

    #[tokio::test]
    async fn test_record_payment_refuses_double_charge() {
        let pool = test_pool().await;
        let seed = seed(&pool).await;
        let repo = SqliteAppointmentRepository::new(pool);

        let mut appointment = make_appointment(&seed);
        repo.create_booked(&appointment, &seed.slot.id).await.unwrap();

        appointment.has_paid_deposit = true;
        appointment.deposit_amount = 1.8;
        appointment.payment_status = PaymentStatus::Completed;
        appointment.transaction_id = Some("txn-1".to_string());
        repo.record_payment(&appointment).await.unwrap();

        // A second payment write must lose, even though the guard column is
        // already set in the value it carries
        appointment.transaction_id = Some("txn-2".to_string());
        let err = repo.record_payment(&appointment).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let found = repo.get_by_id(&appointment.id).await.unwrap().unwrap();
        assert_eq!(found.transaction_id.as_deref(), Some("txn-1"));
    }

    #[tokio::test]
    async fn test_completed_visits_and_exists_completed() {
        let pool = test_pool().await;
        let seed = seed(&pool).await;
        let repo = SqliteAppointmentRepository::new(pool);

        let appointment = make_appointment(&seed);
        repo.create_booked(&appointment, &seed.slot.id).await.unwrap();
        assert!(!repo
            .exists_completed(&appointment.customer_id, &seed.salon_id)
            .await
            .unwrap());

        repo.set_status(&appointment.id, AppointmentStatus::Completed)
            .await
            .unwrap();

        let visits = repo.completed_visits(&seed.salon_id).await.unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].price, 60.0);
        assert_eq!(visits[0].date, seed.slot.date);
        assert!(repo
            .exists_completed(&appointment.customer_id, &seed.salon_id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_list_for_customer_newest_first() {
        let pool = test_pool().await;
        let seed = seed(&pool).await;
        let repo = SqliteAppointmentRepository::new(pool.clone());
        let slots = SqliteSlotRepository::new(pool);

        let customer = UserId::new();
        let later = TimeSlot {
            id: salonbook_types::slot::SlotId::new(),
            salon_id: seed.salon_id,
            date: "2030-06-02".parse().unwrap(),
            start_time: "10:00:00".parse().unwrap(),
            end_time: "10:30:00".parse().unwrap(),
            is_available: true,
        };
        slots.insert(&later).await.unwrap();

        let mut first = make_appointment(&seed);
        first.customer_id = customer;
        repo.create_booked(&first, &seed.slot.id).await.unwrap();

        let mut second = make_appointment(&seed);
        second.customer_id = customer;
        second.date = later.date;
        second.time = later.start_time;
        repo.create_booked(&second, &later.id).await.unwrap();

        let all = repo.list_for_customer(&customer).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
    }
}
