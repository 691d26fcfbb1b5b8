//! SQLite time slot repository implementation.
//!
//! Time comparisons run directly in SQL: `HH:MM:SS` strings compare
//! lexicographically in time order, so BETWEEN and inequality predicates
//! match the in-memory semantics of `TimeSlot::covers` and
//! `TimeSlot::overlaps`.

use chrono::{NaiveDate, NaiveTime};
use sqlx::Row;

use salonbook_core::repository::slot::SlotRepository;
use salonbook_types::error::RepositoryError;
use salonbook_types::salon::SalonId;
use salonbook_types::slot::{SlotId, TimeSlot};

use super::pool::DatabasePool;
use super::{format_date, format_time, parse_date, parse_time, query_err};

/// SQLite-backed implementation of `SlotRepository`.
pub struct SqliteSlotRepository {
    pool: DatabasePool,
}

impl SqliteSlotRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_slot(row: &sqlx::sqlite::SqliteRow) -> Result<TimeSlot, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_err)?;
    let salon_id: String = row.try_get("salon_id").map_err(query_err)?;
    let date: String = row.try_get("date").map_err(query_err)?;
    let start_time: String = row.try_get("start_time").map_err(query_err)?;
    let end_time: String = row.try_get("end_time").map_err(query_err)?;
    let is_available: i64 = row.try_get("is_available").map_err(query_err)?;

    Ok(TimeSlot {
        id: id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid slot id: {e}")))?,
        salon_id: salon_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid salon id: {e}")))?,
        date: parse_date(&date)?,
        start_time: parse_time(&start_time)?,
        end_time: parse_time(&end_time)?,
        is_available: is_available != 0,
    })
}

impl SlotRepository for SqliteSlotRepository {
    async fn insert(&self, slot: &TimeSlot) -> Result<TimeSlot, RepositoryError> {
        sqlx::query(
            "INSERT INTO time_slots (id, salon_id, date, start_time, end_time, is_available)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(slot.id.to_string())
        .bind(slot.salon_id.to_string())
        .bind(format_date(slot.date))
        .bind(format_time(slot.start_time))
        .bind(format_time(slot.end_time))
        .bind(slot.is_available as i64)
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(slot.clone())
    }

    async fn get_by_id(&self, id: &SlotId) -> Result<Option<TimeSlot>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM time_slots WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_slot).transpose()
    }

    async fn find_overlapping(
        &self,
        salon_id: &SalonId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Option<TimeSlot>, RepositoryError> {
        // Half-open interval test; availability is irrelevant here
        let row = sqlx::query(
            "SELECT * FROM time_slots
             WHERE salon_id = ? AND date = ? AND start_time < ? AND end_time > ?
             LIMIT 1",
        )
        .bind(salon_id.to_string())
        .bind(format_date(date))
        .bind(format_time(end))
        .bind(format_time(start))
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        row.as_ref().map(row_to_slot).transpose()
    }

    async fn find_available(
        &self,
        salon_id: &SalonId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Option<TimeSlot>, RepositoryError> {
        // Both boundaries inclusive: a 09:00-09:30 slot is bookable at 09:30
        let row = sqlx::query(
            "SELECT * FROM time_slots
             WHERE salon_id = ? AND date = ? AND is_available = 1
               AND start_time <= ? AND end_time >= ?
             LIMIT 1",
        )
        .bind(salon_id.to_string())
        .bind(format_date(date))
        .bind(format_time(time))
        .bind(format_time(time))
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        row.as_ref().map(row_to_slot).transpose()
    }

    async fn list_available_from(
        &self,
        salon_id: &SalonId,
        from_date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM time_slots
             WHERE salon_id = ? AND is_available = 1 AND date >= ?
             ORDER BY date, start_time",
        )
        .bind(salon_id.to_string())
        .bind(format_date(from_date))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter().map(row_to_slot).collect()
    }

    async fn list_window(
        &self,
        salon_id: &SalonId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeSlot>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM time_slots
             WHERE salon_id = ? AND date BETWEEN ? AND ?
             ORDER BY date, start_time",
        )
        .bind(salon_id.to_string())
        .bind(format_date(from))
        .bind(format_date(to))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter().map(row_to_slot).collect()
    }

    async fn release(
        &self,
        salon_id: &SalonId,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Result<(), RepositoryError> {
        // Zero rows affected is fine: release is a silent no-op when the
        // appointment time does not match a slot start
        sqlx::query(
            "UPDATE time_slots SET is_available = 1
             WHERE salon_id = ? AND date = ? AND start_time = ?",
        )
        .bind(salon_id.to_string())
        .bind(format_date(date))
        .bind(format_time(start_time))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(())
    }

    async fn delete(&self, id: &SlotId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM time_slots WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
