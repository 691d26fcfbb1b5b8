//! SQLite salon repository implementation.
//!
//! Implements `SalonRepository` from `salonbook-core` using sqlx with split
//! read/write pools.

use chrono::Weekday;
use sqlx::Row;
use uuid::Uuid;

use salonbook_core::repository::salon::SalonRepository;
use salonbook_types::error::RepositoryError;
use salonbook_types::salon::{Salon, SalonId, SalonImage};
use salonbook_types::user::UserId;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_err};

/// SQLite-backed implementation of `SalonRepository`.
pub struct SqliteSalonRepository {
    pool: DatabasePool,
}

impl SqliteSalonRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to the domain Salon.
struct SalonRow {
    id: String,
    owner_id: String,
    name: String,
    description: Option<String>,
    location: String,
    phone: Option<String>,
    opening_time: Option<String>,
    closing_time: Option<String>,
    weekly_closing: Option<String>,
    created_at: String,
    updated_at: String,
}

impl SalonRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            location: row.try_get("location")?,
            phone: row.try_get("phone")?,
            opening_time: row.try_get("opening_time")?,
            closing_time: row.try_get("closing_time")?,
            weekly_closing: row.try_get("weekly_closing")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_salon(self) -> Result<Salon, RepositoryError> {
        let id = self
            .id
            .parse::<SalonId>()
            .map_err(|e| RepositoryError::Query(format!("invalid salon id: {e}")))?;
        let owner_id = self
            .owner_id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid owner id: {e}")))?;
        let weekly_closing = self
            .weekly_closing
            .as_deref()
            .map(|s| {
                s.parse::<Weekday>()
                    .map_err(|e| RepositoryError::Query(format!("invalid weekday '{s}': {e}")))
            })
            .transpose()?;

        Ok(Salon {
            id,
            owner_id,
            name: self.name,
            description: self.description,
            location: self.location,
            phone: self.phone,
            opening_time: self.opening_time,
            closing_time: self.closing_time,
            weekly_closing,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn row_to_salon(row: &sqlx::sqlite::SqliteRow) -> Result<Salon, RepositoryError> {
    SalonRow::from_row(row).map_err(query_err)?.into_salon()
}

impl SalonRepository for SqliteSalonRepository {
    async fn create(&self, salon: &Salon) -> Result<Salon, RepositoryError> {
        sqlx::query(
            "INSERT INTO salons (id, owner_id, name, description, location, phone, opening_time, closing_time, weekly_closing, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(salon.id.to_string())
        .bind(salon.owner_id.to_string())
        .bind(&salon.name)
        .bind(&salon.description)
        .bind(&salon.location)
        .bind(&salon.phone)
        .bind(&salon.opening_time)
        .bind(&salon.closing_time)
        .bind(salon.weekly_closing.map(|d| d.to_string()))
        .bind(format_datetime(&salon.created_at))
        .bind(format_datetime(&salon.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(salon.clone())
    }

    async fn get_by_id(&self, id: &SalonId) -> Result<Option<Salon>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM salons WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_salon).transpose()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Option<Salon>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM salons WHERE owner_id = ?")
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_salon).transpose()
    }

    async fn list(&self) -> Result<Vec<Salon>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM salons ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter().map(row_to_salon).collect()
    }

    async fn update(&self, salon: &Salon) -> Result<Salon, RepositoryError> {
        let result = sqlx::query(
            "UPDATE salons SET name = ?, description = ?, location = ?, phone = ?, opening_time = ?, closing_time = ?, weekly_closing = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&salon.name)
        .bind(&salon.description)
        .bind(&salon.location)
        .bind(&salon.phone)
        .bind(&salon.opening_time)
        .bind(&salon.closing_time)
        .bind(salon.weekly_closing.map(|d| d.to_string()))
        .bind(format_datetime(&salon.updated_at))
        .bind(salon.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(salon.clone())
    }

    async fn delete(&self, id: &SalonId) -> Result<(), RepositoryError> {
        // FK ON DELETE CASCADE takes the owned services, employees, images,
        // slots, and appointments with the salon row.
        let result = sqlx::query("DELETE FROM salons WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn add_image(&self, image: &SalonImage) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO salon_images (id, salon_id, image_path) VALUES (?, ?, ?)")
            .bind(image.id.to_string())
            .bind(image.salon_id.to_string())
            .bind(&image.image_path)
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn list_images(&self, salon_id: &SalonId) -> Result<Vec<SalonImage>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM salon_images WHERE salon_id = ? ORDER BY id")
            .bind(salon_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id").map_err(query_err)?;
                let salon_id: String = row.try_get("salon_id").map_err(query_err)?;
                Ok(SalonImage {
                    id: Uuid::parse_str(&id)
                        .map_err(|e| RepositoryError::Query(format!("invalid image id: {e}")))?,
                    salon_id: salon_id
                        .parse()
                        .map_err(|e| RepositoryError::Query(format!("invalid salon id: {e}")))?,
                    image_path: row.try_get("image_path").map_err(query_err)?,
                })
            })
            .collect()
    }
}
