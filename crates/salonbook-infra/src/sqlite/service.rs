//! SQLite service (catalog entry) repository implementation.

use sqlx::Row;

use salonbook_core::repository::service::ServiceRepository;
use salonbook_types::error::RepositoryError;
use salonbook_types::salon::SalonId;
use salonbook_types::service::{Service, ServiceId};

use super::pool::DatabasePool;
use super::query_err;

/// SQLite-backed implementation of `ServiceRepository`.
pub struct SqliteServiceRepository {
    pool: DatabasePool,
}

impl SqliteServiceRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_service(row: &sqlx::sqlite::SqliteRow) -> Result<Service, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_err)?;
    let salon_id: String = row.try_get("salon_id").map_err(query_err)?;
    let duration: i64 = row.try_get("duration_minutes").map_err(query_err)?;

    Ok(Service {
        id: id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid service id: {e}")))?,
        salon_id: salon_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid salon id: {e}")))?,
        name: row.try_get("name").map_err(query_err)?,
        description: row.try_get("description").map_err(query_err)?,
        price: row.try_get("price").map_err(query_err)?,
        duration_minutes: duration as u32,
    })
}

impl ServiceRepository for SqliteServiceRepository {
    async fn create(&self, service: &Service) -> Result<Service, RepositoryError> {
        sqlx::query(
            "INSERT INTO services (id, salon_id, name, description, price, duration_minutes)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(service.id.to_string())
        .bind(service.salon_id.to_string())
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price)
        .bind(service.duration_minutes as i64)
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(service.clone())
    }

    async fn get_by_id(&self, id: &ServiceId) -> Result<Option<Service>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM services WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_service).transpose()
    }

    async fn list_for_salon(&self, salon_id: &SalonId) -> Result<Vec<Service>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM services WHERE salon_id = ? ORDER BY name")
            .bind(salon_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter().map(row_to_service).collect()
    }

    async fn update(&self, service: &Service) -> Result<Service, RepositoryError> {
        let result = sqlx::query(
            "UPDATE services SET name = ?, description = ?, price = ?, duration_minutes = ?
             WHERE id = ?",
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price)
        .bind(service.duration_minutes as i64)
        .bind(service.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(service.clone())
    }

    async fn delete(&self, id: &ServiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
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
