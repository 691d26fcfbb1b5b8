//! SQLite employee repository implementation.

use sqlx::Row;

use salonbook_core::repository::employee::EmployeeRepository;
use salonbook_types::employee::{Employee, EmployeeId};
use salonbook_types::error::RepositoryError;
use salonbook_types::salon::SalonId;

use super::pool::DatabasePool;
use super::query_err;

/// SQLite-backed implementation of `EmployeeRepository`.
pub struct SqliteEmployeeRepository {
    pool: DatabasePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_employee(row: &sqlx::sqlite::SqliteRow) -> Result<Employee, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_err)?;
    let salon_id: String = row.try_get("salon_id").map_err(query_err)?;

    Ok(Employee {
        id: id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid employee id: {e}")))?,
        salon_id: salon_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid salon id: {e}")))?,
        name: row.try_get("name").map_err(query_err)?,
        role: row.try_get("role").map_err(query_err)?,
        image_path: row.try_get("image_path").map_err(query_err)?,
    })
}

impl EmployeeRepository for SqliteEmployeeRepository {
    async fn create(&self, employee: &Employee) -> Result<Employee, RepositoryError> {
        sqlx::query(
            "INSERT INTO employees (id, salon_id, name, role, image_path) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(employee.id.to_string())
        .bind(employee.salon_id.to_string())
        .bind(&employee.name)
        .bind(&employee.role)
        .bind(&employee.image_path)
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(employee.clone())
    }

    async fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM employees WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_employee).transpose()
    }

    async fn list_for_salon(&self, salon_id: &SalonId) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM employees WHERE salon_id = ? ORDER BY name")
            .bind(salon_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter().map(row_to_employee).collect()
    }

    async fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
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
