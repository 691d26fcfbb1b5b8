//! Staff listing endpoint handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use salonbook_types::employee::{Employee, EmployeeId, EmployeeRequest};
use salonbook_types::salon::SalonId;

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddEmployeeQuery {
    pub name: String,
    pub role: Option<String>,
    /// Original filename of the photo carried in the request body, if any.
    pub filename: Option<String>,
}

/// POST /api/v1/salons/{id}/employees?name=...&role=...&filename=... - Add a
/// staff member. When `filename` is set the request body holds the raw photo
/// bytes.
pub async fn add_employee(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(salon_id): Path<SalonId>,
    Query(query): Query<AddEmployeeQuery>,
    body: axum::body::Bytes,
) -> Result<Json<Employee>, AppError> {
    let photo = match &query.filename {
        Some(name) => {
            if body.is_empty() {
                return Err(AppError::Validation("photo body is empty".to_string()));
            }
            Some((body.as_ref(), name.as_str()))
        }
        None => None,
    };

    let request = EmployeeRequest {
        name: query.name,
        role: query.role,
    };
    let employee = state
        .catalog
        .add_employee(&acting, &salon_id, request, photo)
        .await?;
    Ok(Json(employee))
}

/// GET /api/v1/salons/{id}/employees - The salon's staff listing.
pub async fn list_employees(
    State(state): State<AppState>,
    Path(salon_id): Path<SalonId>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(state.catalog.list_employees(&salon_id).await?))
}

/// DELETE /api/v1/employees/{id} - Remove a staff member.
pub async fn delete_employee(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(employee_id): Path<EmployeeId>,
) -> Result<axum::http::StatusCode, AppError> {
    state.catalog.delete_employee(&acting, &employee_id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
