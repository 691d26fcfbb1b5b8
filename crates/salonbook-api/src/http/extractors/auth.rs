//! Identity extractor.
//!
//! Authentication itself lives with an upstream collaborator (gateway or
//! session service); by the time a request reaches this API the caller's
//! identity arrives as two trusted headers:
//!
//! - `x-user-id`: the user's UUID
//! - `x-user-role`: `customer` or `salon_owner`
//!
//! Extracting [`Identity`] validates both headers and yields the domain
//! `CurrentUser`; handlers never touch raw header values.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use salonbook_types::user::{CurrentUser, Role, UserId};

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated caller, parsed from identity headers.
pub struct Identity(pub CurrentUser);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = header_value(parts, "x-user-id")?
            .parse::<UserId>()
            .map_err(|_| AppError::Unauthorized("x-user-id is not a valid UUID".to_string()))?;

        let role = header_value(parts, "x-user-role")?
            .parse::<Role>()
            .map_err(AppError::Unauthorized)?;

        Ok(Identity(CurrentUser { id, role }))
    }
}

fn header_value(parts: &Parts, name: &str) -> Result<String, AppError> {
    let value = parts
        .headers
        .get(name)
        .ok_or_else(|| AppError::Unauthorized(format!("missing {name} header")))?;
    let s = value
        .to_str()
        .map_err(|_| AppError::Unauthorized(format!("invalid {name} header encoding")))?;
    Ok(s.trim().to_string())
}
