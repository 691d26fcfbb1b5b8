use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::salon::SalonId;

/// Unique identifier for an employee, wrapping a UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A staff member listed on a salon's page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub salon_id: SalonId,
    pub name: String,
    /// Job title shown on the listing, e.g. "Stylist".
    pub role: Option<String>,
    /// Stable path returned by the image store collaborator.
    pub image_path: Option<String>,
}

/// Request to add an employee to a salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    pub name: String,
    pub role: Option<String>,
}
