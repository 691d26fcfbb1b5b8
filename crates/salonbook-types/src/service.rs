use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::salon::SalonId;

/// Unique identifier for a service, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(pub Uuid);

impl ServiceId {
    /// Create a new ServiceId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a ServiceId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ServiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A bookable service offered by a single salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub salon_id: SalonId,
    pub name: String,
    pub description: Option<String>,
    /// Non-negative price in the salon's currency.
    pub price: f64,
    /// Duration in minutes, strictly positive.
    pub duration_minutes: u32,
}

/// Request to add or update a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: u32,
}
