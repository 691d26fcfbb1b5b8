use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Unique identifier for a salon, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalonId(pub Uuid);

impl SalonId {
    /// Create a new SalonId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a SalonId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SalonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SalonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SalonId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A salon listing.
///
/// The salon strictly owns its services, employees, images, and time slots;
/// deleting a salon deletes all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salon {
    pub id: SalonId,
    /// The salon_owner user managing this salon.
    pub owner_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub phone: Option<String>,
    /// Daily opening hour as entered by the owner (display string, e.g. "09:00").
    pub opening_time: Option<String>,
    /// Daily closing hour as entered by the owner.
    pub closing_time: Option<String>,
    /// Day of week when the salon is closed.
    pub weekly_closing: Option<Weekday>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An image attached to a salon listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonImage {
    pub id: Uuid,
    pub salon_id: SalonId,
    /// Stable path returned by the image store collaborator.
    pub image_path: String,
}

/// Request to create a salon listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSalonRequest {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub phone: Option<String>,
}

/// Request to update a salon profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSalonRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub weekly_closing: Option<Weekday>,
}
