use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a user, wrapping a UUID v7 (time-sortable).
///
/// User records themselves live with the authentication collaborator; the
/// booking platform only ever sees opaque ids plus a [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new UserId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a UserId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Closed set of roles supplied by the auth collaborator.
///
/// Every mutating operation checks the acting role exhaustively; there are no
/// free-form role strings anywhere past the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    SalonOwner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::SalonOwner => write!(f, "salon_owner"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "salon_owner" => Ok(Role::SalonOwner),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// The acting user attached to every request by the auth collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: Role,
}

impl CurrentUser {
    pub fn customer(id: UserId) -> Self {
        Self {
            id,
            role: Role::Customer,
        }
    }

    pub fn salon_owner(id: UserId) -> Self {
        Self {
            id,
            role: Role::SalonOwner,
        }
    }

    pub fn is_customer(&self) -> bool {
        self.role == Role::Customer
    }

    pub fn is_salon_owner(&self) -> bool {
        self.role == Role::SalonOwner
    }
}
