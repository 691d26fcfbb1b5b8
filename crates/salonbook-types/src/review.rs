use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::salon::SalonId;
use crate::user::UserId;

/// Lowest accepted star rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: i32 = 5;

/// Unique identifier for a review, wrapping a UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub Uuid);

impl ReviewId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A customer's rating of a salon.
///
/// At most one review exists per (customer, salon) pair; posting again
/// overwrites the rating, comment, and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub customer_id: UserId,
    pub salon_id: SalonId,
    /// Integer star rating in `1..=5`.
    pub rating: i32,
    pub comment: Option<String>,
    pub posted_at: DateTime<Utc>,
}

/// Request to post or refresh a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}
