use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::salon::SalonId;
use crate::service::ServiceId;
use crate::user::UserId;

/// Fraction of the service price charged as a booking deposit.
pub const DEPOSIT_RATE: f64 = 0.03;

/// Price multiplier applied when the customer pays the deposit (5% off).
pub const DISCOUNT_RATE: f64 = 0.95;

/// Round a monetary amount to two decimal places.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Unique identifier for an appointment, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentId(pub Uuid);

impl AppointmentId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AppointmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppointmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Appointment lifecycle states.
///
/// ```text
/// pending --confirm--> confirmed --complete--> completed
/// pending --cancel--> cancelled
/// confirmed --cancel--> cancelled
/// ```
///
/// `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Whether the lifecycle permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Confirmed, Completed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("invalid appointment status: '{other}'")),
        }
    }
}

/// Deposit payment states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Pending,
    Completed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            other => Err(format!("invalid payment status: '{other}'")),
        }
    }
}

/// A booked visit. Created on successful booking, never deleted -- only
/// transitioned through [`AppointmentStatus`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub customer_id: UserId,
    pub salon_id: SalonId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    /// Requested time; matches the reserved slot's start for slot release.
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub has_paid_deposit: bool,
    pub deposit_amount: f64,
    pub payment_method: Option<String>,
    pub payment_status: PaymentStatus,
    /// Discounted service price when a deposit was chosen, otherwise 0.
    pub discounted_price: f64,
    /// Reference recorded from the payment gateway collaborator.
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to book an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// When true, 3% of the price is due up front and the final price is 5% off.
    #[serde(default)]
    pub pay_deposit: bool,
}

/// Outcome of a booking: either done, or waiting on the deposit payment flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingOutcome {
    pub appointment: Appointment,
    /// True when the caller must continue into the payment flow.
    pub payment_required: bool,
}

/// Request to record a deposit payment against an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub payment_method: String,
    pub transaction_id: String,
}
