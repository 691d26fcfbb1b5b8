use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Unique identifier for a notification, wrapping a UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Appointment,
    Message,
    Payment,
    System,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Appointment => write!(f, "appointment"),
            NotificationKind::Message => write!(f, "message"),
            NotificationKind::Payment => write!(f, "payment"),
            NotificationKind::System => write!(f, "system"),
        }
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "appointment" => Ok(NotificationKind::Appointment),
            "message" => Ok(NotificationKind::Message),
            "payment" => Ok(NotificationKind::Payment),
            "system" => Ok(NotificationKind::System),
            other => Err(format!("invalid notification kind: '{other}'")),
        }
    }
}

/// A fire-and-forget event record addressed to one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub content: String,
    pub kind: NotificationKind,
    /// Id of the triggering entity (appointment, payment, ...), if any.
    pub related_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to send a direct message to another user.
///
/// Messages are delivered as `message`-kind notifications to the recipient;
/// there is no separate conversation store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: UserId,
    pub content: String,
    /// Appointment the conversation is about, if any.
    pub appointment_id: Option<Uuid>,
}
