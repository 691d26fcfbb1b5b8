//! Shared response payload types.

use serde::Serialize;

/// Flat `{"success": bool, "message"?: string}` body used by the JSON
/// convenience endpoints (mark-notification-read, delete-timeslot).
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}
