//! Notification feed endpoint handlers.

use axum::extract::{Path, State};
use axum::Json;

use salonbook_types::notification::{Notification, NotificationId, SendMessageRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::http::response::StatusResponse;
use crate::state::AppState;

/// GET /api/v1/notifications - The caller's unread notifications, newest
/// first.
pub async fn list_unread(
    State(state): State<AppState>,
    Identity(acting): Identity,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.notifications.list_unread(&acting).await?))
}

/// POST /api/v1/notifications/{id}/read - Mark one notification read.
pub async fn mark_read(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Path(notification_id): Path<NotificationId>,
) -> Result<Json<StatusResponse>, AppError> {
    state.notifications.mark_read(&acting, &notification_id).await?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/v1/messages - Message another user; lands in their feed as a
/// `message`-kind notification.
pub async fn send_message(
    State(state): State<AppState>,
    Identity(acting): Identity,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<Notification>, AppError> {
    Ok(Json(state.notifications.send_message(&acting, body).await?))
}

/// DELETE /api/v1/notifications - Clear the caller's notifications.
pub async fn clear_all(
    State(state): State<AppState>,
    Identity(acting): Identity,
) -> Result<Json<StatusResponse>, AppError> {
    state.notifications.clear_all(&acting).await?;
    Ok(Json(StatusResponse::ok_with("notifications cleared")))
}
