//! Notification repository trait definition.

use salonbook_types::error::RepositoryError;
use salonbook_types::notification::{Notification, NotificationId};
use salonbook_types::user::UserId;

/// Repository trait for notification persistence.
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification.
    fn insert(
        &self,
        notification: &Notification,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a notification by id.
    fn get_by_id(
        &self,
        id: &NotificationId,
    ) -> impl std::future::Future<Output = Result<Option<Notification>, RepositoryError>> + Send;

    /// Unread notifications for a user, newest first.
    fn list_unread(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Notification>, RepositoryError>> + Send;

    /// Mark a notification as read.
    fn mark_read(
        &self,
        id: &NotificationId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete all notifications addressed to a user.
    fn clear_for_user(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
