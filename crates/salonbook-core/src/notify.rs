//! Notification sink port and fire-and-forget delivery wrapper.
//!
//! Lifecycle events (booking, confirmation, cancellation, completion,
//! payment) address a user through [`NotificationSink`]. Delivery is
//! fire-and-forget: a failing sink must never abort the operation that
//! triggered it, so [`Notifier`] logs failures and swallows them.

use salonbook_types::error::NotificationError;
use salonbook_types::notification::NotificationKind;
use salonbook_types::user::UserId;
use uuid::Uuid;

/// Sink for lifecycle events addressed to a user.
///
/// The default implementation in salonbook-infra persists notifications to
/// the database; other transports (mail, push) slot in behind the same trait.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification to `user_id`. `related_id` points at the
    /// triggering entity (appointment, payment, ...).
    fn notify(
        &self,
        user_id: &UserId,
        content: &str,
        kind: NotificationKind,
        related_id: Option<Uuid>,
    ) -> impl std::future::Future<Output = Result<(), NotificationError>> + Send;
}

/// Wraps a [`NotificationSink`] with the fire-and-forget policy.
pub struct Notifier<S: NotificationSink> {
    sink: S,
}

impl<S: NotificationSink> Notifier<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Deliver a notification, logging and discarding any sink error.
    pub async fn send(
        &self,
        user_id: &UserId,
        content: &str,
        kind: NotificationKind,
        related_id: Option<Uuid>,
    ) {
        if let Err(err) = self.sink.notify(user_id, content, kind, related_id).await {
            tracing::warn!(user = %user_id, %kind, "notification delivery failed: {err}");
        }
    }
}
