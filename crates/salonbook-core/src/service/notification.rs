//! Persisted notification feed: unread listing, mark-read, clear-all, and
//! direct messages delivered as notifications.

use chrono::Utc;

use salonbook_types::error::NotificationError;
use salonbook_types::notification::{
    Notification, NotificationId, NotificationKind, SendMessageRequest,
};
use salonbook_types::user::CurrentUser;

use crate::repository::notification::NotificationRepository;

pub struct NotificationService<R: NotificationRepository> {
    repo: R,
}

impl<R: NotificationRepository> NotificationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The caller's unread notifications, newest first.
    pub async fn list_unread(
        &self,
        acting: &CurrentUser,
    ) -> Result<Vec<Notification>, NotificationError> {
        self.repo
            .list_unread(&acting.id)
            .await
            .map_err(|e| NotificationError::Storage(e.to_string()))
    }

    /// Mark one notification read. Recipient-only.
    pub async fn mark_read(
        &self,
        acting: &CurrentUser,
        id: &NotificationId,
    ) -> Result<(), NotificationError> {
        let notification = self
            .repo
            .get_by_id(id)
            .await
            .map_err(|e| NotificationError::Storage(e.to_string()))?
            .ok_or(NotificationError::NotFound)?;

        if notification.user_id != acting.id {
            return Err(NotificationError::Forbidden(
                "not the recipient of this notification".to_string(),
            ));
        }

        self.repo
            .mark_read(id)
            .await
            .map_err(|e| NotificationError::Storage(e.to_string()))
    }

    /// Drop every notification addressed to the caller, read or not.
    pub async fn clear_all(&self, acting: &CurrentUser) -> Result<(), NotificationError> {
        self.repo
            .clear_for_user(&acting.id)
            .await
            .map_err(|e| NotificationError::Storage(e.to_string()))
    }

    /// Send a direct message to another user, delivered to their feed as a
    /// `message`-kind notification. Unlike the fire-and-forget booking
    /// notifications, delivery failure here is the operation failing.
    pub async fn send_message(
        &self,
        acting: &CurrentUser,
        request: SendMessageRequest,
    ) -> Result<Notification, NotificationError> {
        if request.content.trim().is_empty() {
            return Err(NotificationError::Validation(
                "message content is required".to_string(),
            ));
        }
        if request.recipient_id == acting.id {
            return Err(NotificationError::Validation(
                "cannot message yourself".to_string(),
            ));
        }

        let notification = Notification {
            id: NotificationId::new(),
            user_id: request.recipient_id,
            content: request.content,
            kind: NotificationKind::Message,
            related_id: request.appointment_id,
            is_read: false,
            created_at: Utc::now(),
        };
        self.repo
            .insert(&notification)
            .await
            .map_err(|e| NotificationError::Storage(e.to_string()))?;
        tracing::debug!(from = %acting.id, to = %notification.user_id, "message delivered");
        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationSink;
    use crate::testing::MemStore;
    use salonbook_types::notification::NotificationKind;
    use salonbook_types::user::UserId;

    async fn seed(store: &MemStore, user: &CurrentUser, content: &str) {
        store
            .notify(&user.id, content, NotificationKind::System, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_unread_excludes_read_and_foreign() {
        let store = MemStore::new();
        let service = NotificationService::new(store.clone());
        let user = CurrentUser::customer(UserId::new());
        let other = CurrentUser::customer(UserId::new());

        seed(&store, &user, "first").await;
        seed(&store, &user, "second").await;
        seed(&store, &other, "not yours").await;

        let unread = service.list_unread(&user).await.unwrap();
        assert_eq!(unread.len(), 2);

        service.mark_read(&user, &unread[0].id).await.unwrap();
        let unread = service.list_unread(&user).await.unwrap();
        assert_eq!(unread.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_recipient_only() {
        let store = MemStore::new();
        let service = NotificationService::new(store.clone());
        let user = CurrentUser::customer(UserId::new());
        seed(&store, &user, "yours").await;
        let id = service.list_unread(&user).await.unwrap()[0].id;

        let stranger = CurrentUser::customer(UserId::new());
        let err = service.mark_read(&stranger, &id).await.unwrap_err();
        assert!(matches!(err, NotificationError::Forbidden(_)));

        let err = service
            .mark_read(&user, &NotificationId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::NotFound));
    }

    #[tokio::test]
    async fn test_clear_all_only_touches_caller() {
        let store = MemStore::new();
        let service = NotificationService::new(store.clone());
        let user = CurrentUser::customer(UserId::new());
        let other = CurrentUser::customer(UserId::new());
        seed(&store, &user, "a").await;
        seed(&store, &other, "b").await;

        service.clear_all(&user).await.unwrap();
        assert!(service.list_unread(&user).await.unwrap().is_empty());
        assert_eq!(service.list_unread(&other).await.unwrap().len(), 1);
    }

    fn message_to(recipient: &CurrentUser, content: &str) -> SendMessageRequest {
        SendMessageRequest {
            recipient_id: recipient.id,
            content: content.to_string(),
            appointment_id: None,
        }
    }

    #[tokio::test]
    async fn test_send_message_lands_in_recipient_feed() {
        let store = MemStore::new();
        let service = NotificationService::new(store.clone());
        let customer = CurrentUser::customer(UserId::new());
        let owner = CurrentUser::salon_owner(UserId::new());

        let sent = service
            .send_message(&customer, message_to(&owner, "running ten minutes late"))
            .await
            .unwrap();
        assert_eq!(sent.kind, NotificationKind::Message);
        assert!(!sent.is_read);

        let feed = service.list_unread(&owner).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].content, "running ten minutes late");
        assert!(service.list_unread(&customer).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_message_rejects_empty_and_self() {
        let store = MemStore::new();
        let service = NotificationService::new(store.clone());
        let customer = CurrentUser::customer(UserId::new());
        let owner = CurrentUser::salon_owner(UserId::new());

        let err = service
            .send_message(&customer, message_to(&owner, "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::Validation(_)));

        let err = service
            .send_message(&customer, message_to(&customer, "hello me"))
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::Validation(_)));
    }
}
