//! SQLite notification repository and the persisted notification sink.
//!
//! The same type implements both ports: `NotificationRepository` for the
//! feed (list unread, mark read, clear) and `NotificationSink` so lifecycle
//! events land in the same table.

use sqlx::Row;
use uuid::Uuid;

use salonbook_core::notify::NotificationSink;
use salonbook_core::repository::notification::NotificationRepository;
use salonbook_types::error::{NotificationError, RepositoryError};
use salonbook_types::notification::{Notification, NotificationId, NotificationKind};
use salonbook_types::user::UserId;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_err};

/// SQLite-backed implementation of `NotificationRepository` and
/// `NotificationSink`.
pub struct SqliteNotificationRepository {
    pool: DatabasePool,
}

impl SqliteNotificationRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_notification(row: &sqlx::sqlite::SqliteRow) -> Result<Notification, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_err)?;
    let user_id: String = row.try_get("user_id").map_err(query_err)?;
    let kind: String = row.try_get("kind").map_err(query_err)?;
    let related_id: Option<String> = row.try_get("related_id").map_err(query_err)?;
    let is_read: i64 = row.try_get("is_read").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;

    Ok(Notification {
        id: id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid notification id: {e}")))?,
        user_id: user_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
        content: row.try_get("content").map_err(query_err)?,
        kind: kind.parse::<NotificationKind>().map_err(RepositoryError::Query)?,
        related_id: related_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| RepositoryError::Query(format!("invalid related id: {e}")))?,
        is_read: is_read != 0,
        created_at: parse_datetime(&created_at)?,
    })
}

impl NotificationRepository for SqliteNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO notifications (id, user_id, content, kind, related_id, is_read, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(notification.id.to_string())
        .bind(notification.user_id.to_string())
        .bind(&notification.content)
        .bind(notification.kind.to_string())
        .bind(notification.related_id.map(|id| id.to_string()))
        .bind(notification.is_read as i64)
        .bind(format_datetime(&notification.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;
        Ok(())
    }

    async fn get_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM notifications WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_notification).transpose()
    }

    async fn list_unread(&self, user_id: &UserId) -> Result<Vec<Notification>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM notifications WHERE user_id = ? AND is_read = 0 ORDER BY created_at DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter().map(row_to_notification).collect()
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn clear_for_user(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM notifications WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;
        Ok(())
    }
}

impl NotificationSink for SqliteNotificationRepository {
    async fn notify(
        &self,
        user_id: &UserId,
        content: &str,
        kind: NotificationKind,
        related_id: Option<Uuid>,
    ) -> Result<(), NotificationError> {
        let notification = Notification {
            id: NotificationId::new(),
            user_id: *user_id,
            content: content.to_string(),
            kind,
            related_id,
            is_read: false,
            created_at: chrono::Utc::now(),
        };
        NotificationRepository::insert(self, &notification)
            .await
            .map_err(|e| NotificationError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::testing::test_pool;

    #[tokio::test]
    async fn test_sink_persists_and_lists_unread() {
        let repo = SqliteNotificationRepository::new(test_pool().await);
        let user = UserId::new();

        repo.notify(&user, "booked", NotificationKind::Appointment, Some(Uuid::now_v7()))
            .await
            .unwrap();
        repo.notify(&user, "paid", NotificationKind::Payment, None)
            .await
            .unwrap();

        let unread = repo.list_unread(&user).await.unwrap();
        assert_eq!(unread.len(), 2);
        assert!(unread.iter().any(|n| n.kind == NotificationKind::Payment));
    }

    #[tokio::test]
    async fn test_mark_read_removes_from_unread() {
        let repo = SqliteNotificationRepository::new(test_pool().await);
        let user = UserId::new();
        repo.notify(&user, "hello", NotificationKind::System, None)
            .await
            .unwrap();

        let unread = repo.list_unread(&user).await.unwrap();
        repo.mark_read(&unread[0].id).await.unwrap();
        assert!(repo.list_unread(&user).await.unwrap().is_empty());

        let err = repo.mark_read(&NotificationId::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_clear_for_user_scoped() {
        let repo = SqliteNotificationRepository::new(test_pool().await);
        let (a, b) = (UserId::new(), UserId::new());
        repo.notify(&a, "for a", NotificationKind::System, None).await.unwrap();
        repo.notify(&b, "for b", NotificationKind::System, None).await.unwrap();

        repo.clear_for_user(&a).await.unwrap();
        assert!(repo.list_unread(&a).await.unwrap().is_empty());
        assert_eq!(repo.list_unread(&b).await.unwrap().len(), 1);
    }
}
