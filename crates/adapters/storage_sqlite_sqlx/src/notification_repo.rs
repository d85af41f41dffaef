//! `SQLite` implementation of the notification store.
//!
//! Implements both [`NotificationSink`] (the engine's append-only view)
//! and [`NotificationRepository`] (the recipient-facing reads).

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use taskhub_app::ports::{NotificationRepository, NotificationSink};
use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{NotificationId, UserId};
use taskhub_domain::notification::{Notification, NotificationKind};

use crate::error::StorageError;

struct Wrapper(Notification);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let kind: String = row.try_get("kind")?;
        let title: String = row.try_get("title")?;
        let message: String = row.try_get("message")?;
        let entity_type: String = row.try_get("entity_type")?;
        let entity_id: String = row.try_get("entity_id")?;
        let read: bool = row.try_get("read")?;
        let created_at: String = row.try_get("created_at")?;

        let id = NotificationId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let user_id =
            UserId::from_str(&user_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let kind = NotificationKind::from_str(&kind)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.to_utc())
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Notification {
            id,
            user_id,
            kind,
            title,
            message,
            entity_type,
            entity_id,
            read,
            created_at,
        }))
    }
}

/// `SQLite`-backed notification store.
pub struct SqliteNotificationRepository {
    pool: SqlitePool,
}

impl SqliteNotificationRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl NotificationSink for SqliteNotificationRepository {
    async fn push(&self, notification: Notification) -> Result<Notification, TaskHubError> {
        sqlx::query(
                "INSERT INTO notifications (id, user_id, kind, title, message, entity_type, entity_id, read, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(notification.id.to_string())
            .bind(notification.user_id.to_string())
            .bind(notification.kind.as_str())
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(&notification.entity_type)
            .bind(&notification.entity_id)
            .bind(notification.read)
            .bind(notification.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(notification)
    }
}

impl NotificationRepository for SqliteNotificationRepository {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, TaskHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM notifications WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn mark_read(&self, id: NotificationId) -> Result<bool, TaskHubError> {
        let result = sqlx::query("UPDATE notifications SET read = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use taskhub_domain::id::TaskId;

    async fn setup() -> SqliteNotificationRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteNotificationRepository::new(db.pool().clone())
    }

    fn sample(user_id: UserId) -> Notification {
        Notification::for_task(
            user_id,
            NotificationKind::Automation,
            "Task moved",
            "A rule fired",
            TaskId::new(),
        )
    }

    #[tokio::test]
    async fn should_push_and_list_for_user() {
        let repo = setup().await;
        let user = UserId::new();

        repo.push(sample(user)).await.unwrap();
        repo.push(sample(UserId::new())).await.unwrap();

        let listed = repo.list_for_user(user).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, user);
        assert!(!listed[0].read);
    }

    #[tokio::test]
    async fn should_accept_duplicate_content() {
        let repo = setup().await;
        let user = UserId::new();
        let task_id = TaskId::new();

        // Same title/message/entity twice: both rows land, dedup is a
        // client-side read concern.
        for _ in 0..2 {
            repo.push(Notification::for_task(
                user,
                NotificationKind::Reminder,
                "Reminder",
                "Task due",
                task_id,
            ))
            .await
            .unwrap();
        }

        assert_eq!(repo.list_for_user(user).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_mark_notification_read() {
        let repo = setup().await;
        let user = UserId::new();
        let stored = repo.push(sample(user)).await.unwrap();

        assert!(repo.mark_read(stored.id).await.unwrap());
        let listed = repo.list_for_user(user).await.unwrap();
        assert!(listed[0].read);
    }

    #[tokio::test]
    async fn should_report_missing_notification_on_mark_read() {
        let repo = setup().await;
        assert!(!repo.mark_read(NotificationId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn should_preserve_kind_and_entity_through_roundtrip() {
        let repo = setup().await;
        let user = UserId::new();
        let task_id = TaskId::new();
        repo.push(Notification::for_task(
            user,
            NotificationKind::Reminder,
            "Reminder",
            "Task due",
            task_id,
        ))
        .await
        .unwrap();

        let listed = repo.list_for_user(user).await.unwrap();
        assert_eq!(listed[0].kind, NotificationKind::Reminder);
        assert_eq!(listed[0].entity_type, "task");
        assert_eq!(listed[0].entity_id, task_id.to_string());
    }
}
