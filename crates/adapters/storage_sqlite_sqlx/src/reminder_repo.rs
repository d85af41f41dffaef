//! `SQLite` implementation of [`ReminderRepository`].
//!
//! The `claim` query is the concurrency linchpin: `UPDATE … WHERE sent = 0`
//! commits the false→true transition atomically, so of any number of
//! concurrent sweeps exactly one observes `rows_affected = 1`.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use taskhub_app::ports::ReminderRepository;
use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{ReminderId, TaskId, UserId};
use taskhub_domain::reminder::{Reminder, ReminderChannel};
use taskhub_domain::time::Timestamp;

use crate::error::StorageError;

struct Wrapper(Reminder);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Reminder> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let task_id: String = row.try_get("task_id")?;
        let user_id: String = row.try_get("user_id")?;
        let remind_at: String = row.try_get("remind_at")?;
        let channel: String = row.try_get("channel")?;
        let sent: bool = row.try_get("sent")?;

        let id = ReminderId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let task_id =
            TaskId::from_str(&task_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let user_id =
            UserId::from_str(&user_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let remind_at = chrono::DateTime::parse_from_rfc3339(&remind_at)
            .map(|dt| dt.to_utc())
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let channel = ReminderChannel::from_str(&channel)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Reminder {
            id,
            task_id,
            user_id,
            remind_at,
            channel,
            sent,
        }))
    }
}

/// `SQLite`-backed reminder repository.
pub struct SqliteReminderRepository {
    pool: SqlitePool,
}

impl SqliteReminderRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReminderRepository for SqliteReminderRepository {
    async fn create(&self, reminder: Reminder) -> Result<Reminder, TaskHubError> {
        sqlx::query(
                "INSERT INTO reminders (id, task_id, user_id, remind_at, channel, sent) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(reminder.id.to_string())
            .bind(reminder.task_id.to_string())
            .bind(reminder.user_id.to_string())
            .bind(reminder.remind_at.to_rfc3339())
            .bind(reminder.channel.as_str())
            .bind(reminder.sent)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(reminder)
    }

    async fn get_by_id(&self, id: ReminderId) -> Result<Option<Reminder>, TaskHubError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM reminders WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Reminder>, TaskHubError> {
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM reminders WHERE user_id = ? ORDER BY remind_at DESC")
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn due_unsent(&self, now: Timestamp) -> Result<Vec<Reminder>, TaskHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM reminders WHERE sent = 0 AND remind_at <= ? ORDER BY remind_at",
        )
        .bind(now.to_rfc3339())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn claim(&self, id: ReminderId) -> Result<bool, TaskHubError> {
        let result = sqlx::query("UPDATE reminders SET sent = 1 WHERE id = ? AND sent = 0")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ReminderId) -> Result<(), TaskHubError> {
        sqlx::query("DELETE FROM reminders WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use chrono::Duration;
    use taskhub_domain::time::now;

    async fn setup() -> SqliteReminderRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteReminderRepository::new(db.pool().clone())
    }

    fn due_reminder() -> Reminder {
        Reminder::new(
            TaskId::new(),
            UserId::new(),
            now() - Duration::minutes(5),
            ReminderChannel::Notification,
        )
    }

    #[tokio::test]
    async fn should_create_and_retrieve_reminder() {
        let repo = setup().await;
        let reminder = due_reminder();
        let id = reminder.id;
        let remind_at = reminder.remind_at;

        repo.create(reminder).await.unwrap();
        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.remind_at, remind_at);
        assert_eq!(fetched.channel, ReminderChannel::Notification);
        assert!(!fetched.sent);
    }

    #[tokio::test]
    async fn should_list_due_unsent_reminders_only() {
        let repo = setup().await;
        let due = due_reminder();
        let due_id = due.id;
        repo.create(due).await.unwrap();

        let future = Reminder::new(
            TaskId::new(),
            UserId::new(),
            now() + Duration::hours(1),
            ReminderChannel::Email,
        );
        repo.create(future).await.unwrap();

        let mut already_sent = due_reminder();
        already_sent.sent = true;
        repo.create(already_sent).await.unwrap();

        let found = repo.due_unsent(now()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, due_id);
    }

    #[tokio::test]
    async fn should_claim_reminder_exactly_once() {
        let repo = setup().await;
        let reminder = due_reminder();
        let id = reminder.id;
        repo.create(reminder).await.unwrap();

        assert!(repo.claim(id).await.unwrap());
        assert!(!repo.claim(id).await.unwrap());

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert!(fetched.sent);
    }

    #[tokio::test]
    async fn should_not_claim_missing_reminder() {
        let repo = setup().await;
        assert!(!repo.claim(ReminderId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn should_exclude_claimed_reminder_from_due_query() {
        let repo = setup().await;
        let reminder = due_reminder();
        let id = reminder.id;
        repo.create(reminder).await.unwrap();

        repo.claim(id).await.unwrap();
        assert!(repo.due_unsent(now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_reminders_for_user() {
        let repo = setup().await;
        let user = UserId::new();
        let mine = Reminder::new(
            TaskId::new(),
            user,
            now() + Duration::hours(1),
            ReminderChannel::Both,
        );
        repo.create(mine).await.unwrap();
        repo.create(due_reminder()).await.unwrap();

        let listed = repo.list_for_user(user).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, user);
    }

    #[tokio::test]
    async fn should_delete_reminder() {
        let repo = setup().await;
        let reminder = due_reminder();
        let id = reminder.id;
        repo.create(reminder).await.unwrap();

        repo.delete(id).await.unwrap();
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
