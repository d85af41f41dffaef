//! `SQLite` implementation of [`TaskRepository`].
//!
//! The engine-facing writes are shaped for concurrent duplicate writers:
//! `INSERT OR IGNORE` on the attachment tables and unconditional `UPDATE`
//! on the status column. `rows_affected` is the signal for whether this
//! caller's write landed.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use taskhub_app::ports::TaskRepository;
use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{LabelId, TaskId, UserId, WorkspaceId};
use taskhub_domain::task::Task;
use taskhub_domain::time::Timestamp;

use crate::error::StorageError;

struct Wrapper(Task);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Task> {
        value.map(|w| w.0)
    }
}

fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let workspace_id: String = row.try_get("workspace_id")?;
        let creator: String = row.try_get("creator")?;
        let title: String = row.try_get("title")?;
        let status: String = row.try_get("status")?;
        let due_date: Option<String> = row.try_get("due_date")?;
        let created_at: String = row.try_get("created_at")?;

        let id = TaskId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let workspace_id = WorkspaceId::from_str(&workspace_id)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let creator =
            UserId::from_str(&creator).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let due_date = due_date.map(|s| parse_timestamp(&s)).transpose()?;
        let created_at = parse_timestamp(&created_at)?;

        Ok(Self(Task {
            id,
            workspace_id,
            creator,
            title,
            status,
            due_date,
            created_at,
        }))
    }
}

/// `SQLite`-backed task repository.
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskHubError> {
        sqlx::query(
                "INSERT INTO tasks (id, workspace_id, creator, title, status, due_date, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(task.id.to_string())
            .bind(task.workspace_id.to_string())
            .bind(task.creator.to_string())
            .bind(&task.title)
            .bind(&task.status)
            .bind(task.due_date.map(|ts| ts.to_rfc3339()))
            .bind(task.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(task)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskHubError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn set_status(&self, id: TaskId, status: String) -> Result<bool, TaskHubError> {
        let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
            .bind(&status)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn assignees(&self, id: TaskId) -> Result<Vec<UserId>, TaskHubError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT user_id FROM task_assignees WHERE task_id = ? ORDER BY user_id")
                .bind(id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        rows.iter()
            .map(|(user,)| {
                UserId::from_str(user)
                    .map_err(|err| StorageError::from(sqlx::Error::Decode(Box::new(err))).into())
            })
            .collect()
    }

    async fn insert_assignee(&self, id: TaskId, user_id: UserId) -> Result<bool, TaskHubError> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO task_assignees (task_id, user_id) VALUES (?, ?)")
                .bind(id.to_string())
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_assignee(&self, id: TaskId, user_id: UserId) -> Result<bool, TaskHubError> {
        let result = sqlx::query("DELETE FROM task_assignees WHERE task_id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn labels(&self, id: TaskId) -> Result<Vec<LabelId>, TaskHubError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT label_id FROM task_labels WHERE task_id = ? ORDER BY label_id")
                .bind(id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        rows.iter()
            .map(|(label,)| {
                LabelId::from_str(label)
                    .map_err(|err| StorageError::from(sqlx::Error::Decode(Box::new(err))).into())
            })
            .collect()
    }

    async fn insert_label(&self, id: TaskId, label_id: LabelId) -> Result<bool, TaskHubError> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO task_labels (task_id, label_id) VALUES (?, ?)")
                .bind(id.to_string())
                .bind(label_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn due_within(&self, from: Timestamp, until: Timestamp) -> Result<Vec<Task>, TaskHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM tasks WHERE due_date IS NOT NULL AND due_date > ? AND due_date <= ? ORDER BY due_date",
        )
        .bind(from.to_rfc3339())
        .bind(until.to_rfc3339())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn claim_due_alert(&self, id: TaskId, due_date: Timestamp) -> Result<bool, TaskHubError> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO due_alerts (task_id, due_date) VALUES (?, ?)")
                .bind(id.to_string())
                .bind(due_date.to_rfc3339())
                .execute(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
