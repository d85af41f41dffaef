//! `SQLite` implementation of [`LabelRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use taskhub_app::ports::LabelRepository;
use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{LabelId, WorkspaceId};
use taskhub_domain::label::Label;

use crate::error::StorageError;

struct Wrapper(Label);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Label> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let workspace_id: String = row.try_get("workspace_id")?;
        let name: String = row.try_get("name")?;

        let id = LabelId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let workspace_id = WorkspaceId::from_str(&workspace_id)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Label {
            id,
            workspace_id,
            name,
        }))
    }
}

/// `SQLite`-backed label repository.
pub struct SqliteLabelRepository {
    pool: SqlitePool,
}

impl SqliteLabelRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LabelRepository for SqliteLabelRepository {
    async fn create(&self, label: Label) -> Result<Label, TaskHubError> {
        sqlx::query("INSERT INTO labels (id, workspace_id, name) VALUES (?, ?, ?)")
            .bind(label.id.to_string())
            .bind(label.workspace_id.to_string())
            .bind(&label.name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(label)
    }

    async fn get_by_id(&self, id: LabelId) -> Result<Option<Label>, TaskHubError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM labels WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Label>, TaskHubError> {
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM labels WHERE workspace_id = ? ORDER BY name")
                .bind(workspace_id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
