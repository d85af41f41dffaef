//! `SQLite` implementation of [`AutomationRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use taskhub_app::ports::AutomationRepository;
use taskhub_domain::automation::{Action, Automation, Trigger};
use taskhub_domain::error::TaskHubError;
use taskhub_domain::event::TriggerKind;
use taskhub_domain::id::{AutomationId, WorkspaceId};

use crate::error::StorageError;

fn decode_row(row: &SqliteRow) -> Result<Automation, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let workspace_id: String = row.try_get("workspace_id")?;
    let name: String = row.try_get("name")?;
    let enabled: bool = row.try_get("enabled")?;
    let trigger_json: String = row.try_get("trigger_data")?;
    let action_json: String = row.try_get("action_data")?;

    let id = AutomationId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
    let workspace_id =
        WorkspaceId::from_str(&workspace_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
    let trigger: Trigger =
        serde_json::from_str(&trigger_json).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
    let action: Action =
        serde_json::from_str(&action_json).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

    Ok(Automation {
        id,
        workspace_id,
        name,
        enabled,
        trigger,
        action,
    })
}

struct Wrapper(Automation);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Automation> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        decode_row(row).map(Self)
    }
}

/// Decode each row, skipping the ones whose stored config no longer
/// parses. A rule with an unreadable config is treated as disabled
/// rather than poisoning the whole batch.
fn decode_lenient(rows: Vec<SqliteRow>) -> Vec<Automation> {
    rows.iter()
        .filter_map(|row| match decode_row(row) {
            Ok(automation) => Some(automation),
            Err(err) => {
                let id: String = row.try_get("id").unwrap_or_default();
                tracing::warn!(
                    automation_id = %id,
                    error = %err,
                    "skipping automation with unreadable stored config"
                );
                None
            }
        })
        .collect()
}

/// `SQLite`-backed automation repository.
pub struct SqliteAutomationRepository {
    pool: SqlitePool,
}

impl SqliteAutomationRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AutomationRepository for SqliteAutomationRepository {
    async fn create(&self, automation: Automation) -> Result<Automation, TaskHubError> {
        let trigger_json =
            serde_json::to_string(&automation.trigger).map_err(StorageError::from)?;
        let action_json = serde_json::to_string(&automation.action).map_err(StorageError::from)?;

        sqlx::query(
                "INSERT INTO automations (id, workspace_id, name, enabled, trigger_kind, trigger_data, action_data) VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(automation.id.to_string())
            .bind(automation.workspace_id.to_string())
            .bind(&automation.name)
            .bind(automation.enabled)
            .bind(automation.trigger.kind().as_str())
            .bind(&trigger_json)
            .bind(&action_json)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(automation)
    }

    async fn get_by_id(&self, id: AutomationId) -> Result<Option<Automation>, TaskHubError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM automations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Automation>, TaskHubError> {
        let rows = sqlx::query("SELECT * FROM automations WHERE workspace_id = ? ORDER BY name")
            .bind(workspace_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(decode_lenient(rows))
    }

    async fn list_enabled_for(
        &self,
        workspace_id: WorkspaceId,
        kind: TriggerKind,
    ) -> Result<Vec<Automation>, TaskHubError> {
        let rows = sqlx::query(
            "SELECT * FROM automations WHERE workspace_id = ? AND trigger_kind = ? AND enabled = 1 ORDER BY name",
        )
        .bind(workspace_id.to_string())
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(decode_lenient(rows))
    }

    async fn update(&self, automation: Automation) -> Result<Automation, TaskHubError> {
        let trigger_json =
            serde_json::to_string(&automation.trigger).map_err(StorageError::from)?;
        let action_json = serde_json::to_string(&automation.action).map_err(StorageError::from)?;

        sqlx::query(
                "UPDATE automations SET workspace_id = ?, name = ?, enabled = ?, trigger_kind = ?, trigger_data = ?, action_data = ? WHERE id = ?",
            )
            .bind(automation.workspace_id.to_string())
            .bind(&automation.name)
            .bind(automation.enabled)
            .bind(automation.trigger.kind().as_str())
            .bind(&trigger_json)
            .bind(&action_json)
            .bind(automation.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(automation)
    }

    async fn delete(&self, id: AutomationId) -> Result<(), TaskHubError> {
        sqlx::query("DELETE FROM automations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
