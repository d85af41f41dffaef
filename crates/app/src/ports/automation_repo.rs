//! Automation repository port — persistence for automation rules.
//!
//! Rules are mutated only by the authoring interface; the engine reads
//! them. `list_enabled_for` is the dispatch hot path: it returns the
//! enabled rules of one workspace for one trigger class, and adapters are
//! expected to *skip* rows whose stored config no longer parses rather
//! than failing the whole batch.

use std::future::Future;
use std::sync::Arc;

use taskhub_domain::automation::Automation;
use taskhub_domain::error::TaskHubError;
use taskhub_domain::event::TriggerKind;
use taskhub_domain::id::{AutomationId, WorkspaceId};

/// Repository for persisting and querying [`Automation`]s.
pub trait AutomationRepository {
    /// Create a new automation in storage.
    fn create(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, TaskHubError>> + Send;

    /// Get an automation by its unique identifier.
    fn get_by_id(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, TaskHubError>> + Send;

    /// All automations of a workspace, enabled or not.
    fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Automation>, TaskHubError>> + Send;

    /// Enabled automations of a workspace listening for one trigger class.
    fn list_enabled_for(
        &self,
        workspace_id: WorkspaceId,
        kind: TriggerKind,
    ) -> impl Future<Output = Result<Vec<Automation>, TaskHubError>> + Send;

    /// Update an existing automation.
    fn update(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, TaskHubError>> + Send;

    /// Delete an automation by its unique identifier.
    fn delete(&self, id: AutomationId) -> impl Future<Output = Result<(), TaskHubError>> + Send;
}

impl<T: AutomationRepository + Send + Sync> AutomationRepository for Arc<T> {
    fn create(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, TaskHubError>> + Send {
        (**self).create(automation)
    }
    fn get_by_id(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, TaskHubError>> + Send {
        (**self).get_by_id(id)
    }
    fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Automation>, TaskHubError>> + Send {
        (**self).list_for_workspace(workspace_id)
    }
    fn list_enabled_for(
        &self,
        workspace_id: WorkspaceId,
        kind: TriggerKind,
    ) -> impl Future<Output = Result<Vec<Automation>, TaskHubError>> + Send {
        (**self).list_enabled_for(workspace_id, kind)
    }
    fn update(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, TaskHubError>> + Send {
        (**self).update(automation)
    }
    fn delete(&self, id: AutomationId) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        (**self).delete(id)
    }
}
