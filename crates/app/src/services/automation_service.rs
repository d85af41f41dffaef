//! Automation service — use-cases for authoring automation rules.
//!
//! This is the write side of the rule store. Config shapes are validated
//! here, at the authoring boundary; the engine itself only defends against
//! rows that later fail to parse.

use taskhub_domain::automation::Automation;
use taskhub_domain::error::{NotFoundError, TaskHubError};
use taskhub_domain::id::{AutomationId, WorkspaceId};

use crate::ports::AutomationRepository;

/// Application service for automation CRUD operations.
pub struct AutomationService<R> {
    repo: R,
}

impl<R: AutomationRepository> AutomationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new automation after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, automation), fields(automation_name = %automation.name))]
    pub async fn create_automation(
        &self,
        automation: Automation,
    ) -> Result<Automation, TaskHubError> {
        automation.validate()?;
        self.repo.create(automation).await
    }

    /// Look up an automation by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no automation with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_automation(&self, id: AutomationId) -> Result<Automation, TaskHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all automations of a workspace.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_automations(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Automation>, TaskHubError> {
        self.repo.list_for_workspace(workspace_id).await
    }

    /// Update an existing automation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, automation))]
    pub async fn update_automation(
        &self,
        automation: Automation,
    ) -> Result<Automation, TaskHubError> {
        automation.validate()?;
        self.repo.update(automation).await
    }

    /// Delete an automation by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_automation(&self, id: AutomationId) -> Result<(), TaskHubError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryAutomationRepo;
    use taskhub_domain::automation::{Action, Trigger};
    use taskhub_domain::error::ValidationError;
    use taskhub_domain::id::UserId;

    fn make_service() -> AutomationService<InMemoryAutomationRepo> {
        AutomationService::new(InMemoryAutomationRepo::default())
    }

    fn valid_automation(workspace_id: WorkspaceId) -> Automation {
        Automation::builder()
            .workspace_id(workspace_id)
            .name("Test automation")
            .trigger(Trigger::TaskCreated)
            .action(Action::AssignUser {
                user_id: UserId::new(),
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_automation_when_valid() {
        let svc = make_service();
        let auto = valid_automation(WorkspaceId::new());
        let id = auto.id;

        let created = svc.create_automation(auto).await.unwrap();
        assert_eq!(created.id, id);

        let fetched = svc.get_automation(id).await.unwrap();
        assert_eq!(fetched.name, "Test automation");
    }

    #[tokio::test]
    async fn should_reject_create_when_name_is_empty() {
        let svc = make_service();
        let mut auto = valid_automation(WorkspaceId::new());
        auto.name = String::new();

        let result = svc.create_automation(auto).await;
        assert!(matches!(
            result,
            Err(TaskHubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_automation_missing() {
        let svc = make_service();
        let result = svc.get_automation(AutomationId::new()).await;
        assert!(matches!(result, Err(TaskHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_only_automations_of_the_workspace() {
        let svc = make_service();
        let ws = WorkspaceId::new();
        svc.create_automation(valid_automation(ws)).await.unwrap();
        svc.create_automation(valid_automation(WorkspaceId::new()))
            .await
            .unwrap();

        let listed = svc.list_automations(ws).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].workspace_id, ws);
    }

    #[tokio::test]
    async fn should_update_automation() {
        let svc = make_service();
        let auto = valid_automation(WorkspaceId::new());
        let id = auto.id;
        svc.create_automation(auto).await.unwrap();

        let mut updated = svc.get_automation(id).await.unwrap();
        updated.name = "Updated name".to_string();
        updated.enabled = false;
        let saved = svc.update_automation(updated).await.unwrap();
        assert_eq!(saved.name, "Updated name");
        assert!(!saved.enabled);
    }

    #[tokio::test]
    async fn should_delete_automation() {
        let svc = make_service();
        let auto = valid_automation(WorkspaceId::new());
        let id = auto.id;
        svc.create_automation(auto).await.unwrap();

        svc.delete_automation(id).await.unwrap();

        let result = svc.get_automation(id).await;
        assert!(matches!(result, Err(TaskHubError::NotFound(_))));
    }
}
