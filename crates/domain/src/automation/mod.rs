//! Automation — workspace-scoped trigger → action rules.
//!
//! Automations let a workspace react to task mutations without manual
//! intervention. Each automation binds one [`Trigger`] to one [`Action`];
//! the dispatcher in the `app` crate matches contexts against enabled rules
//! and applies the bound action.

mod action;
mod trigger;

pub use action::Action;
pub use trigger::Trigger;

use serde::{Deserialize, Serialize};

use crate::error::{TaskHubError, ValidationError};
use crate::id::{AutomationId, WorkspaceId};

/// A rule that reacts to task mutations by executing an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Automation {
    pub id: AutomationId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub enabled: bool,
    pub trigger: Trigger,
    pub action: Action,
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - a `SendNotification` action carries an empty title
    ///   ([`ValidationError::EmptyTitle`])
    pub fn validate(&self) -> Result<(), TaskHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if let Action::SendNotification { title, .. } = &self.action {
            if title.is_empty() {
                return Err(ValidationError::EmptyTitle.into());
            }
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    workspace_id: Option<WorkspaceId>,
    name: Option<String>,
    enabled: Option<bool>,
    trigger: Option<Trigger>,
    action: Option<Action>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn workspace_id(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Consume the builder, validate, and return an [`Automation`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<Automation, TaskHubError> {
        let automation = Automation {
            id: self.id.unwrap_or_default(),
            workspace_id: self.workspace_id.ok_or(ValidationError::MissingWorkspace)?,
            name: self.name.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            trigger: self.trigger.ok_or(ValidationError::MissingTrigger)?,
            action: self.action.ok_or(ValidationError::MissingAction)?,
        };
        automation.validate()?;
        Ok(automation)
    }
}
