//! Task — the record automations and reminders act on.
//!
//! Only the fields the engine reads or writes are modelled here; the
//! surrounding application owns the full record.

use serde::{Deserialize, Serialize};

use crate::error::{TaskHubError, ValidationError};
use crate::id::{TaskId, UserId, WorkspaceId};
use crate::time::Timestamp;

/// A task within a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub workspace_id: WorkspaceId,
    /// The user who created the task; may delete its reminders.
    pub creator: UserId,
    pub title: String,
    /// Free-form status string shared with the board rendering layer.
    pub status: String,
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Task {
    /// Create a builder for constructing a [`Task`].
    #[must_use]
    pub fn builder() -> TaskBuilder {
        TaskBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] when `title` is empty.
    pub fn validate(&self) -> Result<(), TaskHubError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Task`].
#[derive(Debug, Default)]
pub struct TaskBuilder {
    id: Option<TaskId>,
    workspace_id: Option<WorkspaceId>,
    creator: Option<UserId>,
    title: Option<String>,
    status: Option<String>,
    due_date: Option<Timestamp>,
}

impl TaskBuilder {
    #[must_use]
    pub fn id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn workspace_id(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }

    #[must_use]
    pub fn creator(mut self, creator: UserId) -> Self {
        self.creator = Some(creator);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: Timestamp) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Consume the builder, validate, and return a [`Task`].
    ///
    /// Status defaults to `"todo"` when not given.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<Task, TaskHubError> {
        let task = Task {
            id: self.id.unwrap_or_default(),
            workspace_id: self.workspace_id.ok_or(ValidationError::MissingWorkspace)?,
            creator: self.creator.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            status: self.status.unwrap_or_else(|| "todo".to_string()),
            due_date: self.due_date,
            created_at: crate::time::now(),
        };
        task.validate()?;
        Ok(task)
    }
}
