//! Label — a workspace-scoped tag attachable to tasks.

use serde::{Deserialize, Serialize};

use crate::error::{TaskHubError, ValidationError};
use crate::id::{LabelId, WorkspaceId};

/// A label within a workspace. Attaching one to a task from another
/// workspace is refused by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub workspace_id: WorkspaceId,
    pub name: String,
}

impl Label {
    /// Create a new label with a fresh identifier.
    #[must_use]
    pub fn new(workspace_id: WorkspaceId, name: impl Into<String>) -> Self {
        Self {
            id: LabelId::new(),
            workspace_id,
            name: name.into(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), TaskHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}
