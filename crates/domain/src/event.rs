//! Event context — the transient description of one trigger-worthy mutation.
//!
//! An [`EventContext`] is never persisted; it is built by the mutation path
//! that just committed (task created, status changed, assignees changed) or
//! by the due-date scan, and handed to the dispatcher. Engine-originated
//! follow-up mutations derive child contexts with an incremented `depth`,
//! which is what bounds re-entrant dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::{TaskId, UserId, WorkspaceId};

/// Discriminant for the trigger classes an automation can listen for.
///
/// Doubles as the string tag rules are indexed by in storage, so the
/// dispatcher can load only the candidates for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    StatusChange,
    TaskCreated,
    DueDateApproaching,
    Assignment,
}

impl TriggerKind {
    /// The stable string form used in storage and over the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StatusChange => "status_change",
            Self::TaskCreated => "task_created",
            Self::DueDateApproaching => "due_date_approaching",
            Self::Assignment => "assignment",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown trigger kind tag.
#[derive(Debug, thiserror::Error)]
#[error("unknown trigger kind: {0}")]
pub struct ParseTriggerKindError(String);

impl FromStr for TriggerKind {
    type Err = ParseTriggerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status_change" => Ok(Self::StatusChange),
            "task_created" => Ok(Self::TaskCreated),
            "due_date_approaching" => Ok(Self::DueDateApproaching),
            "assignment" => Ok(Self::Assignment),
            other => Err(ParseTriggerKindError(other.to_string())),
        }
    }
}

/// The data describing one occurrence of a trigger-worthy mutation.
#[derive(Debug, Clone)]
pub struct EventContext {
    /// Which trigger class this event belongs to.
    pub kind: TriggerKind,
    /// Workspace the task lives in; rules are matched within it only.
    pub workspace_id: WorkspaceId,
    /// The task the mutation happened on.
    pub task_id: TaskId,
    /// The user who caused the mutation, when one did.
    pub actor: Option<UserId>,
    /// Status before the change (status events only).
    pub old_status: Option<String>,
    /// Status after the change (status events only).
    pub new_status: Option<String>,
    /// Assignee set before the change (assignment events only).
    pub previous_assignees: Vec<UserId>,
    /// Assignee set after the change (assignment events only).
    pub new_assignees: Vec<UserId>,
    /// How many engine-originated hops led here. Zero for human/API events.
    pub depth: u8,
}

impl EventContext {
    fn base(kind: TriggerKind, workspace_id: WorkspaceId, task_id: TaskId) -> Self {
        Self {
            kind,
            workspace_id,
            task_id,
            actor: None,
            old_status: None,
            new_status: None,
            previous_assignees: Vec::new(),
            new_assignees: Vec::new(),
            depth: 0,
        }
    }

    /// Context for a freshly created task.
    #[must_use]
    pub fn task_created(workspace_id: WorkspaceId, task_id: TaskId) -> Self {
        Self::base(TriggerKind::TaskCreated, workspace_id, task_id)
    }

    /// Context for a status transition.
    #[must_use]
    pub fn status_changed(
        workspace_id: WorkspaceId,
        task_id: TaskId,
        old_status: impl Into<String>,
        new_status: impl Into<String>,
    ) -> Self {
        Self {
            old_status: Some(old_status.into()),
            new_status: Some(new_status.into()),
            ..Self::base(TriggerKind::StatusChange, workspace_id, task_id)
        }
    }

    /// Context for a change to the assignee set.
    #[must_use]
    pub fn assignment_changed(
        workspace_id: WorkspaceId,
        task_id: TaskId,
        previous_assignees: Vec<UserId>,
        new_assignees: Vec<UserId>,
    ) -> Self {
        Self {
            previous_assignees,
            new_assignees,
            ..Self::base(TriggerKind::Assignment, workspace_id, task_id)
        }
    }

    /// Context for a task whose due date entered the approach window.
    #[must_use]
    pub fn due_date_approaching(workspace_id: WorkspaceId, task_id: TaskId) -> Self {
        Self::base(TriggerKind::DueDateApproaching, workspace_id, task_id)
    }

    /// Attach the user who caused the mutation.
    #[must_use]
    pub fn with_actor(mut self, actor: UserId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Derive a status-change context for a mutation the engine itself made.
    ///
    /// The depth increases by one; the dispatcher refuses contexts past its
    /// ceiling, which is what keeps rule cycles finite.
    #[must_use]
    pub fn child_status_change(
        &self,
        old_status: impl Into<String>,
        new_status: impl Into<String>,
    ) -> Self {
        Self {
            depth: self.depth.saturating_add(1),
            actor: self.actor,
            ..Self::status_changed(self.workspace_id, self.task_id, old_status, new_status)
        }
    }

    /// Derive an assignment context for an assignment the engine itself made.
    #[must_use]
    pub fn child_assignment(
        &self,
        previous_assignees: Vec<UserId>,
        new_assignees: Vec<UserId>,
    ) -> Self {
        Self {
            depth: self.depth.saturating_add(1),
            actor: self.actor,
            ..Self::assignment_changed(
                self.workspace_id,
                self.task_id,
                previous_assignees,
                new_assignees,
            )
        }
    }

    /// Assignees present in the new set but not the previous one.
    #[must_use]
    pub fn added_assignees(&self) -> Vec<UserId> {
        self.new_assignees
            .iter()
            .filter(|user| !self.previous_assignees.contains(user))
            .copied()
            .collect()
    }
}
