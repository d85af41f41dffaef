//! Trigger — the event pattern that activates an automation.

use serde::{Deserialize, Serialize};

use crate::event::{EventContext, TriggerKind};

/// Describes what kind of mutation should activate an automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Fires on an exact status transition. No wildcard support: both
    /// sides are compared as exact strings.
    StatusChange {
        from_status: String,
        to_status: String,
    },
    /// Fires whenever a task is created; carries no further condition.
    TaskCreated,
    /// Fires when the due-date scan reports a task entering the approach
    /// window. The timing decision belongs to the scheduler, not here.
    DueDateApproaching,
    /// Fires when at least one assignee was newly added.
    Assignment,
}

impl Trigger {
    /// The trigger class this pattern belongs to.
    #[must_use]
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::StatusChange { .. } => TriggerKind::StatusChange,
            Self::TaskCreated => TriggerKind::TaskCreated,
            Self::DueDateApproaching => TriggerKind::DueDateApproaching,
            Self::Assignment => TriggerKind::Assignment,
        }
    }

    /// Check whether this trigger matches a given event context.
    ///
    /// Total and side-effect free: a context of the wrong kind, or one
    /// missing the deltas this trigger inspects, yields `false`.
    #[must_use]
    pub fn matches(&self, ctx: &EventContext) -> bool {
        if self.kind() != ctx.kind {
            return false;
        }
        match self {
            Self::StatusChange {
                from_status,
                to_status,
            } => {
                ctx.old_status.as_deref() == Some(from_status.as_str())
                    && ctx.new_status.as_deref() == Some(to_status.as_str())
            }
            Self::TaskCreated | Self::DueDateApproaching => true,
            Self::Assignment => !ctx.added_assignees().is_empty(),
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatusChange {
                from_status,
                to_status,
            } => write!(f, "status_change({from_status} -> {to_status})"),
            Self::TaskCreated => f.write_str("task_created"),
            Self::DueDateApproaching => f.write_str("due_date_approaching"),
            Self::Assignment => f.write_str("assignment"),
        }
    }
}
