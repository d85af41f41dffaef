//! Action — the effect performed when an automation fires.

use serde::{Deserialize, Serialize};

use crate::id::{LabelId, UserId};

/// An operation to execute when the automation's trigger matches.
///
/// Every action is designed to be safely re-appliable: assignee and label
/// inserts are first-write-wins, status writes are unconditional sets, and
/// duplicate notifications are an accepted at-least-once trade-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Set the task's status unconditionally. The status vocabulary is not
    /// validated here; authors are expected to use the same strings the
    /// board layer renders.
    ChangeStatus { status: String },
    /// Assign a user to the task; duplicate assignment is a silent no-op.
    AssignUser { user_id: UserId },
    /// Attach a label; skipped unless the label belongs to the task's
    /// workspace.
    AddLabel { label_id: LabelId },
    /// Append a notification addressed to a user.
    SendNotification {
        user_id: UserId,
        title: String,
        message: String,
    },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChangeStatus { status } => write!(f, "change_status({status})"),
            Self::AssignUser { user_id } => write!(f, "assign_user({user_id})"),
            Self::AddLabel { label_id } => write!(f, "add_label({label_id})"),
            Self::SendNotification { user_id, .. } => write!(f, "send_notification({user_id})"),
        }
    }
}
