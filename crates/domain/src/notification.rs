//! Notification — an append-only record consumed by downstream delivery.
//!
//! The engine only ever inserts notifications; the `read` flag is mutated
//! solely by the recipient through the HTTP surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::{NotificationId, TaskId, UserId};
use crate::time::Timestamp;

/// What produced the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Emitted by an automation's `send_notification` action.
    Automation,
    /// Emitted by the reminder sweep.
    Reminder,
}

impl NotificationKind {
    /// The stable string form used in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Automation => "automation",
            Self::Reminder => "reminder",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown notification kind tag.
#[derive(Debug, thiserror::Error)]
#[error("unknown notification kind: {0}")]
pub struct ParseNotificationKindError(String);

impl FromStr for NotificationKind {
    type Err = ParseNotificationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "automation" => Ok(Self::Automation),
            "reminder" => Ok(Self::Reminder),
            other => Err(ParseNotificationKindError(other.to_string())),
        }
    }
}

/// A message addressed to one user, with a click-through target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Click-through target kind, e.g. `"task"`.
    pub entity_type: String,
    /// Click-through target identifier, stringly typed to stay generic
    /// over entity kinds.
    pub entity_id: String,
    pub read: bool,
    pub created_at: Timestamp,
}

impl Notification {
    /// Build an unread notification pointing at a task.
    #[must_use]
    pub fn for_task(
        user_id: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        task_id: TaskId,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            entity_type: "task".to_string(),
            entity_id: task_id.to_string(),
            read: false,
            created_at: crate::time::now(),
        }
    }
}
