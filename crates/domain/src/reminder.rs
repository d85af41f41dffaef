//! Reminder — a scheduled one-shot notification intent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::{ReminderId, TaskId, UserId};
use crate::time::Timestamp;

/// Delivery channel hint carried on a reminder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderChannel {
    #[default]
    Notification,
    Email,
    Both,
}

impl ReminderChannel {
    /// The stable string form used in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::Email => "email",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for ReminderChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown channel tag.
#[derive(Debug, thiserror::Error)]
#[error("unknown reminder channel: {0}")]
pub struct ParseReminderChannelError(String);

impl FromStr for ReminderChannel {
    type Err = ParseReminderChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notification" => Ok(Self::Notification),
            "email" => Ok(Self::Email),
            "both" => Ok(Self::Both),
            other => Err(ParseReminderChannelError(other.to_string())),
        }
    }
}

/// A one-shot intent to notify a user about a task at a fixed time.
///
/// Once `sent` is true the reminder is terminal: the sweep never looks at
/// it again, and nothing else mutates the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub task_id: TaskId,
    pub user_id: UserId,
    pub remind_at: Timestamp,
    pub channel: ReminderChannel,
    pub sent: bool,
}

impl Reminder {
    /// Create an unsent reminder with a fresh identifier.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        user_id: UserId,
        remind_at: Timestamp,
        channel: ReminderChannel,
    ) -> Self {
        Self {
            id: ReminderId::new(),
            task_id,
            user_id,
            remind_at,
            channel,
            sent: false,
        }
    }

    /// Whether the reminder is due at `now` and still undelivered.
    #[must_use]
    pub fn is_due(&self, now: Timestamp) -> bool {
        !self.sent && self.remind_at <= now
    }
}
