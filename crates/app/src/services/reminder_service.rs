//! Reminder service — use-cases for scheduling and deleting reminders.

use taskhub_domain::error::{NotFoundError, TaskHubError};
use taskhub_domain::id::{ReminderId, UserId};
use taskhub_domain::reminder::Reminder;

use crate::ports::{ReminderRepository, TaskRepository};

/// Application service for reminder management.
pub struct ReminderService<RR, TR> {
    reminders: RR,
    tasks: TR,
}

impl<RR, TR> ReminderService<RR, TR>
where
    RR: ReminderRepository + Send + Sync,
    TR: TaskRepository + Send + Sync,
{
    /// Create a new service backed by the given repositories.
    pub fn new(reminders: RR, tasks: TR) -> Self {
        Self { reminders, tasks }
    }

    /// Schedule a reminder for an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when the referenced task does
    /// not exist, or a storage error from the repository.
    #[tracing::instrument(skip(self, reminder), fields(task_id = %reminder.task_id))]
    pub async fn schedule(&self, reminder: Reminder) -> Result<Reminder, TaskHubError> {
        if self.tasks.get_by_id(reminder.task_id).await?.is_none() {
            return Err(NotFoundError {
                entity: "Task",
                id: reminder.task_id.to_string(),
            }
            .into());
        }
        self.reminders.create(reminder).await
    }

    /// Delete a reminder. Only the reminder's owner or the task's creator
    /// may do this.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when the reminder does not
    /// exist, [`TaskHubError::Forbidden`] when `requester` is neither the
    /// owner nor the task creator, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ReminderId, requester: UserId) -> Result<(), TaskHubError> {
        let reminder = self.reminders.get_by_id(id).await?.ok_or_else(|| {
            TaskHubError::from(NotFoundError {
                entity: "Reminder",
                id: id.to_string(),
            })
        })?;

        let is_owner = reminder.user_id == requester;
        let is_task_creator = self
            .tasks
            .get_by_id(reminder.task_id)
            .await?
            .is_some_and(|task| task.creator == requester);
        if !is_owner && !is_task_creator {
            return Err(TaskHubError::Forbidden(
                "only the reminder owner or the task creator may delete a reminder",
            ));
        }

        self.reminders.delete(id).await
    }

    /// All reminders belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Reminder>, TaskHubError> {
        self.reminders.list_for_user(user_id).await
    }
}
