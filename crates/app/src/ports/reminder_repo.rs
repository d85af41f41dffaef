//! Reminder repository port — persistence for reminders.

use std::future::Future;
use std::sync::Arc;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{ReminderId, UserId};
use taskhub_domain::reminder::Reminder;
use taskhub_domain::time::Timestamp;

/// Repository for persisting and querying [`Reminder`]s.
pub trait ReminderRepository {
    /// Persist a new reminder.
    fn create(
        &self,
        reminder: Reminder,
    ) -> impl Future<Output = Result<Reminder, TaskHubError>> + Send;

    /// Get a reminder by its unique identifier.
    fn get_by_id(
        &self,
        id: ReminderId,
    ) -> impl Future<Output = Result<Option<Reminder>, TaskHubError>> + Send;

    /// All reminders belonging to a user, newest first.
    fn list_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Reminder>, TaskHubError>> + Send;

    /// Unsent reminders whose `remind_at` is at or before `now`.
    fn due_unsent(
        &self,
        now: Timestamp,
    ) -> impl Future<Output = Result<Vec<Reminder>, TaskHubError>> + Send;

    /// Atomically transition `sent` from false to true. Returns `true`
    /// only for the caller that performed the transition; a concurrent
    /// sweep observing the committed flag gets `false`. This is the only
    /// coordination between overlapping sweeps.
    fn claim(&self, id: ReminderId) -> impl Future<Output = Result<bool, TaskHubError>> + Send;

    /// Delete a reminder by its unique identifier.
    fn delete(&self, id: ReminderId) -> impl Future<Output = Result<(), TaskHubError>> + Send;
}

impl<T: ReminderRepository + Send + Sync> ReminderRepository for Arc<T> {
    fn create(
        &self,
        reminder: Reminder,
    ) -> impl Future<Output = Result<Reminder, TaskHubError>> + Send {
        (**self).create(reminder)
    }
    fn get_by_id(
        &self,
        id: ReminderId,
    ) -> impl Future<Output = Result<Option<Reminder>, TaskHubError>> + Send {
        (**self).get_by_id(id)
    }
    fn list_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Reminder>, TaskHubError>> + Send {
        (**self).list_for_user(user_id)
    }
    fn due_unsent(
        &self,
        now: Timestamp,
    ) -> impl Future<Output = Result<Vec<Reminder>, TaskHubError>> + Send {
        (**self).due_unsent(now)
    }
    fn claim(&self, id: ReminderId) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        (**self).claim(id)
    }
    fn delete(&self, id: ReminderId) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        (**self).delete(id)
    }
}
