//! Reminder sweeper — delivers due reminders and scans approaching due dates.
//!
//! Both passes are driven by the same external scheduler (the daemon's
//! interval loop, or the on-demand HTTP trigger). The sweep claims each
//! reminder's `sent` flag atomically *before* inserting the notification,
//! so overlapping sweeps cannot deliver the same reminder twice; a claimed
//! reminder whose follow-up work fails is logged and stays terminal rather
//! than being retried forever.

use chrono::Duration;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::event::EventContext;
use taskhub_domain::notification::{Notification, NotificationKind};
use taskhub_domain::reminder::Reminder;
use taskhub_domain::task::Task;
use taskhub_domain::time::Timestamp;

use crate::dispatcher::AutomationDispatcher;
use crate::ports::{
    AutomationRepository, LabelRepository, NotificationSink, ReminderRepository, TaskRepository,
};

/// Periodic worker over the reminder store and the task due dates.
pub struct ReminderSweeper<RR, AR, TR, LR, NS> {
    reminders: RR,
    tasks: TR,
    notifications: NS,
    dispatcher: AutomationDispatcher<AR, TR, LR, NS>,
    due_soon_window: Duration,
}

impl<RR, AR, TR, LR, NS> ReminderSweeper<RR, AR, TR, LR, NS>
where
    RR: ReminderRepository + Send + Sync,
    AR: AutomationRepository + Send + Sync,
    TR: TaskRepository + Send + Sync,
    LR: LabelRepository + Send + Sync,
    NS: NotificationSink + Send + Sync,
{
    /// Create a new sweeper. `due_soon_window` is how far ahead of `now`
    /// a due date counts as approaching.
    pub fn new(
        reminders: RR,
        tasks: TR,
        notifications: NS,
        dispatcher: AutomationDispatcher<AR, TR, LR, NS>,
        due_soon_window: Duration,
    ) -> Self {
        Self {
            reminders,
            tasks,
            notifications,
            dispatcher,
            due_soon_window,
        }
    }

    /// Deliver all reminders due at `now`. Returns the number of
    /// reminders successfully notified.
    ///
    /// # Errors
    ///
    /// Returns a storage error only when the due query itself fails;
    /// per-reminder failures are logged and do not stop the sweep.
    #[tracing::instrument(skip(self))]
    pub async fn sweep(&self, now: Timestamp) -> Result<usize, TaskHubError> {
        let due = self.reminders.due_unsent(now).await?;
        let mut sent = 0;
        for reminder in due {
            match self.deliver(&reminder).await {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        reminder_id = %reminder.id,
                        error = %err,
                        "failed to deliver reminder, continuing sweep"
                    );
                }
            }
        }
        Ok(sent)
    }

    /// Deliver one reminder. Returns whether a notification was created.
    async fn deliver(&self, reminder: &Reminder) -> Result<bool, TaskHubError> {
        if !self.reminders.claim(reminder.id).await? {
            // A concurrent sweep owns this reminder.
            return Ok(false);
        }

        let Some(task) = self.tasks.get_by_id(reminder.task_id).await? else {
            // The claim stands: an unresolvable reminder must not be
            // retried on every sweep.
            tracing::warn!(
                reminder_id = %reminder.id,
                task_id = %reminder.task_id,
                "reminder references a missing task, dropping it"
            );
            return Ok(false);
        };

        let message = match task.due_date {
            Some(due) => format!(
                "\"{}\" is due {}",
                task.title,
                due.format("%Y-%m-%d %H:%M UTC")
            ),
            None => format!("Don't forget \"{}\"", task.title),
        };
        let notification = Notification::for_task(
            reminder.user_id,
            NotificationKind::Reminder,
            format!("Reminder: {}", task.title),
            message,
            reminder.task_id,
        );
        self.notifications.push(notification).await?;
        Ok(true)
    }

    /// Dispatch `due_date_approaching` events for tasks entering the
    /// approach window, at most once per (task, due date). Returns the
    /// number of tasks dispatched.
    ///
    /// # Errors
    ///
    /// Returns a storage error only when the window query itself fails;
    /// per-task failures are logged and do not stop the scan.
    #[tracing::instrument(skip(self))]
    pub async fn dispatch_due_soon(&self, now: Timestamp) -> Result<usize, TaskHubError> {
        let horizon = now + self.due_soon_window;
        let approaching = self.tasks.due_within(now, horizon).await?;
        let mut dispatched = 0;
        for task in approaching {
            match self.alert_due_soon(&task).await {
                Ok(true) => dispatched += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        task_id = %task.id,
                        error = %err,
                        "due-date dispatch failed, continuing scan"
                    );
                }
            }
        }
        Ok(dispatched)
    }

    /// Claim and dispatch one approaching task. Returns whether this scan
    /// performed the dispatch.
    async fn alert_due_soon(&self, task: &Task) -> Result<bool, TaskHubError> {
        let Some(due_date) = task.due_date else {
            return Ok(false);
        };
        if !self.tasks.claim_due_alert(task.id, due_date).await? {
            // Window already handled, possibly in an earlier scan.
            return Ok(false);
        }
        let ctx = EventContext::due_date_approaching(task.workspace_id, task.id);
        self.dispatcher.dispatch(&ctx).await?;
        Ok(true)
    }
}
