//! Task service — the mutation paths that feed the dispatcher.
//!
//! Every operation here commits its own write first and only then hands an
//! event context to the dispatcher. Dispatch failures are logged and never
//! surfaced: the user-facing mutation must succeed regardless of what the
//! automations do with it.

use chrono::Duration;

use taskhub_domain::error::{NotFoundError, TaskHubError};
use taskhub_domain::event::EventContext;
use taskhub_domain::id::{LabelId, TaskId, UserId};
use taskhub_domain::reminder::{Reminder, ReminderChannel};
use taskhub_domain::task::Task;
use taskhub_domain::time::now;

use crate::dispatcher::AutomationDispatcher;
use crate::ports::{
    AutomationRepository, LabelRepository, NotificationSink, ReminderRepository, TaskRepository,
};

/// A task together with its attachments, for read endpoints.
#[derive(Debug, Clone)]
pub struct TaskDetail {
    pub task: Task,
    pub assignees: Vec<UserId>,
    pub labels: Vec<LabelId>,
}

/// Application service for task mutations and reads.
pub struct TaskService<TR, AR, LR, NS, RR> {
    tasks: TR,
    reminders: RR,
    dispatcher: AutomationDispatcher<AR, TR, LR, NS>,
    reminder_lead: Duration,
}

impl<TR, AR, LR, NS, RR> TaskService<TR, AR, LR, NS, RR>
where
    TR: TaskRepository + Send + Sync,
    AR: AutomationRepository + Send + Sync,
    LR: LabelRepository + Send + Sync,
    NS: NotificationSink + Send + Sync,
    RR: ReminderRepository + Send + Sync,
{
    /// Create a new service. `reminder_lead` is how long before a task's
    /// due date its auto-derived reminder fires.
    pub fn new(
        tasks: TR,
        reminders: RR,
        dispatcher: AutomationDispatcher<AR, TR, LR, NS>,
        reminder_lead: Duration,
    ) -> Self {
        Self {
            tasks,
            reminders,
            dispatcher,
            reminder_lead,
        }
    }

    /// Create a new task, auto-schedule its due-date reminder, and run the
    /// `task_created` automations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if invariants fail, or a
    /// storage error from the task write. Reminder and automation
    /// failures are logged, not returned.
    #[tracing::instrument(skip(self, task), fields(task_title = %task.title))]
    pub async fn create_task(&self, task: Task) -> Result<Task, TaskHubError> {
        task.validate()?;
        let task = self.tasks.create(task).await?;

        if let Some(due_date) = task.due_date {
            let remind_at = due_date - self.reminder_lead;
            if remind_at > now() {
                let reminder = Reminder::new(
                    task.id,
                    task.creator,
                    remind_at,
                    ReminderChannel::Notification,
                );
                if let Err(err) = self.reminders.create(reminder).await {
                    tracing::warn!(
                        task_id = %task.id,
                        error = %err,
                        "failed to schedule the derived due-date reminder"
                    );
                }
            }
        }

        let ctx =
            EventContext::task_created(task.workspace_id, task.id).with_actor(task.creator);
        self.dispatch_after_commit(ctx).await;
        Ok(task)
    }

    /// Look up a task by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no task with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_task(&self, id: TaskId) -> Result<Task, TaskHubError> {
        self.tasks.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Task",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// A task together with its assignees and labels.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no task with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_task_detail(&self, id: TaskId) -> Result<TaskDetail, TaskHubError> {
        let task = self.get_task(id).await?;
        let assignees = self.tasks.assignees(id).await?;
        let labels = self.tasks.labels(id).await?;
        Ok(TaskDetail {
            task,
            assignees,
            labels,
        })
    }

    /// Set a task's status and run the `status_change` automations with
    /// the exact old/new pair.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] if the task does not exist, or a
    /// storage error from the status write.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: TaskId,
        status: String,
        actor: Option<UserId>,
    ) -> Result<Task, TaskHubError> {
        let mut task = self.get_task(id).await?;
        let old_status = task.status.clone();
        self.tasks.set_status(id, status.clone()).await?;
        task.status = status.clone();

        let mut ctx =
            EventContext::status_changed(task.workspace_id, task.id, old_status, status);
        if let Some(actor) = actor {
            ctx = ctx.with_actor(actor);
        }
        self.dispatch_after_commit(ctx).await;
        Ok(task)
    }

    /// Replace a task's assignee set and run the `assignment` automations
    /// with the before/after delta.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] if the task does not exist, or a
    /// storage error from the assignment writes.
    #[tracing::instrument(skip(self, assignees))]
    pub async fn update_assignees(
        &self,
        id: TaskId,
        assignees: Vec<UserId>,
        actor: Option<UserId>,
    ) -> Result<Vec<UserId>, TaskHubError> {
        let task = self.get_task(id).await?;
        let previous = self.tasks.assignees(id).await?;

        for user in &assignees {
            if !previous.contains(user) {
                self.tasks.insert_assignee(id, *user).await?;
            }
        }
        for user in &previous {
            if !assignees.contains(user) {
                self.tasks.remove_assignee(id, *user).await?;
            }
        }

        let mut ctx = EventContext::assignment_changed(
            task.workspace_id,
            task.id,
            previous,
            assignees.clone(),
        );
        if let Some(actor) = actor {
            ctx = ctx.with_actor(actor);
        }
        self.dispatch_after_commit(ctx).await;
        Ok(assignees)
    }

    /// Run automations for a committed mutation. Failures are invisible
    /// to the caller by design; they surface only in logs.
    async fn dispatch_after_commit(&self, ctx: EventContext) {
        if let Err(err) = self.dispatcher.dispatch(&ctx).await {
            tracing::error!(
                task_id = %ctx.task_id,
                trigger = %ctx.kind,
                error = %err,
                "automation dispatch failed after committed mutation"
            );
        }
    }
}
