//! Automation dispatcher — matches rules against events and applies actions.
//!
//! The dispatcher is invoked synchronously by every mutation path that can
//! produce a trigger-worthy event, after that path's own write has
//! committed. It loads the enabled rules for the event's workspace and
//! trigger class, filters them through [`Trigger::matches`], and applies
//! each matching rule's action. A failure in one rule is logged and never
//! stops the rest of the batch, and never reaches the mutating caller.
//!
//! Engine-made status and assignment writes re-enter the dispatcher with a
//! child context whose `depth` is one higher, so rules can chain off each
//! other. [`MAX_DISPATCH_DEPTH`] bounds the chain; past it the dispatcher
//! logs a loop-suspected warning and refuses, which is what terminates
//! mutually-triggering rule sets.

use std::future::Future;
use std::pin::Pin;

use taskhub_domain::automation::Action;
use taskhub_domain::error::TaskHubError;
use taskhub_domain::event::EventContext;
use taskhub_domain::id::AutomationId;
use taskhub_domain::notification::{Notification, NotificationKind};

use crate::ports::{AutomationRepository, LabelRepository, NotificationSink, TaskRepository};

/// Ceiling for engine-originated dispatch chains.
pub const MAX_DISPATCH_DEPTH: u8 = 5;

/// Matches and executes all applicable rules for one event.
pub struct AutomationDispatcher<AR, TR, LR, NS> {
    automations: AR,
    tasks: TR,
    labels: LR,
    notifications: NS,
}

impl<AR, TR, LR, NS> AutomationDispatcher<AR, TR, LR, NS>
where
    AR: AutomationRepository + Send + Sync,
    TR: TaskRepository + Send + Sync,
    LR: LabelRepository + Send + Sync,
    NS: NotificationSink + Send + Sync,
{
    /// Create a new dispatcher.
    pub fn new(automations: AR, tasks: TR, labels: LR, notifications: NS) -> Self {
        Self {
            automations,
            tasks,
            labels,
            notifications,
        }
    }

    /// Process one event against all enabled rules of its workspace and
    /// trigger class. Returns the ids of the rules whose action was
    /// applied successfully.
    ///
    /// # Errors
    ///
    /// Returns a storage error only when loading the candidate rules
    /// fails; individual rule failures are logged and swallowed.
    pub async fn dispatch(&self, ctx: &EventContext) -> Result<Vec<AutomationId>, TaskHubError> {
        if ctx.depth >= MAX_DISPATCH_DEPTH {
            tracing::warn!(
                task_id = %ctx.task_id,
                workspace_id = %ctx.workspace_id,
                depth = ctx.depth,
                "automation loop suspected, refusing to dispatch further"
            );
            return Ok(Vec::new());
        }

        let candidates = self
            .automations
            .list_enabled_for(ctx.workspace_id, ctx.kind)
            .await?;

        let mut triggered = Vec::new();
        for automation in &candidates {
            if !automation.trigger.matches(ctx) {
                continue;
            }
            match self.apply(&automation.action, ctx).await {
                Ok(()) => triggered.push(automation.id),
                Err(err) => {
                    tracing::warn!(
                        automation_id = %automation.id,
                        automation_name = %automation.name,
                        error = %err,
                        "automation action failed, continuing with remaining rules"
                    );
                }
            }
        }

        Ok(triggered)
    }

    /// Apply a single action. Missing references degrade to a no-op; only
    /// store failures surface, and the caller treats those as that one
    /// rule's failure.
    async fn apply(&self, action: &Action, ctx: &EventContext) -> Result<(), TaskHubError> {
        match action {
            Action::ChangeStatus { status } => {
                let old_status = self.tasks.get_by_id(ctx.task_id).await?.map(|t| t.status);
                let updated = self.tasks.set_status(ctx.task_id, status.clone()).await?;
                if let (Some(old_status), true) = (old_status, updated) {
                    self.redispatch(ctx.child_status_change(old_status, status.clone()))
                        .await?;
                }
            }
            Action::AssignUser { user_id } => {
                let previous = self.tasks.assignees(ctx.task_id).await?;
                let inserted = self.tasks.insert_assignee(ctx.task_id, *user_id).await?;
                if inserted {
                    let mut updated = previous.clone();
                    updated.push(*user_id);
                    self.redispatch(ctx.child_assignment(previous, updated))
                        .await?;
                }
            }
            Action::AddLabel { label_id } => match self.labels.get_by_id(*label_id).await? {
                Some(label) if label.workspace_id == ctx.workspace_id => {
                    self.tasks.insert_label(ctx.task_id, *label_id).await?;
                }
                _ => {
                    tracing::debug!(
                        label_id = %label_id,
                        workspace_id = %ctx.workspace_id,
                        "label missing or outside the workspace, skipping"
                    );
                }
            },
            Action::SendNotification {
                user_id,
                title,
                message,
            } => {
                let notification = Notification::for_task(
                    *user_id,
                    NotificationKind::Automation,
                    title.clone(),
                    message.clone(),
                    ctx.task_id,
                );
                self.notifications.push(notification).await?;
            }
        }
        Ok(())
    }

    /// Re-enter dispatch for a mutation the engine itself made.
    ///
    /// `dispatch` and `apply` are mutually recursive; the boxed dyn future
    /// breaks the otherwise-infinite future type.
    fn redispatch(
        &self,
        ctx: EventContext,
    ) -> Pin<Box<dyn Future<Output = Result<(), TaskHubError>> + Send + '_>> {
        Box::pin(async move {
            self.dispatch(&ctx).await?;
            Ok(())
        })
    }
}
