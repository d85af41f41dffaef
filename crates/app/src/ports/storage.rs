//! Storage ports — task and label persistence as seen by the engine.
//!
//! The task store is owned by the surrounding application; the engine only
//! needs reads plus a handful of writes that are deliberately idempotent:
//! unconditional status sets and insert-if-absent assignee/label rows, so
//! concurrent duplicate writers cannot corrupt anything.

use std::future::Future;
use std::sync::Arc;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{LabelId, TaskId, UserId};
use taskhub_domain::label::Label;
use taskhub_domain::task::Task;
use taskhub_domain::time::Timestamp;

/// Repository for tasks and their assignee/label attachments.
pub trait TaskRepository {
    /// Persist a new task.
    fn create(&self, task: Task) -> impl Future<Output = Result<Task, TaskHubError>> + Send;

    /// Get a task by its unique identifier.
    fn get_by_id(
        &self,
        id: TaskId,
    ) -> impl Future<Output = Result<Option<Task>, TaskHubError>> + Send;

    /// Unconditionally set a task's status. Returns `false` when the task
    /// does not exist (the write is then a no-op).
    fn set_status(
        &self,
        id: TaskId,
        status: String,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send;

    /// Current assignee set of a task.
    fn assignees(
        &self,
        id: TaskId,
    ) -> impl Future<Output = Result<Vec<UserId>, TaskHubError>> + Send;

    /// Insert an assignment row if absent. Returns `true` only when the
    /// row was newly inserted (first-write-wins).
    fn insert_assignee(
        &self,
        id: TaskId,
        user_id: UserId,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send;

    /// Remove an assignment row. Returns `true` when a row was removed.
    fn remove_assignee(
        &self,
        id: TaskId,
        user_id: UserId,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send;

    /// Current label attachments of a task.
    fn labels(
        &self,
        id: TaskId,
    ) -> impl Future<Output = Result<Vec<LabelId>, TaskHubError>> + Send;

    /// Insert a label attachment if absent. Returns `true` only when the
    /// row was newly inserted.
    fn insert_label(
        &self,
        id: TaskId,
        label_id: LabelId,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send;

    /// Tasks whose due date lies in `(from, until]`.
    fn due_within(
        &self,
        from: Timestamp,
        until: Timestamp,
    ) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send;

    /// Claim the approach-window alert for `(task, due date)`. Returns
    /// `true` exactly once per pair; changing the due date re-arms the
    /// task.
    fn claim_due_alert(
        &self,
        id: TaskId,
        due_date: Timestamp,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send;
}

/// Repository for persisting and querying [`Label`]s.
pub trait LabelRepository {
    /// Persist a new label.
    fn create(&self, label: Label) -> impl Future<Output = Result<Label, TaskHubError>> + Send;

    /// Get a label by its unique identifier.
    fn get_by_id(
        &self,
        id: LabelId,
    ) -> impl Future<Output = Result<Option<Label>, TaskHubError>> + Send;

    /// All labels of a workspace.
    fn list_for_workspace(
        &self,
        workspace_id: taskhub_domain::id::WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Label>, TaskHubError>> + Send;
}

impl<T: TaskRepository + Send + Sync> TaskRepository for Arc<T> {
    fn create(&self, task: Task) -> impl Future<Output = Result<Task, TaskHubError>> + Send {
        (**self).create(task)
    }
    fn get_by_id(
        &self,
        id: TaskId,
    ) -> impl Future<Output = Result<Option<Task>, TaskHubError>> + Send {
        (**self).get_by_id(id)
    }
    fn set_status(
        &self,
        id: TaskId,
        status: String,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        (**self).set_status(id, status)
    }
    fn assignees(
        &self,
        id: TaskId,
    ) -> impl Future<Output = Result<Vec<UserId>, TaskHubError>> + Send {
        (**self).assignees(id)
    }
    fn insert_assignee(
        &self,
        id: TaskId,
        user_id: UserId,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        (**self).insert_assignee(id, user_id)
    }
    fn remove_assignee(
        &self,
        id: TaskId,
        user_id: UserId,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        (**self).remove_assignee(id, user_id)
    }
    fn labels(&self, id: TaskId) -> impl Future<Output = Result<Vec<LabelId>, TaskHubError>> + Send {
        (**self).labels(id)
    }
    fn insert_label(
        &self,
        id: TaskId,
        label_id: LabelId,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        (**self).insert_label(id, label_id)
    }
    fn due_within(
        &self,
        from: Timestamp,
        until: Timestamp,
    ) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send {
        (**self).due_within(from, until)
    }
    fn claim_due_alert(
        &self,
        id: TaskId,
        due_date: Timestamp,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        (**self).claim_due_alert(id, due_date)
    }
}

impl<T: LabelRepository + Send + Sync> LabelRepository for Arc<T> {
    fn create(&self, label: Label) -> impl Future<Output = Result<Label, TaskHubError>> + Send {
        (**self).create(label)
    }
    fn get_by_id(
        &self,
        id: LabelId,
    ) -> impl Future<Output = Result<Option<Label>, TaskHubError>> + Send {
        (**self).get_by_id(id)
    }
    fn list_for_workspace(
        &self,
        workspace_id: taskhub_domain::id::WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Label>, TaskHubError>> + Send {
        (**self).list_for_workspace(workspace_id)
    }
}
