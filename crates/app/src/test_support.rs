//! Shared in-memory port implementations for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use taskhub_domain::automation::Automation;
use taskhub_domain::error::TaskHubError;
use taskhub_domain::event::TriggerKind;
use taskhub_domain::id::{AutomationId, LabelId, NotificationId, ReminderId, TaskId, UserId, WorkspaceId};
use taskhub_domain::label::Label;
use taskhub_domain::notification::Notification;
use taskhub_domain::reminder::Reminder;
use taskhub_domain::task::Task;
use taskhub_domain::time::Timestamp;

use crate::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, NotificationSink,
    ReminderRepository, TaskRepository,
};

// ── Tasks ──────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct InMemoryTaskRepo {
    pub tasks: Mutex<HashMap<TaskId, Task>>,
    pub assignee_rows: Mutex<HashSet<(TaskId, UserId)>>,
    pub label_rows: Mutex<HashSet<(TaskId, LabelId)>>,
    pub due_alerts: Mutex<HashSet<(TaskId, String)>>,
    /// Number of status writes performed, for loop-bound assertions.
    pub status_writes: Mutex<u32>,
}

impl InMemoryTaskRepo {
    pub fn with(tasks: Vec<Task>) -> Self {
        let repo = Self::default();
        {
            let mut store = repo.tasks.lock().unwrap();
            for task in tasks {
                store.insert(task.id, task);
            }
        }
        repo
    }
}

impl TaskRepository for InMemoryTaskRepo {
    async fn create(&self, task: Task) -> Result<Task, TaskHubError> {
        self.tasks.lock().unwrap().insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskHubError> {
        Ok(self.tasks.lock().unwrap().get(&id).cloned())
    }

    async fn set_status(&self, id: TaskId, status: String) -> Result<bool, TaskHubError> {
        *self.status_writes.lock().unwrap() += 1;
        match self.tasks.lock().unwrap().get_mut(&id) {
            Some(task) => {
                task.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn assignees(&self, id: TaskId) -> Result<Vec<UserId>, TaskHubError> {
        Ok(self
            .assignee_rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(task, _)| *task == id)
            .map(|(_, user)| *user)
            .collect())
    }

    async fn insert_assignee(&self, id: TaskId, user_id: UserId) -> Result<bool, TaskHubError> {
        Ok(self.assignee_rows.lock().unwrap().insert((id, user_id)))
    }

    async fn remove_assignee(&self, id: TaskId, user_id: UserId) -> Result<bool, TaskHubError> {
        Ok(self.assignee_rows.lock().unwrap().remove(&(id, user_id)))
    }

    async fn labels(&self, id: TaskId) -> Result<Vec<LabelId>, TaskHubError> {
        Ok(self
            .label_rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(task, _)| *task == id)
            .map(|(_, label)| *label)
            .collect())
    }

    async fn insert_label(&self, id: TaskId, label_id: LabelId) -> Result<bool, TaskHubError> {
        Ok(self.label_rows.lock().unwrap().insert((id, label_id)))
    }

    async fn due_within(&self, from: Timestamp, until: Timestamp) -> Result<Vec<Task>, TaskHubError> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .values()
            .filter(|task| {
                task.due_date
                    .is_some_and(|due| due > from && due <= until)
            })
            .cloned()
            .collect())
    }

    async fn claim_due_alert(&self, id: TaskId, due_date: Timestamp) -> Result<bool, TaskHubError> {
        Ok(self
            .due_alerts
            .lock()
            .unwrap()
            .insert((id, due_date.to_rfc3339())))
    }
}

// ── Automations ────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct InMemoryAutomationRepo {
    pub store: Mutex<HashMap<AutomationId, Automation>>,
}

impl InMemoryAutomationRepo {
    pub fn with(automations: Vec<Automation>) -> Self {
        let repo = Self::default();
        {
            let mut store = repo.store.lock().unwrap();
            for automation in automations {
                store.insert(automation.id, automation);
            }
        }
        repo
    }
}

impl AutomationRepository for InMemoryAutomationRepo {
    async fn create(&self, automation: Automation) -> Result<Automation, TaskHubError> {
        self.store
            .lock()
            .unwrap()
            .insert(automation.id, automation.clone());
        Ok(automation)
    }

    async fn get_by_id(&self, id: AutomationId) -> Result<Option<Automation>, TaskHubError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Automation>, TaskHubError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|auto| auto.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn list_enabled_for(
        &self,
        workspace_id: WorkspaceId,
        kind: TriggerKind,
    ) -> Result<Vec<Automation>, TaskHubError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|auto| {
                auto.enabled
                    && auto.workspace_id == workspace_id
                    && auto.trigger.kind() == kind
            })
            .cloned()
            .collect())
    }

    async fn update(&self, automation: Automation) -> Result<Automation, TaskHubError> {
        self.store
            .lock()
            .unwrap()
            .insert(automation.id, automation.clone());
        Ok(automation)
    }

    async fn delete(&self, id: AutomationId) -> Result<(), TaskHubError> {
        self.store.lock().unwrap().remove(&id);
        Ok(())
    }
}

// ── Labels ─────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct InMemoryLabelRepo {
    pub store: Mutex<HashMap<LabelId, Label>>,
}

impl InMemoryLabelRepo {
    pub fn with(labels: Vec<Label>) -> Self {
        let repo = Self::default();
        {
            let mut store = repo.store.lock().unwrap();
            for label in labels {
                store.insert(label.id, label);
            }
        }
        repo
    }
}

impl LabelRepository for InMemoryLabelRepo {
    async fn create(&self, label: Label) -> Result<Label, TaskHubError> {
        self.store.lock().unwrap().insert(label.id, label.clone());
        Ok(label)
    }

    async fn get_by_id(&self, id: LabelId) -> Result<Option<Label>, TaskHubError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Label>, TaskHubError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|label| label.workspace_id == workspace_id)
            .cloned()
            .collect())
    }
}

// ── Reminders ──────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct InMemoryReminderRepo {
    pub store: Mutex<HashMap<ReminderId, Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn with(reminders: Vec<Reminder>) -> Self {
        let repo = Self::default();
        {
            let mut store = repo.store.lock().unwrap();
            for reminder in reminders {
                store.insert(reminder.id, reminder);
            }
        }
        repo
    }
}

impl ReminderRepository for InMemoryReminderRepo {
    async fn create(&self, reminder: Reminder) -> Result<Reminder, TaskHubError> {
        self.store
            .lock()
            .unwrap()
            .insert(reminder.id, reminder.clone());
        Ok(reminder)
    }

    async fn get_by_id(&self, id: ReminderId) -> Result<Option<Reminder>, TaskHubError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Reminder>, TaskHubError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|reminder| reminder.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn due_unsent(&self, now: Timestamp) -> Result<Vec<Reminder>, TaskHubError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|reminder| reminder.is_due(now))
            .cloned()
            .collect())
    }

    async fn claim(&self, id: ReminderId) -> Result<bool, TaskHubError> {
        match self.store.lock().unwrap().get_mut(&id) {
            Some(reminder) if !reminder.sent => {
                reminder.sent = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: ReminderId) -> Result<(), TaskHubError> {
        self.store.lock().unwrap().remove(&id);
        Ok(())
    }
}

// ── Notifications ──────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub stored: Mutex<Vec<Notification>>,
}

impl NotificationSink for RecordingSink {
    async fn push(&self, notification: Notification) -> Result<Notification, TaskHubError> {
        self.stored.lock().unwrap().push(notification.clone());
        Ok(notification)
    }
}

impl NotificationRepository for RecordingSink {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, TaskHubError> {
        Ok(self
            .stored
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: NotificationId) -> Result<bool, TaskHubError> {
        let mut stored = self.stored.lock().unwrap();
        match stored.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Sink whose inserts always fail, for isolation tests.
#[derive(Default)]
pub(crate) struct FailingSink;

impl NotificationSink for FailingSink {
    async fn push(&self, _notification: Notification) -> Result<Notification, TaskHubError> {
        Err(TaskHubError::Storage(Box::new(std::io::Error::other(
            "notification store unavailable",
        ))))
    }
}
