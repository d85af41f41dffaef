//! Shared application state for axum handlers.

use std::sync::Arc;

use taskhub_app::notification_bus::InProcessNotificationBus;
use taskhub_app::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, ReminderRepository,
    TaskRepository,
};
use taskhub_app::services::automation_service::AutomationService;
use taskhub_app::services::reminder_service::ReminderService;
use taskhub_app::services::task_service::TaskService;
use taskhub_app::sweeper::ReminderSweeper;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the underlying types themselves do not need to
/// be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<TR, LR, AR, RR, NR> {
    /// Task mutation paths (create, status, assignees) plus reads.
    pub task_service: Arc<TaskService<TR, AR, LR, NR, RR>>,
    /// Rule authoring CRUD.
    pub automation_service: Arc<AutomationService<AR>>,
    /// Reminder scheduling and deletion.
    pub reminder_service: Arc<ReminderService<RR, TR>>,
    /// The sweep/due-scan worker, exposed for on-demand runs.
    pub sweeper: Arc<ReminderSweeper<RR, AR, TR, LR, NR>>,
    /// Label CRUD.
    pub labels: Arc<LR>,
    /// Recipient-facing notification reads.
    pub notifications: Arc<NR>,
    /// In-process bus backing the SSE stream.
    pub notification_bus: Arc<InProcessNotificationBus>,
}

impl<TR, LR, AR, RR, NR> Clone for AppState<TR, LR, AR, RR, NR> {
    fn clone(&self) -> Self {
        Self {
            task_service: Arc::clone(&self.task_service),
            automation_service: Arc::clone(&self.automation_service),
            reminder_service: Arc::clone(&self.reminder_service),
            sweeper: Arc::clone(&self.sweeper),
            labels: Arc::clone(&self.labels),
            notifications: Arc::clone(&self.notifications),
            notification_bus: Arc::clone(&self.notification_bus),
        }
    }
}

impl<TR, LR, AR, RR, NR> AppState<TR, LR, AR, RR, NR>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        task_service: TaskService<TR, AR, LR, NR, RR>,
        automation_service: AutomationService<AR>,
        reminder_service: ReminderService<RR, TR>,
        sweeper: ReminderSweeper<RR, AR, TR, LR, NR>,
        labels: LR,
        notifications: NR,
        notification_bus: Arc<InProcessNotificationBus>,
    ) -> Self {
        Self {
            task_service: Arc::new(task_service),
            automation_service: Arc::new(automation_service),
            reminder_service: Arc::new(reminder_service),
            sweeper: Arc::new(sweeper),
            labels: Arc::new(labels),
            notifications: Arc::new(notifications),
            notification_bus,
        }
    }
}
