//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use taskhub_app::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, ReminderRepository,
    TaskRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `/api` and includes a [`TraceLayer`] that
/// logs each HTTP request/response at the `DEBUG` level using the
/// `tracing` ecosystem.
pub fn build<TR, LR, AR, RR, NR>(state: AppState<TR, LR, AR, RR, NR>) -> Router
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Duration;
    use std::sync::Arc;
    use taskhub_app::dispatcher::AutomationDispatcher;
    use taskhub_app::notification_bus::InProcessNotificationBus;
    use taskhub_app::services::automation_service::AutomationService;
    use taskhub_app::services::reminder_service::ReminderService;
    use taskhub_app::services::task_service::TaskService;
    use taskhub_app::sweeper::ReminderSweeper;
    use taskhub_domain::automation::Automation;
    use taskhub_domain::error::TaskHubError;
    use taskhub_domain::event::TriggerKind;
    use taskhub_domain::id::{
        AutomationId, LabelId, NotificationId, ReminderId, TaskId, UserId, WorkspaceId,
    };
    use taskhub_domain::label::Label;
    use taskhub_domain::notification::Notification;
    use taskhub_domain::reminder::Reminder;
    use taskhub_domain::task::Task;
    use taskhub_domain::time::Timestamp;
    use tower::ServiceExt;

    struct StubTaskRepo;
    struct StubLabelRepo;
    struct StubAutomationRepo;
    struct StubReminderRepo;
    struct StubNotificationRepo;

    impl TaskRepository for StubTaskRepo {
        async fn create(&self, task: Task) -> Result<Task, TaskHubError> {
            Ok(task)
        }
        async fn get_by_id(&self, _id: TaskId) -> Result<Option<Task>, TaskHubError> {
            Ok(None)
        }
        async fn set_status(&self, _id: TaskId, _status: String) -> Result<bool, TaskHubError> {
            Ok(false)
        }
        async fn assignees(&self, _id: TaskId) -> Result<Vec<UserId>, TaskHubError> {
            Ok(vec![])
        }
        async fn insert_assignee(
            &self,
            _id: TaskId,
            _user_id: UserId,
        ) -> Result<bool, TaskHubError> {
            Ok(false)
        }
        async fn remove_assignee(
            &self,
            _id: TaskId,
            _user_id: UserId,
        ) -> Result<bool, TaskHubError> {
            Ok(false)
        }
        async fn labels(&self, _id: TaskId) -> Result<Vec<LabelId>, TaskHubError> {
            Ok(vec![])
        }
        async fn insert_label(
            &self,
            _id: TaskId,
            _label_id: LabelId,
        ) -> Result<bool, TaskHubError> {
            Ok(false)
        }
        async fn due_within(
            &self,
            _from: Timestamp,
            _until: Timestamp,
        ) -> Result<Vec<Task>, TaskHubError> {
            Ok(vec![])
        }
        async fn claim_due_alert(
            &self,
            _id: TaskId,
            _due_date: Timestamp,
        ) -> Result<bool, TaskHubError> {
            Ok(false)
        }
    }

    impl LabelRepository for StubLabelRepo {
        async fn create(&self, label: Label) -> Result<Label, TaskHubError> {
            Ok(label)
        }
        async fn get_by_id(&self, _id: LabelId) -> Result<Option<Label>, TaskHubError> {
            Ok(None)
        }
        async fn list_for_workspace(
            &self,
            _workspace_id: WorkspaceId,
        ) -> Result<Vec<Label>, TaskHubError> {
            Ok(vec![])
        }
    }

    impl AutomationRepository for StubAutomationRepo {
        async fn create(&self, automation: Automation) -> Result<Automation, TaskHubError> {
            Ok(automation)
        }
        async fn get_by_id(
            &self,
            _id: AutomationId,
        ) -> Result<Option<Automation>, TaskHubError> {
            Ok(None)
        }
        async fn list_for_workspace(
            &self,
            _workspace_id: WorkspaceId,
        ) -> Result<Vec<Automation>, TaskHubError> {
            Ok(vec![])
        }
        async fn list_enabled_for(
            &self,
            _workspace_id: WorkspaceId,
            _kind: TriggerKind,
        ) -> Result<Vec<Automation>, TaskHubError> {
            Ok(vec![])
        }
        async fn update(&self, automation: Automation) -> Result<Automation, TaskHubError> {
            Ok(automation)
        }
        async fn delete(&self, _id: AutomationId) -> Result<(), TaskHubError> {
            Ok(())
        }
    }

    impl ReminderRepository for StubReminderRepo {
        async fn create(&self, reminder: Reminder) -> Result<Reminder, TaskHubError> {
            Ok(reminder)
        }
        async fn get_by_id(&self, _id: ReminderId) -> Result<Option<Reminder>, TaskHubError> {
            Ok(None)
        }
        async fn list_for_user(&self, _user_id: UserId) -> Result<Vec<Reminder>, TaskHubError> {
            Ok(vec![])
        }
        async fn due_unsent(&self, _now: Timestamp) -> Result<Vec<Reminder>, TaskHubError> {
            Ok(vec![])
        }
        async fn claim(&self, _id: ReminderId) -> Result<bool, TaskHubError> {
            Ok(false)
        }
        async fn delete(&self, _id: ReminderId) -> Result<(), TaskHubError> {
            Ok(())
        }
    }

    impl taskhub_app::ports::NotificationSink for StubNotificationRepo {
        async fn push(&self, notification: Notification) -> Result<Notification, TaskHubError> {
            Ok(notification)
        }
    }

    impl NotificationRepository for StubNotificationRepo {
        async fn list_for_user(
            &self,
            _user_id: UserId,
        ) -> Result<Vec<Notification>, TaskHubError> {
            Ok(vec![])
        }
        async fn mark_read(&self, _id: NotificationId) -> Result<bool, TaskHubError> {
            Ok(false)
        }
    }

    fn test_state() -> AppState<
        StubTaskRepo,
        StubLabelRepo,
        StubAutomationRepo,
        StubReminderRepo,
        StubNotificationRepo,
    > {
        let task_dispatcher = AutomationDispatcher::new(
            StubAutomationRepo,
            StubTaskRepo,
            StubLabelRepo,
            StubNotificationRepo,
        );
        let sweep_dispatcher = AutomationDispatcher::new(
            StubAutomationRepo,
            StubTaskRepo,
            StubLabelRepo,
            StubNotificationRepo,
        );
        AppState::new(
            TaskService::new(
                StubTaskRepo,
                StubReminderRepo,
                task_dispatcher,
                Duration::hours(24),
            ),
            AutomationService::new(StubAutomationRepo),
            ReminderService::new(StubReminderRepo, StubTaskRepo),
            ReminderSweeper::new(
                StubReminderRepo,
                StubTaskRepo,
                StubNotificationRepo,
                sweep_dispatcher,
                Duration::hours(24),
            ),
            StubLabelRepo,
            StubNotificationRepo,
            Arc::new(InProcessNotificationBus::new(16)),
        )
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_bad_request_for_malformed_task_id() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/tasks/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_zero_sent_count_when_nothing_is_due() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/sweep")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
