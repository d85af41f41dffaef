//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod automations;
#[allow(clippy::missing_errors_doc)]
pub mod labels;
#[allow(clippy::missing_errors_doc)]
pub mod notifications;
#[allow(clippy::missing_errors_doc)]
pub mod ops;
#[allow(clippy::missing_errors_doc)]
pub mod reminders;
pub mod sse;
#[allow(clippy::missing_errors_doc)]
pub mod tasks;

use axum::Router;
use axum::routing::{get, post, put};

use taskhub_app::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, ReminderRepository,
    TaskRepository,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<TR, LR, AR, RR, NR>() -> Router<AppState<TR, LR, AR, RR, NR>>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    Router::new()
        // Automations (rule authoring)
        .route(
            "/automations",
            get(automations::list::<TR, LR, AR, RR, NR>)
                .post(automations::create::<TR, LR, AR, RR, NR>),
        )
        .route(
            "/automations/{id}",
            get(automations::get::<TR, LR, AR, RR, NR>)
                .put(automations::update::<TR, LR, AR, RR, NR>)
                .delete(automations::delete::<TR, LR, AR, RR, NR>),
        )
        // Tasks (the mutation paths that feed the dispatcher)
        .route("/tasks", post(tasks::create::<TR, LR, AR, RR, NR>))
        .route("/tasks/{id}", get(tasks::get::<TR, LR, AR, RR, NR>))
        .route(
            "/tasks/{id}/status",
            put(tasks::update_status::<TR, LR, AR, RR, NR>),
        )
        .route(
            "/tasks/{id}/assignees",
            put(tasks::update_assignees::<TR, LR, AR, RR, NR>),
        )
        // Labels
        .route(
            "/labels",
            get(labels::list::<TR, LR, AR, RR, NR>).post(labels::create::<TR, LR, AR, RR, NR>),
        )
        // Reminders
        .route(
            "/reminders",
            get(reminders::list::<TR, LR, AR, RR, NR>)
                .post(reminders::create::<TR, LR, AR, RR, NR>),
        )
        .route(
            "/reminders/{id}",
            axum::routing::delete(reminders::delete::<TR, LR, AR, RR, NR>),
        )
        // Notifications
        .route(
            "/notifications",
            get(notifications::list::<TR, LR, AR, RR, NR>),
        )
        .route(
            "/notifications/{id}/read",
            put(notifications::mark_read::<TR, LR, AR, RR, NR>),
        )
        .route(
            "/notifications/stream",
            get(sse::stream::<TR, LR, AR, RR, NR>),
        )
        // Ops
        .route("/sweep", post(ops::sweep::<TR, LR, AR, RR, NR>))
}
