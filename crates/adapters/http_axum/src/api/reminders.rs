//! JSON REST handlers for reminders.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use taskhub_app::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, ReminderRepository,
    TaskRepository,
};
use taskhub_domain::error::{TaskHubError, ValidationError};
use taskhub_domain::id::{ReminderId, TaskId, UserId};
use taskhub_domain::reminder::{Reminder, ReminderChannel};
use taskhub_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters naming the requesting user.
#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: UserId,
}

/// Request body for scheduling a reminder.
#[derive(Deserialize)]
pub struct CreateReminderRequest {
    pub task_id: TaskId,
    pub user_id: UserId,
    pub remind_at: Timestamp,
    pub channel: Option<ReminderChannel>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Reminder>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Reminder>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/reminders?user_id=…` — list a user's reminders.
pub async fn list<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Query(query): Query<UserQuery>,
) -> Result<ListResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let reminders = state.reminder_service.list_for_user(query.user_id).await?;
    Ok(ListResponse::Ok(Json(reminders)))
}

/// `POST /api/reminders` — schedule a reminder.
pub async fn create<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Json(req): Json<CreateReminderRequest>,
) -> Result<CreateResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let reminder = Reminder::new(
        req.task_id,
        req.user_id,
        req.remind_at,
        req.channel.unwrap_or_default(),
    );
    let scheduled = state.reminder_service.schedule(reminder).await?;
    Ok(CreateResponse::Created(Json(scheduled)))
}

/// `DELETE /api/reminders/{id}?user_id=…` — delete a reminder; only the
/// owner or the task's creator may do this.
pub async fn delete<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<DeleteResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let reminder_id = ReminderId::from_str(&id)
        .map_err(|_| ApiError::from(TaskHubError::Validation(ValidationError::InvalidId)))?;
    state
        .reminder_service
        .delete(reminder_id, query.user_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
