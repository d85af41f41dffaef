//! JSON REST handlers for notifications.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use taskhub_app::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, ReminderRepository,
    TaskRepository,
};
use taskhub_domain::error::{NotFoundError, TaskHubError, ValidationError};
use taskhub_domain::id::{NotificationId, UserId};
use taskhub_domain::notification::Notification;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters naming the recipient.
#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: UserId,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Notification>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the mark-read endpoint.
pub enum MarkReadResponse {
    NoContent,
}

impl IntoResponse for MarkReadResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => axum::http::StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/notifications?user_id=…` — list a user's notifications,
/// newest first.
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
    let notifications = state.notifications.list_for_user(query.user_id).await?;
    Ok(ListResponse::Ok(Json(notifications)))
}

/// `PUT /api/notifications/{id}/read` — mark a notification read.
pub async fn mark_read<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Path(id): Path<String>,
) -> Result<MarkReadResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let notification_id = NotificationId::from_str(&id)
        .map_err(|_| ApiError::from(TaskHubError::Validation(ValidationError::InvalidId)))?;
    let found = state.notifications.mark_read(notification_id).await?;
    if !found {
        return Err(ApiError::from(TaskHubError::from(NotFoundError {
            entity: "Notification",
            id,
        })));
    }
    Ok(MarkReadResponse::NoContent)
}
