//! JSON REST handlers for tasks — the mutation paths that feed the
//! dispatcher.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use taskhub_app::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, ReminderRepository,
    TaskRepository,
};
use taskhub_domain::error::{TaskHubError, ValidationError};
use taskhub_domain::id::{LabelId, TaskId, UserId, WorkspaceId};
use taskhub_domain::task::Task;
use taskhub_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a task.
#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub workspace_id: WorkspaceId,
    pub creator: UserId,
    pub title: String,
    pub status: Option<String>,
    pub due_date: Option<Timestamp>,
}

/// Request body for a status update.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub actor: Option<UserId>,
}

/// Request body for replacing the assignee set.
#[derive(Deserialize)]
pub struct UpdateAssigneesRequest {
    pub assignees: Vec<UserId>,
    pub actor: Option<UserId>,
}

/// A task with its attachments, as returned by the get endpoint.
#[derive(Serialize)]
pub struct TaskDetailResponse {
    #[serde(flatten)]
    pub task: Task,
    pub assignees: Vec<UserId>,
    pub labels: Vec<LabelId>,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Task>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<TaskDetailResponse>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the status update endpoint.
pub enum UpdateResponse {
    Ok(Json<Task>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the assignee update endpoint.
pub enum AssigneesResponse {
    Ok(Json<Vec<UserId>>),
}

impl IntoResponse for AssigneesResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_id(id: &str) -> Result<TaskId, ApiError> {
    TaskId::from_str(id)
        .map_err(|_| ApiError::from(TaskHubError::Validation(ValidationError::InvalidId)))
}

/// `POST /api/tasks` — create a task and run `task_created` automations.
pub async fn create<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<CreateResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let mut builder = Task::builder()
        .workspace_id(req.workspace_id)
        .creator(req.creator)
        .title(req.title);
    if let Some(status) = req.status {
        builder = builder.status(status);
    }
    if let Some(due_date) = req.due_date {
        builder = builder.due_date(due_date);
    }

    let task = builder.build()?;
    let created = state.task_service.create_task(task).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/tasks/{id}` — task with assignees and labels.
pub async fn get<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let task_id = parse_id(&id)?;
    let detail = state.task_service.get_task_detail(task_id).await?;
    Ok(GetResponse::Ok(Json(TaskDetailResponse {
        task: detail.task,
        assignees: detail.assignees,
        labels: detail.labels,
    })))
}

/// `PUT /api/tasks/{id}/status` — set the status and run `status_change`
/// automations with the exact old/new pair.
pub async fn update_status<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<UpdateResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let task_id = parse_id(&id)?;
    let updated = state
        .task_service
        .update_status(task_id, req.status, req.actor)
        .await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `PUT /api/tasks/{id}/assignees` — replace the assignee set and run
/// `assignment` automations with the before/after delta.
pub async fn update_assignees<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAssigneesRequest>,
) -> Result<AssigneesResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let task_id = parse_id(&id)?;
    let assignees = state
        .task_service
        .update_assignees(task_id, req.assignees, req.actor)
        .await?;
    Ok(AssigneesResponse::Ok(Json(assignees)))
}
