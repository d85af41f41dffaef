//! JSON REST handlers for labels.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use taskhub_app::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, ReminderRepository,
    TaskRepository,
};
use taskhub_domain::id::WorkspaceId;
use taskhub_domain::label::Label;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the list endpoint.
#[derive(Deserialize)]
pub struct ListQuery {
    pub workspace_id: WorkspaceId,
}

/// Request body for creating a label.
#[derive(Deserialize)]
pub struct CreateLabelRequest {
    pub workspace_id: WorkspaceId,
    pub name: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Label>>),
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
    Created(Json<Label>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/labels?workspace_id=…` — list a workspace's labels.
pub async fn list<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let labels = state.labels.list_for_workspace(query.workspace_id).await?;
    Ok(ListResponse::Ok(Json(labels)))
}

/// `POST /api/labels` — create a new label.
pub async fn create<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Json(req): Json<CreateLabelRequest>,
) -> Result<CreateResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let label = Label::new(req.workspace_id, req.name);
    label.validate()?;
    let created = state.labels.create(label).await?;
    Ok(CreateResponse::Created(Json(created)))
}
