//! JSON REST handlers for automation rule authoring.

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
use taskhub_domain::automation::{Action, Automation, Trigger};
use taskhub_domain::error::{TaskHubError, ValidationError};
use taskhub_domain::id::{AutomationId, WorkspaceId};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the list endpoint.
#[derive(Deserialize)]
pub struct ListQuery {
    pub workspace_id: WorkspaceId,
}

/// Request body for creating an automation.
#[derive(Deserialize)]
pub struct CreateAutomationRequest {
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub enabled: Option<bool>,
    pub trigger: Trigger,
    pub action: Action,
}

/// Request body for updating an automation.
#[derive(Deserialize)]
pub struct UpdateAutomationRequest {
    pub name: String,
    pub enabled: bool,
    pub trigger: Trigger,
    pub action: Action,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Automation>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Automation>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Automation>),
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

fn parse_id(id: &str) -> Result<AutomationId, ApiError> {
    AutomationId::from_str(id)
        .map_err(|_| ApiError::from(TaskHubError::Validation(ValidationError::InvalidId)))
}

/// `GET /api/automations?workspace_id=…` — list a workspace's automations.
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
    let automations = state
        .automation_service
        .list_automations(query.workspace_id)
        .await?;
    Ok(ListResponse::Ok(Json(automations)))
}

/// `GET /api/automations/{id}` — get automation by ID.
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
    let automation_id = parse_id(&id)?;
    let automation = state
        .automation_service
        .get_automation(automation_id)
        .await?;
    Ok(GetResponse::Ok(Json(automation)))
}

/// `POST /api/automations` — create a new automation.
pub async fn create<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Json(req): Json<CreateAutomationRequest>,
) -> Result<CreateResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let mut builder = Automation::builder()
        .workspace_id(req.workspace_id)
        .name(req.name)
        .trigger(req.trigger)
        .action(req.action);

    if let Some(enabled) = req.enabled {
        builder = builder.enabled(enabled);
    }

    let automation = builder.build()?;
    let created = state
        .automation_service
        .create_automation(automation)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/automations/{id}` — update an existing automation.
pub async fn update<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAutomationRequest>,
) -> Result<GetResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let automation_id = parse_id(&id)?;

    // The workspace binding is immutable; take it from the stored rule.
    let existing = state
        .automation_service
        .get_automation(automation_id)
        .await?;

    let automation = Automation::builder()
        .id(automation_id)
        .workspace_id(existing.workspace_id)
        .name(req.name)
        .enabled(req.enabled)
        .trigger(req.trigger)
        .action(req.action)
        .build()?;
    let updated = state
        .automation_service
        .update_automation(automation)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/automations/{id}` — delete an automation.
pub async fn delete<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let automation_id = parse_id(&id)?;
    state
        .automation_service
        .delete_automation(automation_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
