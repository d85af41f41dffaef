//! Operational endpoints — the on-demand sweep trigger.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use taskhub_app::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, ReminderRepository,
    TaskRepository,
};
use taskhub_domain::time::now;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body of the sweep endpoint.
#[derive(Serialize)]
pub struct SweepResponse {
    /// Reminders successfully notified by this run.
    pub sent_count: usize,
}

/// Possible responses from the sweep endpoint.
pub enum Sweep {
    Ok(Json<SweepResponse>),
}

impl IntoResponse for Sweep {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/sweep` — run one reminder sweep (and a due-date scan) now,
/// for manual/ops-triggered runs. The scheduled loop in the daemon calls
/// the same code on its own interval.
pub async fn sweep<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
) -> Result<Sweep, ApiError>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let moment = now();
    let sent_count = state.sweeper.sweep(moment).await?;
    let due_soon = state.sweeper.dispatch_due_soon(moment).await?;
    if due_soon > 0 {
        tracing::info!(count = due_soon, "dispatched due-date automations");
    }
    Ok(Sweep::Ok(Json(SweepResponse { sent_count })))
}
