//! Server-Sent Events (SSE) stream of freshly stored notifications.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use taskhub_app::ports::{
    AutomationRepository, LabelRepository, NotificationRepository, ReminderRepository,
    TaskRepository,
};

use crate::state::AppState;

/// `GET /api/notifications/stream` — SSE stream of notifications as they
/// are inserted.
///
/// Subscribes to the in-process notification bus and sends JSON-encoded
/// notifications as SSE `data:` frames. Delivery is best-effort: a client
/// that lags far enough behind the broadcast buffer misses messages, which
/// is acceptable because the store remains the source of truth.
pub async fn stream<TR, LR, AR, RR, NR>(
    State(state): State<AppState<TR, LR, AR, RR, NR>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    TR: TaskRepository + Send + Sync + 'static,
    LR: LabelRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: ReminderRepository + Send + Sync + 'static,
    NR: NotificationRepository + Send + Sync + 'static,
{
    let rx = state.notification_bus.subscribe();
    let event_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(notification) => match serde_json::to_string(&notification) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize notification for SSE stream");
                None
            }
        },
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(
                skipped = n,
                "SSE subscriber lagged, some notifications were dropped"
            );
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
