//! In-process notification bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::notification::Notification;

use crate::ports::{NotificationPublisher, NotificationRepository, NotificationSink};

/// In-process notification bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the notification is simply dropped).
pub struct InProcessNotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl InProcessNotificationBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications on this bus.
    ///
    /// Returns a receiver that will get all notifications published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl NotificationPublisher for InProcessNotificationBus {
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — we simply ignore the error.
        let _ = self.sender.send(notification);
        async { Ok(()) }
    }
}

/// Sink decorator that stores a notification and then publishes it on the
/// bus for best-effort real-time delivery. A failed publish never fails
/// the insert.
pub struct FanoutSink<S, P> {
    store: S,
    bus: P,
}

impl<S, P> FanoutSink<S, P> {
    /// Wrap a store and a bus.
    pub fn new(store: S, bus: P) -> Self {
        Self { store, bus }
    }
}

impl<S, P> NotificationSink for FanoutSink<S, P>
where
    S: NotificationSink + Send + Sync,
    P: NotificationPublisher + Send + Sync,
{
    async fn push(&self, notification: Notification) -> Result<Notification, TaskHubError> {
        let stored = self.store.push(notification).await?;
        if let Err(err) = self.bus.publish(stored.clone()).await {
            tracing::warn!(error = %err, "failed to publish stored notification to the bus");
        }
        Ok(stored)
    }
}

impl<S, P> NotificationRepository for FanoutSink<S, P>
where
    S: NotificationRepository + Send + Sync,
    P: NotificationPublisher + Send + Sync,
{
    fn list_for_user(
        &self,
        user_id: taskhub_domain::id::UserId,
    ) -> impl Future<Output = Result<Vec<Notification>, TaskHubError>> + Send {
        self.store.list_for_user(user_id)
    }

    fn mark_read(
        &self,
        id: taskhub_domain::id::NotificationId,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        self.store.mark_read(id)
    }
}
