//! Notification bus port — best-effort publish for real-time delivery.

use std::future::Future;
use std::sync::Arc;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::notification::Notification;

/// Publishes freshly stored notifications to interested subscribers
/// (connected clients, delivery workers). Publishing is best-effort: the
/// engine must never assume a subscriber saw the message.
pub trait NotificationPublisher {
    /// Publish a notification to all current subscribers.
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), TaskHubError>> + Send;
}

impl<T: NotificationPublisher + Send + Sync> NotificationPublisher for Arc<T> {
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        (**self).publish(notification)
    }
}
