//! Notification ports — the append-only sink and the recipient-facing reads.
//!
//! The engine's responsibility ends at the insert; real-time fan-out and
//! email are downstream concerns of whoever consumes the store.

use std::future::Future;
use std::sync::Arc;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{NotificationId, UserId};
use taskhub_domain::notification::Notification;

/// Append-only store of notifications. This is the only notification
/// surface the engine sees.
pub trait NotificationSink {
    /// Append a notification. Duplicates are accepted; deduplication is a
    /// client-side read concern.
    fn push(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<Notification, TaskHubError>> + Send;
}

/// The recipient-facing view over the notification store. Only the
/// recipient ever flips the `read` flag.
pub trait NotificationRepository: NotificationSink {
    /// All notifications addressed to a user, newest first.
    fn list_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Notification>, TaskHubError>> + Send;

    /// Mark a notification read. Returns `false` when it does not exist.
    fn mark_read(
        &self,
        id: NotificationId,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send;
}

impl<T: NotificationSink + Send + Sync> NotificationSink for Arc<T> {
    fn push(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<Notification, TaskHubError>> + Send {
        (**self).push(notification)
    }
}

impl<T: NotificationRepository + Send + Sync> NotificationRepository for Arc<T> {
    fn list_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Notification>, TaskHubError>> + Send {
        (**self).list_for_user(user_id)
    }
    fn mark_read(
        &self,
        id: NotificationId,
    ) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        (**self).mark_read(id)
    }
}
