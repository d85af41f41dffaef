//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`TaskHubError`]
//! via `#[from]`. Adapters wrap their infrastructure errors in the boxed
//! [`TaskHubError::Storage`] variant so the domain never names adapter types.

/// Top-level error for domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskHubError {
    /// A domain invariant was violated.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// The caller is not allowed to perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A rule or label name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A task or notification title was empty.
    #[error("title must not be empty")]
    EmptyTitle,

    /// A builder was finalized without its owning workspace.
    #[error("workspace is required")]
    MissingWorkspace,

    /// An automation was built without a trigger.
    #[error("trigger is required")]
    MissingTrigger,

    /// An automation was built without an action.
    #[error("action is required")]
    MissingAction,

    /// An identifier failed to parse.
    #[error("invalid identifier")]
    InvalidId,
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Human-readable entity kind, e.g. `"Task"`.
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: String,
}
