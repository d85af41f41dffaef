//! # taskhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `taskhub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `taskhub-app` (for port traits) and `taskhub-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

mod automation_repo;
mod error;
mod label_repo;
mod notification_repo;
mod pool;
mod reminder_repo;
mod task_repo;

pub use automation_repo::SqliteAutomationRepository;
pub use error::StorageError;
pub use label_repo::SqliteLabelRepository;
pub use notification_repo::SqliteNotificationRepository;
pub use pool::{Config, Database};
pub use reminder_repo::SqliteReminderRepository;
pub use task_repo::SqliteTaskRepository;
