//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod automation_repo;
pub mod notification;
pub mod notification_bus;
pub mod reminder_repo;
pub mod storage;

pub use automation_repo::AutomationRepository;
pub use notification::{NotificationRepository, NotificationSink};
pub use notification_bus::NotificationPublisher;
pub use reminder_repo::ReminderRepository;
pub use storage::{LabelRepository, TaskRepository};
