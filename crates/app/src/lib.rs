//! # taskhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `TaskRepository` — task reads plus the engine's idempotent writes
//!   - `LabelRepository` — label lookups scoped to a workspace
//!   - `AutomationRepository` — rule persistence, indexed by trigger class
//!   - `ReminderRepository` — reminder persistence with an atomic claim
//!   - `NotificationSink` / `NotificationRepository` — append-only inserts
//!     plus the recipient-facing reads
//! - Define **driving/inbound ports** as use-case structs:
//!   - `TaskService` — the mutation paths that feed the dispatcher
//!   - `AutomationService` — rule authoring CRUD
//!   - `ReminderService` — scheduling and deleting reminders
//!   - `AutomationDispatcher` — match rules, apply actions, bound re-entry
//!   - `ReminderSweeper` — deliver due reminders, scan approaching due dates
//! - Provide **in-process infrastructure** (notification bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `taskhub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dispatcher;
pub mod notification_bus;
pub mod ports;
pub mod services;
pub mod sweeper;

#[cfg(test)]
pub(crate) mod test_support;
