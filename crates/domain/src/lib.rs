//! # taskhub-domain
//!
//! Pure domain model for the taskhub automation and reminder engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Tasks** (the records automations act on) and **Labels**
//! - Define **Automations** (workspace-scoped trigger → action rules)
//! - Define **EventContexts** (transient descriptions of trigger-worthy mutations)
//! - Define **Reminders** (one-shot scheduled notification intents)
//! - Define **Notifications** (append-only records consumed by delivery)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod event;
pub mod label;
pub mod notification;
pub mod reminder;
pub mod task;
