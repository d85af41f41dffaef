//! # taskhub-adapter-http-axum
//!
//! HTTP adapter using [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the rule-authoring REST API (`/api/automations`)
//! - Serve the task mutation paths that feed the dispatcher (`/api/tasks`)
//! - Serve reminder and notification endpoints, the on-demand sweep
//!   trigger, and the SSE notification stream
//! - Map domain errors to HTTP status codes
//!
//! ## Dependency rule
//! Depends on `taskhub-app` (for services and ports) and `taskhub-domain`
//! (for types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
