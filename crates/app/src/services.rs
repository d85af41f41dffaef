//! Application services — the use-cases exposed to the HTTP adapter.

pub mod automation_service;
pub mod reminder_service;
pub mod task_service;
