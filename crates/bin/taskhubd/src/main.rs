//! # taskhubd — taskhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging via `tracing-subscriber`
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Spawn the background sweep loop (the engine's external scheduler)
//! - Build the axum router, bind to a TCP port, and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

use std::sync::Arc;

use chrono::Duration;

use taskhub_adapter_http_axum::state::AppState;
use taskhub_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteAutomationRepository, SqliteLabelRepository,
    SqliteNotificationRepository, SqliteReminderRepository, SqliteTaskRepository,
};
use taskhub_app::dispatcher::AutomationDispatcher;
use taskhub_app::notification_bus::{FanoutSink, InProcessNotificationBus};
use taskhub_app::services::automation_service::AutomationService;
use taskhub_app::services::reminder_service::ReminderService;
use taskhub_app::services::task_service::TaskService;
use taskhub_app::sweeper::ReminderSweeper;

mod config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Notification bus shared by every fan-out sink and the SSE stream
    let bus = Arc::new(InProcessNotificationBus::new(256));

    let due_soon_window = Duration::hours(config.sweeper.due_soon_window_hours);
    let reminder_lead = Duration::hours(config.sweeper.reminder_lead_hours);

    // Services
    let task_service = TaskService::new(
        SqliteTaskRepository::new(pool.clone()),
        SqliteReminderRepository::new(pool.clone()),
        AutomationDispatcher::new(
            SqliteAutomationRepository::new(pool.clone()),
            SqliteTaskRepository::new(pool.clone()),
            SqliteLabelRepository::new(pool.clone()),
            FanoutSink::new(
                SqliteNotificationRepository::new(pool.clone()),
                Arc::clone(&bus),
            ),
        ),
        reminder_lead,
    );
    let automation_service = AutomationService::new(SqliteAutomationRepository::new(pool.clone()));
    let reminder_service = ReminderService::new(
        SqliteReminderRepository::new(pool.clone()),
        SqliteTaskRepository::new(pool.clone()),
    );

    // Background sweep loop: the scheduled invocations of the sweeper.
    // The HTTP state gets its own instance for on-demand runs.
    let background_sweeper = ReminderSweeper::new(
        SqliteReminderRepository::new(pool.clone()),
        SqliteTaskRepository::new(pool.clone()),
        FanoutSink::new(
            SqliteNotificationRepository::new(pool.clone()),
            Arc::clone(&bus),
        ),
        AutomationDispatcher::new(
            SqliteAutomationRepository::new(pool.clone()),
            SqliteTaskRepository::new(pool.clone()),
            SqliteLabelRepository::new(pool.clone()),
            FanoutSink::new(
                SqliteNotificationRepository::new(pool.clone()),
                Arc::clone(&bus),
            ),
        ),
        due_soon_window,
    );
    let interval_secs = config.sweeper.interval_secs;
    let sweep_handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            let moment = taskhub_domain::time::now();
            match background_sweeper.sweep(moment).await {
                Ok(0) => {}
                Ok(sent) => tracing::info!(sent, "reminder sweep delivered notifications"),
                Err(err) => tracing::error!(error = %err, "reminder sweep failed"),
            }
            match background_sweeper.dispatch_due_soon(moment).await {
                Ok(0) => {}
                Ok(count) => tracing::info!(count, "dispatched due-date automations"),
                Err(err) => tracing::error!(error = %err, "due-date scan failed"),
            }
        }
    });

    // HTTP
    let state = AppState::new(
        task_service,
        automation_service,
        reminder_service,
        ReminderSweeper::new(
            SqliteReminderRepository::new(pool.clone()),
            SqliteTaskRepository::new(pool.clone()),
            FanoutSink::new(
                SqliteNotificationRepository::new(pool.clone()),
                Arc::clone(&bus),
            ),
            AutomationDispatcher::new(
                SqliteAutomationRepository::new(pool.clone()),
                SqliteTaskRepository::new(pool.clone()),
                SqliteLabelRepository::new(pool.clone()),
                FanoutSink::new(
                    SqliteNotificationRepository::new(pool.clone()),
                    Arc::clone(&bus),
                ),
            ),
            due_soon_window,
        ),
        SqliteLabelRepository::new(pool.clone()),
        FanoutSink::new(SqliteNotificationRepository::new(pool), Arc::clone(&bus)),
        Arc::clone(&bus),
    );
    let app = taskhub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "taskhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    sweep_handle.abort();
    Ok(())
}
