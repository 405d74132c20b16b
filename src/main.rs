// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Birthday Tracker API Server
//!
//! Stores birthdays in JSON files and emails daily reminders for the ones
//! falling tomorrow, optionally with AI-generated gift ideas.

use birthday_tracker::{
    config::Config,
    services::{ensure_default_admin, AiClient, Mailer, ReminderContext, ReminderScheduler},
    store::{BirthdayStore, SettingsStore, UserStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        "Starting Birthday Tracker API"
    );

    // Open the JSON stores (creates the data directory on first run)
    let users = UserStore::open(config.data_dir.join("users.json"))
        .expect("Failed to open users store");
    let birthdays = BirthdayStore::open(config.data_dir.join("birthdays.json"))
        .expect("Failed to open birthdays store");
    let settings = SettingsStore::open(config.data_dir.join("settings.json"))
        .expect("Failed to open settings store");

    // One-time bootstrap and migration
    ensure_default_admin(&users, &config).expect("Failed to create default admin");
    let backfilled = birthdays
        .migrate_add_ids()
        .expect("Failed to migrate birthday ids");
    if backfilled > 0 {
        tracing::info!(count = backfilled, "Backfilled birthday record ids");
    }

    let mailer = Mailer::default();
    let ai = AiClient::new();

    // Start the daily reminder job
    let scheduler = ReminderScheduler::default();
    scheduler.start(ReminderContext {
        birthdays: birthdays.clone(),
        settings: settings.clone(),
        mailer: mailer.clone(),
        ai: ai.clone(),
    });

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        users,
        birthdays,
        settings,
        mailer,
        ai,
        scheduler,
    });

    // Build router
    let app = birthday_tracker::routes::create_router(state.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.scheduler.stop();
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}

/// Initialize logging with an env-filter (RUST_LOG overrides the defaults).
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("birthday_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
