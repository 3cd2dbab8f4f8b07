// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Baby Tracker API Server
//!
//! Records feeds, naps and wake-ups in Firestore and serves the activity log,
//! one-shot or live.

use anyhow::Context;
use baby_tracker::{
    config::Config, db::ActivityStore, services::ActivityLogService, AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(
        port = config.port,
        backend = ?config.store_backend,
        collection = %config.activities_collection,
        utc_offset_secs = config.display_offset.local_minus_utc(),
        "Starting Baby Tracker API"
    );

    // Connect the event store
    let store = ActivityStore::connect(&config)
        .await
        .context("failed to open activity store")?;

    let activity_log = ActivityLogService::new(store.clone(), &config);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        activity_log,
    });

    // Build router
    let app = baby_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("baby_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
