// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wakaboard API Server
//!
//! Serves coding-time leaderboards aggregated from WakaTime for a group
//! of registered users, with background-refreshed caching for the
//! month and year windows.

use chrono::FixedOffset;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wakaboard::{
    config::Config,
    db::{PostgresRegistry, UserRegistry},
    services::{refresh, Aggregator, BoardService, LeaderboardCache, MemoryCacheStore, WakaTimeClient},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Wakaboard API");

    // Connect to the user registry
    let registry: Arc<dyn UserRegistry> = Arc::new(
        PostgresRegistry::connect(&config.database_url)
            .await
            .expect("Failed to connect to Postgres"),
    );

    // WakaTime client with a bounded per-request timeout
    let wakatime = WakaTimeClient::new(
        config.wakatime_base_url.clone(),
        Duration::from_secs(config.wakatime_timeout_secs),
    )
    .expect("Failed to build WakaTime client");

    let cache = LeaderboardCache::new(Arc::new(MemoryCacheStore::default()));

    // Config validates the offset range, so this cannot fail here
    let tz_offset = FixedOffset::east_opt(config.tz_offset_hours * 3600)
        .expect("TZ_OFFSET_HOURS out of range");

    let board = BoardService::new(
        registry.clone(),
        Aggregator::new(Arc::new(wakatime)),
        cache,
        tz_offset,
    );

    // Keep the month/year cache slots warm
    refresh::spawn_refresh_loops(board.clone());
    tracing::info!("Background cache refresh loops started");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        registry,
        board,
    });

    // Build router
    let app = wakaboard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wakaboard=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
