/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Gatekeeper API server entry point.
//!
//! A standalone Axum service that manages meeting rooms, join-request
//! approval, and issues JWT room access tokens for the external
//! conferencing provider.

use chrono::{Duration, Utc};
use greenroom_api::config::Config;
use greenroom_api::db;
use greenroom_api::routes;
use greenroom_api::state::AppState;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().expect("failed to load configuration");

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to PostgreSQL");

    tracing::info!("Connected to PostgreSQL");

    db::migrate(&pool).await.expect("failed to run migrations");

    // Administrative retention pass: runs once per process start, no
    // in-process scheduler.
    if let Some(days) = config.room_retention_days {
        let cutoff = Utc::now() - Duration::days(days);
        match db::rooms::purge_inactive(&pool, cutoff).await {
            Ok(0) => {}
            Ok(purged) => tracing::info!("Purged {purged} rooms inactive for over {days} days"),
            Err(e) => tracing::error!("Retention sweep failed: {e}"),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState::new(pool, &config);
    let app = routes::router().layer(cors).with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!("Gatekeeper listening on {}", config.listen_addr);

    axum::serve(listener, app).await.expect("server error");
}
