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

//! Shared application state passed to every Axum handler via `State`.

use crate::config::Config;
use sqlx::PgPool;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub db: PgPool,
    /// Secret used to sign room access and session tokens.
    pub jwt_secret: String,
    /// Room access token time-to-live in seconds.
    pub token_ttl_secs: i64,
    /// Session token time-to-live in seconds.
    pub session_ttl_secs: i64,
    /// Cookie domain (e.g. ".example.com"), or `None` for default.
    pub cookie_domain: Option<String>,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_secs: config.token_ttl_secs,
            session_ttl_secs: config.session_ttl_secs,
            cookie_domain: config.cookie_domain.clone(),
            cookie_secure: config.cookie_secure,
        }
    }
}
