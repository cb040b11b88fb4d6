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

//! Application configuration loaded from environment variables.

use std::env;

/// Configuration for the Gatekeeper API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:8081").
    pub listen_addr: String,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Shared secret used to sign room access and session tokens (HMAC-SHA256).
    pub jwt_secret: String,
    /// Room access token time-to-live in seconds (default: 7200 = 2 hours).
    pub token_ttl_secs: i64,
    /// Session token time-to-live in seconds (default: 86400 = 24 hours).
    pub session_ttl_secs: i64,
    /// Cookie domain (optional, e.g. ".example.com").
    pub cookie_domain: Option<String>,
    /// Whether to mark the session cookie `Secure`.
    pub cookie_secure: bool,
    /// Inactive rooms older than this many days are purged at startup.
    /// `None` disables the retention sweep.
    pub room_retention_days: Option<i64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `DATABASE_URL`
    /// - `JWT_SECRET` (must be non-empty; token issuance fails closed without it)
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:8081"`)
    /// - `TOKEN_TTL_SECS` (default: `"7200"`)
    /// - `SESSION_TTL_SECS` (default: `"86400"`)
    /// - `COOKIE_DOMAIN`
    /// - `COOKIE_SECURE` (default: `"true"`)
    /// - `ROOM_RETENTION_DAYS`
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable is required")?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| "JWT_SECRET environment variable is required")?;
        if jwt_secret.trim().is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8081".to_string());
        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "7200".to_string())
            .parse::<i64>()
            .map_err(|_| "TOKEN_TTL_SECS must be a valid integer")?;
        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<i64>()
            .map_err(|_| "SESSION_TTL_SECS must be a valid integer")?;
        let cookie_domain = env::var("COOKIE_DOMAIN").ok().filter(|s| !s.is_empty());
        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v != "false")
            .unwrap_or(true);
        let room_retention_days = env::var("ROOM_RETENTION_DAYS")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>()
                    .map_err(|_| "ROOM_RETENTION_DAYS must be a valid integer".to_string())
            })
            .transpose()?;

        Ok(Self {
            listen_addr,
            database_url,
            jwt_secret,
            token_ttl_secs,
            session_ttl_secs,
            cookie_domain,
            cookie_secure,
            room_retention_days,
        })
    }
}
