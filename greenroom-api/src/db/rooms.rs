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

//! Room table queries.
//!
//! Callers are expected to pass names through [`crate::normalize::normalize`]
//! before hitting any of these functions; the table stores canonical names only.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

/// Row returned from the `rooms` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoomRow {
    pub id: i32,
    pub name: String,
    pub host_id: String,
    pub host_display_name: Option<String>,
    pub is_public: bool,
    pub is_active: bool,
    pub allowed_guests: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const ROOM_COLUMNS: &str = r#"
    id, name, host_id, host_display_name, is_public, is_active,
    allowed_guests, created_at, updated_at
"#;

impl RoomRow {
    /// Whether a normalized guest name appears on the allow-list.
    pub fn allows_guest(&self, normalized_name: &str) -> bool {
        self.allowed_guests
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|v| v.as_str())
                    .any(|entry| entry == normalized_name)
            })
            .unwrap_or(false)
    }
}

/// Insert a new room. `ON CONFLICT DO NOTHING` makes a concurrent-creation
/// race loser come back as `None`; the caller re-fetches the winner's row.
pub async fn create(
    pool: &PgPool,
    name: &str,
    host_id: &str,
    host_display_name: Option<&str>,
    is_public: bool,
    allowed_guests: &JsonValue,
) -> Result<Option<RoomRow>, sqlx::Error> {
    let query = format!(
        r#"
        INSERT INTO rooms (name, host_id, host_display_name, is_public, allowed_guests)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (name) DO NOTHING
        RETURNING {ROOM_COLUMNS}
        "#
    );
    sqlx::query_as::<_, RoomRow>(&query)
        .bind(name)
        .bind(host_id)
        .bind(host_display_name)
        .bind(is_public)
        .bind(allowed_guests)
        .fetch_optional(pool)
        .await
}

/// Get a room by its normalized name.
pub async fn get_by_name(pool: &PgPool, name: &str) -> Result<Option<RoomRow>, sqlx::Error> {
    let query = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE name = $1");
    sqlx::query_as::<_, RoomRow>(&query)
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// List rooms owned by `host_id`, newest first.
pub async fn list_by_host(
    pool: &PgPool,
    host_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<RoomRow>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {ROOM_COLUMNS} FROM rooms
        WHERE host_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    );
    sqlx::query_as::<_, RoomRow>(&query)
        .bind(host_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

/// Count rooms owned by `host_id`.
pub async fn count_by_host(pool: &PgPool, host_id: &str) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms WHERE host_id = $1")
        .bind(host_id)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Deactivate a room. The host check lives in the WHERE clause so a non-host
/// caller can never flip the flag.
pub async fn deactivate(
    pool: &PgPool,
    name: &str,
    host_id: &str,
) -> Result<Option<RoomRow>, sqlx::Error> {
    let query = format!(
        r#"
        UPDATE rooms
        SET is_active = FALSE, updated_at = NOW()
        WHERE name = $1 AND host_id = $2 AND is_active
        RETURNING {ROOM_COLUMNS}
        "#
    );
    sqlx::query_as::<_, RoomRow>(&query)
        .bind(name)
        .bind(host_id)
        .fetch_optional(pool)
        .await
}

/// Reactivate an ended room for a fresh meeting, replacing its settings.
pub async fn reactivate(
    pool: &PgPool,
    room_id: i32,
    host_display_name: Option<&str>,
    is_public: bool,
    allowed_guests: &JsonValue,
) -> Result<RoomRow, sqlx::Error> {
    let query = format!(
        r#"
        UPDATE rooms
        SET is_active = TRUE,
            host_display_name = COALESCE($2, rooms.host_display_name),
            is_public = $3,
            allowed_guests = $4,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {ROOM_COLUMNS}
        "#
    );
    sqlx::query_as::<_, RoomRow>(&query)
        .bind(room_id)
        .bind(host_display_name)
        .bind(is_public)
        .bind(allowed_guests)
        .fetch_one(pool)
        .await
}

/// Hard-delete rooms that have been inactive since before `cutoff`.
/// Join requests cascade. Returns the number of rooms removed.
pub async fn purge_inactive(pool: &PgPool, cutoff: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM rooms WHERE is_active = FALSE AND updated_at < $1")
        .bind(cutoff)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// -- Conversions to API response types --

impl RoomRow {
    /// The allow-list as plain strings.
    pub fn allowed_guest_names(&self) -> Vec<String> {
        self.allowed_guests
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Convert a room row into the API response type.
    pub fn to_room_info(&self) -> greenroom_types::responses::RoomInfo {
        greenroom_types::responses::RoomInfo {
            name: self.name.clone(),
            host: self.host_id.clone(),
            host_display_name: self.host_display_name.clone(),
            public: self.is_public,
            active: self.is_active,
        }
    }
}
