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

//! Join request ledger queries.
//!
//! One row per (room, guest); the `UNIQUE (room_id, guest_id)` constraint
//! makes concurrent first requests collapse into a single upsert.

use chrono::{DateTime, Utc};
use greenroom_types::JoinStatus;
use sqlx::PgPool;

/// Row returned from the `join_requests` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JoinRequestRow {
    pub id: i32,
    pub room_id: i32,
    pub guest_id: String,
    pub guest_display_name: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const REQUEST_COLUMNS: &str = r#"
    id, room_id, guest_id, guest_display_name, status, created_at, updated_at
"#;

impl JoinRequestRow {
    /// Ledger status as the shared enum. The CHECK constraint keeps unknown
    /// strings out of the table; any that slip through map to `None`.
    pub fn join_status(&self) -> JoinStatus {
        JoinStatus::parse(&self.status).unwrap_or(JoinStatus::None)
    }
}

/// Create or revive a pending request.
///
/// Repeated requests while `pending` or `approved` leave the row untouched
/// (idempotent); a `denied` row is revived back to `pending`. The row's
/// `created_at` is preserved either way so host review stays fair.
pub async fn upsert_pending(
    pool: &PgPool,
    room_id: i32,
    guest_id: &str,
    guest_display_name: Option<&str>,
) -> Result<JoinRequestRow, sqlx::Error> {
    let query = format!(
        r#"
        INSERT INTO join_requests (room_id, guest_id, guest_display_name, status)
        VALUES ($1, $2, $3, 'pending')
        ON CONFLICT (room_id, guest_id)
        DO UPDATE SET
            status = CASE WHEN join_requests.status = 'denied'
                          THEN 'pending'
                          ELSE join_requests.status END,
            updated_at = CASE WHEN join_requests.status = 'denied'
                              THEN NOW()
                              ELSE join_requests.updated_at END,
            guest_display_name = COALESCE($3, join_requests.guest_display_name)
        RETURNING {REQUEST_COLUMNS}
        "#
    );
    sqlx::query_as::<_, JoinRequestRow>(&query)
        .bind(room_id)
        .bind(guest_id)
        .bind(guest_display_name)
        .fetch_one(pool)
        .await
}

/// Get the single status row for (room, guest).
pub async fn get(
    pool: &PgPool,
    room_id: i32,
    guest_id: &str,
) -> Result<Option<JoinRequestRow>, sqlx::Error> {
    let query = format!(
        "SELECT {REQUEST_COLUMNS} FROM join_requests WHERE room_id = $1 AND guest_id = $2"
    );
    sqlx::query_as::<_, JoinRequestRow>(&query)
        .bind(room_id)
        .bind(guest_id)
        .fetch_optional(pool)
        .await
}

/// All pending requests for a room, oldest first.
pub async fn get_pending(pool: &PgPool, room_id: i32) -> Result<Vec<JoinRequestRow>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {REQUEST_COLUMNS} FROM join_requests
        WHERE room_id = $1 AND status = 'pending'
        ORDER BY created_at ASC
        "#
    );
    sqlx::query_as::<_, JoinRequestRow>(&query)
        .bind(room_id)
        .fetch_all(pool)
        .await
}

/// Count pending requests for a room.
pub async fn count_pending(pool: &PgPool, room_id: i32) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM join_requests WHERE room_id = $1 AND status = 'pending'",
    )
    .bind(room_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Resolve a pending request. Returns `None` when the row is absent or no
/// longer pending; the caller decides between idempotent success and a
/// transition error by re-reading the current row.
pub async fn transition(
    pool: &PgPool,
    room_id: i32,
    guest_id: &str,
    new_status: JoinStatus,
) -> Result<Option<JoinRequestRow>, sqlx::Error> {
    let query = format!(
        r#"
        UPDATE join_requests
        SET status = $3, updated_at = NOW()
        WHERE room_id = $1 AND guest_id = $2 AND status = 'pending'
        RETURNING {REQUEST_COLUMNS}
        "#
    );
    sqlx::query_as::<_, JoinRequestRow>(&query)
        .bind(room_id)
        .bind(guest_id)
        .bind(new_status.as_str())
        .fetch_optional(pool)
        .await
}

/// Drop every request for a room. Used when the room is reset for a new
/// meeting so approvals never leak across meetings.
pub async fn clear_for_room(pool: &PgPool, room_id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM join_requests WHERE room_id = $1")
        .bind(room_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// -- Conversions to API response types --

impl JoinRequestRow {
    /// Convert a ledger row into the API response type.
    pub fn into_request_info(self) -> greenroom_types::responses::JoinRequestInfo {
        let status = self.join_status();
        greenroom_types::responses::JoinRequestInfo {
            guest_id: self.guest_id,
            guest_display_name: self.guest_display_name,
            status,
            requested_at: self.created_at.timestamp(),
            updated_at: self.updated_at.timestamp(),
        }
    }
}
