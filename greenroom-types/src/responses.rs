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

//! Response types for the Gatekeeper REST API.
//!
//! Every endpoint returns an [`APIResponse<T>`] envelope:
//! - On success: `{ "success": true,  "result": <T> }`
//! - On failure: `{ "success": false, "result": <APIError> }`

use serde::{Deserialize, Serialize};

use crate::role::{JoinStatus, RoomRole};

// ---------------------------------------------------------------------------
// Generic envelope
// ---------------------------------------------------------------------------

/// Top-level API response envelope.
///
/// All Gatekeeper endpoints wrap their payload in this structure so that
/// clients always see a consistent `{ "success", "result" }` shape.
///
/// # Success example
///
/// ```json
/// { "success": true, "result": { "name": "team-sync", ... } }
/// ```
///
/// # Error example
///
/// ```json
/// { "success": false, "result": { "code": "ROOM_NOT_FOUND", "message": "..." } }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIResponse<A: Serialize> {
    pub success: bool,
    pub result: A,
}

impl<A: Serialize> APIResponse<A> {
    /// Wrap a successful result.
    pub fn ok(result: A) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

impl APIResponse<crate::error::APIError> {
    /// Wrap an error result.
    pub fn error(err: crate::error::APIError) -> Self {
        Self {
            success: false,
            result: err,
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint-specific response payloads
// ---------------------------------------------------------------------------

/// Response payload for `POST /session` and `GET /profile`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProfileResponse {
    /// Session subject, unique per identity.
    pub id: String,
    pub display_name: String,
}

/// Response payload for `POST /api/v1/rooms`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateRoomResponse {
    /// Normalized room name.
    pub name: String,
    pub host: String,
    pub public: bool,
    pub allowed_guests: Vec<String>,
    /// Unix timestamp in seconds when the room was created.
    pub created_at: i64,
}

/// Response payload for `GET /api/v1/rooms`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListRoomsResponse {
    pub rooms: Vec<RoomSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Single room entry inside [`ListRoomsResponse`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoomSummary {
    pub name: String,
    pub public: bool,
    pub active: bool,
    /// Unix timestamp in seconds when the room was created.
    pub created_at: i64,
    /// Number of unresolved join requests awaiting host review.
    pub pending_count: i64,
}

/// Room details embedded in entry and status responses.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoomInfo {
    pub name: String,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_display_name: Option<String>,
    pub public: bool,
    pub active: bool,
}

/// Response payload for `GET /api/v1/rooms/{room}` (room entry).
///
/// `token` is present only when `role` grants access; everyone else is
/// expected to request access and poll.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EntryResponse {
    pub room: RoomInfo,
    pub role: RoomRole,
    pub join_status: JoinStatus,
    /// Signed room access token. Present only for `host` / `authorized_guest`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Response payload for `POST /api/v1/rooms/{room}/request` and
/// `GET /api/v1/rooms/{room}/status`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JoinStatusResponse {
    pub room: String,
    pub role: RoomRole,
    pub status: JoinStatus,
    /// Unix timestamp in seconds when the request was first submitted, or
    /// `null` if no request is on file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<i64>,
    /// Unix timestamp in seconds of the last status change, or `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    /// Signed room access token. Present only once the caller is authorized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// One pending entry inside [`PendingRequestsResponse`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JoinRequestInfo {
    pub guest_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_display_name: Option<String>,
    pub status: JoinStatus,
    /// Unix timestamp in seconds when the request was submitted.
    pub requested_at: i64,
    /// Unix timestamp in seconds of the last status change.
    pub updated_at: i64,
}

/// Response payload for `GET /api/v1/rooms/{room}/requests`.
///
/// Entries are ordered oldest-first so the host reviews fairly.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PendingRequestsResponse {
    pub room: String,
    pub pending: Vec<JoinRequestInfo>,
}

/// Response payload for `POST /api/v1/rooms/{room}/end`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EndRoomResponse {
    pub message: String,
}

/// Response payload for `GET /` (service banner).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BannerResponse {
    pub service: String,
    pub version: String,
}
