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

//! Request types for the Gatekeeper REST API.
//!
//! These types define the shape of request bodies and query parameters.
//! They are used by both the server (for deserialization) and clients
//! (for serialization).

use serde::{Deserialize, Serialize};

/// Request body for `POST /session`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdentifyRequest {
    /// Name shown to the host when reviewing join requests.
    pub display_name: String,
}

/// Request body for `POST /api/v1/rooms`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateRoomRequest {
    /// Room name. Normalized (trimmed, case-folded) before lookup/creation.
    /// Auto-generated (12 chars) if omitted.
    #[serde(default)]
    pub name: Option<String>,

    /// Public rooms admit any identified caller without host review.
    #[serde(default)]
    pub public: bool,

    /// Guest names admitted without host review (max 100). Entries are
    /// normalized the same way room names are.
    #[serde(default)]
    pub allowed_guests: Vec<String>,
}

/// Host decision on a single join request.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Deny,
}

/// Request body for `POST /api/v1/rooms/{room}/respond`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RespondRequest {
    /// Session subject of the guest whose request is being resolved.
    pub guest_id: String,

    /// Whether to approve or deny.
    pub action: ReviewAction,
}

/// Query parameters for `GET /api/v1/rooms`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListRoomsQuery {
    /// Maximum number of rooms to return (1-100). Defaults to 20.
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Number of rooms to skip for pagination. Defaults to 0.
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl Default for ListRoomsQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}
