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

//! API error types.
//!
//! Every failed API response is returned as `APIResponse<APIError>` with `success: false`.

use serde::{Deserialize, Serialize};

/// Structured error returned in the `result` field of a failed [`super::APIResponse`].
///
/// The `code` field is a machine-readable identifier (e.g. `"ROOM_NOT_FOUND"`).
/// The `message` field is a human-readable description suitable for display.
/// The `engineering_error` field carries debug-level detail (DB errors, signer
/// failures) that is useful during development but should be stripped or
/// redacted in production.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIError {
    /// Machine-readable error code (e.g. `"UNAUTHORIZED"`, `"NAME_TAKEN"`).
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Optional engineering-level detail for debugging.
    /// Should be omitted or redacted in production responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering_error: Option<String>,
}

impl APIError {
    pub fn unauthorized() -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: "Authentication required.".to_string(),
            engineering_error: None,
        }
    }

    pub fn invalid_room_name(detail: &str) -> Self {
        Self {
            code: "INVALID_ROOM_NAME".to_string(),
            message: format!("Invalid room name: {detail}"),
            engineering_error: None,
        }
    }

    pub fn invalid_display_name(detail: &str) -> Self {
        Self {
            code: "INVALID_DISPLAY_NAME".to_string(),
            message: format!("Invalid display name: {detail}"),
            engineering_error: None,
        }
    }

    pub fn too_many_guests(count: usize, max: usize) -> Self {
        Self {
            code: "TOO_MANY_GUESTS".to_string(),
            message: format!("Allow list too large: {count} entries provided, maximum is {max}"),
            engineering_error: None,
        }
    }

    pub fn name_taken(name: &str) -> Self {
        Self {
            code: "NAME_TAKEN".to_string(),
            message: format!("Room name '{name}' is already taken by another host"),
            engineering_error: None,
        }
    }

    pub fn room_not_found(name: &str) -> Self {
        Self {
            code: "ROOM_NOT_FOUND".to_string(),
            message: format!("Room '{name}' not found"),
            engineering_error: None,
        }
    }

    pub fn room_not_active(name: &str) -> Self {
        Self {
            code: "ROOM_NOT_ACTIVE".to_string(),
            message: format!("Room '{name}' is not active. The host has ended the meeting."),
            engineering_error: None,
        }
    }

    pub fn not_host() -> Self {
        Self {
            code: "NOT_HOST".to_string(),
            message: "Only the room host can perform this action".to_string(),
            engineering_error: None,
        }
    }

    pub fn request_not_found(guest_id: &str) -> Self {
        Self {
            code: "REQUEST_NOT_FOUND".to_string(),
            message: format!("No join request from '{guest_id}' for this room"),
            engineering_error: None,
        }
    }

    pub fn invalid_transition(current: &str, requested: &str) -> Self {
        Self {
            code: "INVALID_TRANSITION".to_string(),
            message: format!("Cannot move a join request from '{current}' to '{requested}'"),
            engineering_error: None,
        }
    }

    pub fn internal_error(detail: &str) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: "Internal server error".to_string(),
            engineering_error: Some(detail.to_string()),
        }
    }
}

impl std::fmt::Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for APIError {}
