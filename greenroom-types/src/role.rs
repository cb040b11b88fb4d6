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

//! Role and join-request status enums shared by the Gatekeeper and its clients.

use serde::{Deserialize, Serialize};

/// What a caller is allowed to do in a room, computed from the stored
/// room and join-request state.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomRole {
    /// The caller owns the room and may approve or deny join requests.
    Host,
    /// The caller may enter: public room, allow-listed, or approved.
    AuthorizedGuest,
    /// The caller has an unresolved join request and should keep polling.
    PendingApproval,
    /// The caller must request access before entering.
    Unauthorized,
}

impl RoomRole {
    /// Whether this role grants entry (and therefore a room token).
    pub fn grants_access(self) -> bool {
        matches!(self, RoomRole::Host | RoomRole::AuthorizedGuest)
    }
}

/// Status of a join request as stored in the ledger.
///
/// `None` is the sentinel for "no request on file" so that status polling
/// always has a well-defined answer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JoinStatus {
    None,
    Pending,
    Approved,
    Denied,
}

impl JoinStatus {
    /// Database representation. [`JoinStatus::None`] is never persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            JoinStatus::None => "none",
            JoinStatus::Pending => "pending",
            JoinStatus::Approved => "approved",
            JoinStatus::Denied => "denied",
        }
    }

    /// Parse the database representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(JoinStatus::None),
            "pending" => Some(JoinStatus::Pending),
            "approved" => Some(JoinStatus::Approved),
            "denied" => Some(JoinStatus::Denied),
            _ => None,
        }
    }
}
