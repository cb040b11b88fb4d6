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

//! Role resolution: what is this caller allowed to do in this room?
//!
//! Pure function of the stored room and join-request state so routes and
//! tests share a single authorization truth. Room inactivity is checked by
//! the routes before resolution; an inactive room refuses entry outright.

use greenroom_types::{JoinStatus, RoomRole};

use crate::db::join_requests::JoinRequestRow;
use crate::db::rooms::RoomRow;
use crate::normalize::normalize;

/// Compute the caller's role in `room` from current state. No side effects.
///
/// Precedence: host, then public/allow-list/approval, then pending. A denied
/// request resolves to [`RoomRole::Unauthorized`]; the guest may re-request,
/// so the room stays reachable rather than denied outright.
pub fn resolve(
    room: &RoomRow,
    caller_id: &str,
    caller_name: &str,
    request: Option<&JoinRequestRow>,
) -> RoomRole {
    if room.host_id == caller_id {
        return RoomRole::Host;
    }

    let approved = request
        .map(|r| r.join_status() == JoinStatus::Approved)
        .unwrap_or(false);
    if room.is_public || room.allows_guest(&normalize(caller_name)) || approved {
        return RoomRole::AuthorizedGuest;
    }

    if request
        .map(|r| r.join_status() == JoinStatus::Pending)
        .unwrap_or(false)
    {
        return RoomRole::PendingApproval;
    }

    RoomRole::Unauthorized
}
