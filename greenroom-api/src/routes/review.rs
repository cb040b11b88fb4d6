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

//! Handlers for host review: list pending join requests, approve/deny.
//!
//! Host authority is re-derived from the room's stored `host_id` on every
//! call rather than from anything cached in the session.

use axum::{
    extract::{Path, State},
    Json,
};
use greenroom_types::{
    requests::{RespondRequest, ReviewAction},
    responses::{APIResponse, JoinRequestInfo, PendingRequestsResponse},
    JoinStatus,
};

use crate::auth::AuthUser;
use crate::db::{join_requests as db_requests, rooms as db_rooms};
use crate::error::AppError;
use crate::normalize::normalize;
use crate::state::AppState;

/// Fetch the room and verify the caller is its host (404 before 403).
async fn require_host(
    state: &AppState,
    room_name: &str,
    caller_id: &str,
) -> Result<db_rooms::RoomRow, AppError> {
    let row = db_rooms::get_by_name(&state.db, room_name)
        .await?
        .ok_or_else(|| AppError::room_not_found(room_name))?;

    if row.host_id != caller_id {
        return Err(AppError::not_host());
    }
    Ok(row)
}

/// GET /api/v1/rooms/{room}/requests
///
/// Pending entries only, oldest first, so review order is fair.
pub async fn pending_requests(
    State(state): State<AppState>,
    AuthUser { id, .. }: AuthUser,
    Path(room): Path<String>,
) -> Result<Json<APIResponse<PendingRequestsResponse>>, AppError> {
    let room_name = normalize(&room);
    let row = require_host(&state, &room_name, &id).await?;

    let rows = db_requests::get_pending(&state.db, row.id).await?;
    let pending: Vec<JoinRequestInfo> =
        rows.into_iter().map(|r| r.into_request_info()).collect();

    Ok(Json(APIResponse::ok(PendingRequestsResponse {
        room: room_name,
        pending,
    })))
}

/// POST /api/v1/rooms/{room}/respond
///
/// Resolve one pending request. Repeating a decision is an idempotent
/// success; reversing a terminal decision is a conflict (the guest revives a
/// denial by re-requesting).
pub async fn respond(
    State(state): State<AppState>,
    AuthUser { id, .. }: AuthUser,
    Path(room): Path<String>,
    Json(body): Json<RespondRequest>,
) -> Result<Json<APIResponse<JoinRequestInfo>>, AppError> {
    let room_name = normalize(&room);
    let row = require_host(&state, &room_name, &id).await?;

    // No approvals into a meeting that has already ended.
    if !row.is_active {
        return Err(AppError::room_not_active(&room_name));
    }

    let target = match body.action {
        ReviewAction::Approve => JoinStatus::Approved,
        ReviewAction::Deny => JoinStatus::Denied,
    };

    if let Some(updated) =
        db_requests::transition(&state.db, row.id, &body.guest_id, target).await?
    {
        tracing::info!(
            "Join request from '{}' for room '{room_name}' marked {}",
            body.guest_id,
            target.as_str()
        );
        return Ok(Json(APIResponse::ok(updated.into_request_info())));
    }

    // Nothing was pending: distinguish idempotent repeats from bad transitions.
    let current = db_requests::get(&state.db, row.id, &body.guest_id)
        .await?
        .ok_or_else(|| AppError::request_not_found(&body.guest_id))?;

    if current.join_status() == target {
        return Ok(Json(APIResponse::ok(current.into_request_info())));
    }

    Err(AppError::invalid_transition(
        &current.status,
        target.as_str(),
    ))
}
