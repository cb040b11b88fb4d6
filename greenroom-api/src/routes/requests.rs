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

//! Handlers for the guest side of the gatekeeper: submit a join request and
//! poll its status.

use axum::{
    extract::{Path, State},
    Json,
};
use greenroom_types::{
    responses::{APIResponse, JoinStatusResponse},
    token::TokenRole,
    JoinStatus, RoomRole,
};

use crate::auth::AuthUser;
use crate::db::{join_requests as db_requests, rooms as db_rooms};
use crate::error::AppError;
use crate::normalize::normalize;
use crate::role;
use crate::state::AppState;
use crate::token::generate_room_token;

/// Build the status payload shared by the submit and poll endpoints,
/// minting a token when the resolved role grants access.
fn status_response(
    state: &AppState,
    room_name: &str,
    caller_id: &str,
    caller_name: &str,
    resolved: RoomRole,
    request: Option<&db_requests::JoinRequestRow>,
) -> Result<JoinStatusResponse, AppError> {
    let token = if resolved.grants_access() {
        let token_role = if resolved == RoomRole::Host {
            TokenRole::Host
        } else {
            TokenRole::Participant
        };
        Some(generate_room_token(
            &state.jwt_secret,
            state.token_ttl_secs,
            caller_id,
            caller_name,
            room_name,
            token_role,
        )?)
    } else {
        None
    };

    Ok(JoinStatusResponse {
        room: room_name.to_string(),
        role: resolved,
        status: request.map(|r| r.join_status()).unwrap_or(JoinStatus::None),
        requested_at: request.map(|r| r.created_at.timestamp()),
        updated_at: request.map(|r| r.updated_at.timestamp()),
        token,
    })
}

/// POST /api/v1/rooms/{room}/request
///
/// Already-authorized callers (host, public room, allow-listed, approved)
/// get their role and token back without touching the ledger. Everyone else
/// gets a pending row: created fresh, left as-is if already pending, or
/// revived from a previous denial.
pub async fn submit_request(
    State(state): State<AppState>,
    AuthUser { id, name: caller_name }: AuthUser,
    Path(room): Path<String>,
) -> Result<Json<APIResponse<JoinStatusResponse>>, AppError> {
    let room_name = normalize(&room);
    let row = db_rooms::get_by_name(&state.db, &room_name)
        .await?
        .ok_or_else(|| AppError::room_not_found(&room_name))?;

    if !row.is_active {
        return Err(AppError::room_not_active(&room_name));
    }

    let existing = db_requests::get(&state.db, row.id, &id).await?;
    let resolved = role::resolve(&row, &id, &caller_name, existing.as_ref());

    if resolved.grants_access() {
        let response =
            status_response(&state, &room_name, &id, &caller_name, resolved, existing.as_ref())?;
        return Ok(Json(APIResponse::ok(response)));
    }

    let request = db_requests::upsert_pending(&state.db, row.id, &id, Some(&caller_name)).await?;
    tracing::info!("Join request for room '{room_name}' from '{caller_name}' is pending");

    let response = status_response(
        &state,
        &room_name,
        &id,
        &caller_name,
        RoomRole::PendingApproval,
        Some(&request),
    )?;
    Ok(Json(APIResponse::ok(response)))
}

/// GET /api/v1/rooms/{room}/status
///
/// Polling endpoint; a pure read callable at arbitrary frequency. Once the
/// caller is authorized the response includes a freshly minted token.
pub async fn my_status(
    State(state): State<AppState>,
    AuthUser { id, name: caller_name }: AuthUser,
    Path(room): Path<String>,
) -> Result<Json<APIResponse<JoinStatusResponse>>, AppError> {
    let room_name = normalize(&room);
    let row = db_rooms::get_by_name(&state.db, &room_name)
        .await?
        .ok_or_else(|| AppError::room_not_found(&room_name))?;

    // Refuse to issue tokens for ended meetings.
    if !row.is_active {
        return Err(AppError::room_not_active(&room_name));
    }

    let request = db_requests::get(&state.db, row.id, &id).await?;
    let resolved = role::resolve(&row, &id, &caller_name, request.as_ref());

    let response =
        status_response(&state, &room_name, &id, &caller_name, resolved, request.as_ref())?;
    Ok(Json(APIResponse::ok(response)))
}
