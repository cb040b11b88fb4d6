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

//! Handlers for the room registry: create (get-or-create), list, entry, end.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use greenroom_types::{
    requests::{CreateRoomRequest, ListRoomsQuery},
    responses::{
        APIResponse, CreateRoomResponse, EndRoomResponse, EntryResponse, ListRoomsResponse,
        RoomSummary,
    },
    token::TokenRole,
    JoinStatus, RoomRole,
};

use crate::auth::AuthUser;
use crate::db::{join_requests as db_requests, rooms as db_rooms};
use crate::error::AppError;
use crate::normalize::{generate_room_name, normalize, validate_room_name};
use crate::role;
use crate::state::AppState;
use crate::token::generate_room_token;

const MAX_ALLOWED_GUESTS: usize = 100;

/// POST /api/v1/rooms
///
/// Get-or-create semantics keyed on the normalized name: the same host
/// re-posting the same name gets the existing room back (reactivated and
/// reset if the previous meeting had ended); a different host gets
/// `NAME_TAKEN`. Creation races resolve through the unique index: the
/// loser's insert degrades into a lookup.
pub async fn create_room(
    State(state): State<AppState>,
    AuthUser { id, name: caller_name }: AuthUser,
    Json(body): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<APIResponse<CreateRoomResponse>>), AppError> {
    let room_name = match &body.name {
        Some(raw) => {
            let normalized = normalize(raw);
            validate_room_name(&normalized)?;
            normalized
        }
        None => generate_room_name(),
    };

    if body.allowed_guests.len() > MAX_ALLOWED_GUESTS {
        return Err(AppError::too_many_guests(
            body.allowed_guests.len(),
            MAX_ALLOWED_GUESTS,
        ));
    }
    let allowed_guests: Vec<String> = body
        .allowed_guests
        .iter()
        .map(|g| normalize(g))
        .filter(|g| !g.is_empty())
        .collect();
    let allowed_json =
        serde_json::to_value(&allowed_guests).map_err(|e| AppError::internal(&e.to_string()))?;

    let created = db_rooms::create(
        &state.db,
        &room_name,
        &id,
        Some(&caller_name),
        body.public,
        &allowed_json,
    )
    .await?;

    if let Some(row) = created {
        tracing::info!("Room '{room_name}' created by '{caller_name}'");
        return Ok((
            StatusCode::CREATED,
            Json(APIResponse::ok(into_create_response(row))),
        ));
    }

    // Name already present: either ours (idempotent) or someone else's.
    let existing = db_rooms::get_by_name(&state.db, &room_name)
        .await?
        .ok_or_else(|| AppError::internal("room vanished during creation"))?;

    if existing.host_id != id {
        return Err(AppError::name_taken(&room_name));
    }

    let row = if existing.is_active {
        existing
    } else {
        // A fresh meeting under an old name: stale approvals must not carry over.
        db_requests::clear_for_room(&state.db, existing.id).await?;
        let row = db_rooms::reactivate(
            &state.db,
            existing.id,
            Some(&caller_name),
            body.public,
            &allowed_json,
        )
        .await?;
        tracing::info!("Room '{room_name}' reactivated by its host");
        row
    };

    Ok((StatusCode::OK, Json(APIResponse::ok(into_create_response(row)))))
}

fn into_create_response(row: db_rooms::RoomRow) -> CreateRoomResponse {
    CreateRoomResponse {
        allowed_guests: row.allowed_guest_names(),
        name: row.name,
        host: row.host_id,
        public: row.is_public,
        created_at: row.created_at.timestamp(),
    }
}

/// GET /api/v1/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    AuthUser { id, .. }: AuthUser,
    Query(params): Query<ListRoomsQuery>,
) -> Result<Json<APIResponse<ListRoomsResponse>>, AppError> {
    let limit = params.limit.clamp(1, 100);
    let offset = params.offset.max(0);

    let rows = db_rooms::list_by_host(&state.db, &id, limit, offset).await?;
    let total = db_rooms::count_by_host(&state.db, &id).await?;

    let mut rooms = Vec::with_capacity(rows.len());
    for row in &rows {
        let pending_count = db_requests::count_pending(&state.db, row.id).await?;
        rooms.push(RoomSummary {
            name: row.name.clone(),
            public: row.is_public,
            active: row.is_active,
            created_at: row.created_at.timestamp(),
            pending_count,
        });
    }

    Ok(Json(APIResponse::ok(ListRoomsResponse {
        rooms,
        total,
        limit,
        offset,
    })))
}

/// GET /api/v1/rooms/{room}
///
/// Room entry: resolve the caller's role and, when it grants access, mint a
/// room access token. Unauthorized callers receive their role so the client
/// can steer them to the request-access flow instead of a dead end.
pub async fn enter_room(
    State(state): State<AppState>,
    AuthUser { id, name: caller_name }: AuthUser,
    Path(room): Path<String>,
) -> Result<Json<APIResponse<EntryResponse>>, AppError> {
    let room_name = normalize(&room);
    let row = db_rooms::get_by_name(&state.db, &room_name)
        .await?
        .ok_or_else(|| AppError::room_not_found(&room_name))?;

    // An ended meeting refuses entry regardless of prior approvals.
    if !row.is_active {
        return Err(AppError::room_not_active(&room_name));
    }

    let request = db_requests::get(&state.db, row.id, &id).await?;
    let resolved = role::resolve(&row, &id, &caller_name, request.as_ref());

    let token = if resolved.grants_access() {
        let token_role = if resolved == RoomRole::Host {
            TokenRole::Host
        } else {
            TokenRole::Participant
        };
        Some(generate_room_token(
            &state.jwt_secret,
            state.token_ttl_secs,
            &id,
            &caller_name,
            &room_name,
            token_role,
        )?)
    } else {
        None
    };

    Ok(Json(APIResponse::ok(EntryResponse {
        room: row.to_room_info(),
        role: resolved,
        join_status: request
            .map(|r| r.join_status())
            .unwrap_or(JoinStatus::None),
        token,
    })))
}

/// POST /api/v1/rooms/{room}/end
///
/// Deactivate the room. Only the recorded host may end a meeting; ending an
/// already-ended room is an idempotent success.
pub async fn end_room(
    State(state): State<AppState>,
    AuthUser { id, .. }: AuthUser,
    Path(room): Path<String>,
) -> Result<Json<APIResponse<EndRoomResponse>>, AppError> {
    let room_name = normalize(&room);

    // Check the room exists first to distinguish 404 from 403.
    let row = db_rooms::get_by_name(&state.db, &room_name)
        .await?
        .ok_or_else(|| AppError::room_not_found(&room_name))?;

    if row.host_id != id {
        return Err(AppError::not_host());
    }

    db_rooms::deactivate(&state.db, &room_name, &id).await?;

    Ok(Json(APIResponse::ok(EndRoomResponse {
        message: format!("Room '{room_name}' has been ended"),
    })))
}
