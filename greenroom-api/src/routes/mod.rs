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

//! Axum router configuration for the Gatekeeper API.

pub mod requests;
pub mod review;
pub mod rooms;
pub mod session;

use axum::{
    routing::{get, post},
    Json, Router,
};
use greenroom_types::responses::{APIResponse, BannerResponse};

use crate::state::AppState;

/// GET / -- landing banner so load balancers and humans see a live service.
async fn index() -> Json<APIResponse<BannerResponse>> {
    Json(APIResponse::ok(BannerResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Build the full application router with all gatekeeper routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        // Session identity
        .route("/session", post(session::identify).get(session::check_session))
        .route("/profile", get(session::get_profile))
        .route("/logout", get(session::logout))
        // Room registry
        .route("/api/v1/rooms", post(rooms::create_room))
        .route("/api/v1/rooms", get(rooms::list_rooms))
        .route("/api/v1/rooms/{room}", get(rooms::enter_room))
        .route("/api/v1/rooms/{room}/end", post(rooms::end_room))
        // Guest gatekeeping
        .route("/api/v1/rooms/{room}/request", post(requests::submit_request))
        .route("/api/v1/rooms/{room}/status", get(requests::my_status))
        // Host review
        .route("/api/v1/rooms/{room}/requests", get(review::pending_requests))
        .route("/api/v1/rooms/{room}/respond", post(review::respond))
}
