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

//! Session identity handlers: identify, probe, profile, logout.
//!
//! `POST /session` mints a fresh identity (a random subject plus the chosen
//! display name) as a **signed session JWT** inside an
//! `HttpOnly; SameSite=Lax` cookie named `session`. JavaScript cannot read
//! the cookie; the browser sends it automatically. An identity-provider
//! integration would replace this endpoint and keep the same cookie contract.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use greenroom_types::{
    requests::IdentifyRequest,
    responses::{APIResponse, ProfileResponse},
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::token;

const MAX_DISPLAY_NAME_LEN: usize = 255;

// ---------------------------------------------------------------------------
// Cookie helpers
// ---------------------------------------------------------------------------

/// Build a `Set-Cookie` header value for the session JWT.
fn build_session_cookie(jwt: &str, ttl_secs: i64, domain: Option<&str>, secure: bool) -> String {
    let mut cookie = format!("session={jwt}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    if let Some(d) = domain {
        cookie.push_str(&format!("; Domain={d}"));
    }
    cookie
}

/// Build a `Set-Cookie` header that clears the `session` cookie.
fn build_clear_session_cookie(domain: Option<&str>, secure: bool) -> String {
    let mut cookie = "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0".to_string();
    if secure {
        cookie.push_str("; Secure");
    }
    if let Some(d) = domain {
        cookie.push_str(&format!("; Domain={d}"));
    }
    cookie
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /session
///
/// Mint a new identity for the caller. Re-identifying replaces any previous
/// session cookie.
pub async fn identify(
    State(state): State<AppState>,
    Json(body): Json<IdentifyRequest>,
) -> Result<Response, AppError> {
    let display_name = body.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::invalid_display_name("cannot be empty"));
    }
    if display_name.len() > MAX_DISPLAY_NAME_LEN {
        return Err(AppError::invalid_display_name(&format!(
            "cannot exceed {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }

    let subject = Uuid::new_v4().to_string();
    let session_jwt = token::generate_session_token(
        &state.jwt_secret,
        &subject,
        display_name,
        state.session_ttl_secs,
    )?;

    let cookie = build_session_cookie(
        &session_jwt,
        state.session_ttl_secs,
        state.cookie_domain.as_deref(),
        state.cookie_secure,
    );

    tracing::info!("Identified new session for '{display_name}'");

    let body = APIResponse::ok(ProfileResponse {
        id: subject,
        display_name: display_name.to_string(),
    });
    let mut response = (StatusCode::CREATED, Json(body)).into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|_| AppError::internal("invalid cookie value"))?,
    );
    Ok(response)
}

/// GET /session -- returns 200 if the session JWT is valid, 401 otherwise.
pub async fn check_session(AuthUser { .. }: AuthUser) -> StatusCode {
    StatusCode::OK
}

/// GET /profile -- echo the identity embedded in the session JWT.
///
/// Because the session JWT embeds both subject and display name, this
/// endpoint does not need a database query.
pub async fn get_profile(AuthUser { id, name }: AuthUser) -> Json<APIResponse<ProfileResponse>> {
    Json(APIResponse::ok(ProfileResponse {
        id,
        display_name: name,
    }))
}

/// GET /logout -- clears the session cookie.
pub async fn logout(State(state): State<AppState>) -> Response {
    let clear = build_clear_session_cookie(state.cookie_domain.as_deref(), state.cookie_secure);
    let mut response = StatusCode::OK.into_response();
    match HeaderValue::from_str(&clear) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!("Failed to build clear-session cookie: {e}"),
    }
    response
}
