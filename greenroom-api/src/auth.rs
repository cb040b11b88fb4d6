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

//! Axum extractor that resolves the caller's identity from the signed
//! session JWT in the `session` cookie (or `Authorization: Bearer` header).
//!
//! The extractor only establishes *who* the caller is. Whether they host a
//! given room is decided per request against the room's stored `host_id`,
//! never from session state.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::token;

/// The authenticated caller: session subject plus display name.
///
/// Usage in a handler:
/// ```ignore
/// async fn my_handler(AuthUser { id, name }: AuthUser) { ... }
/// ```
#[derive(Debug)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
}

/// Pull the raw session JWT out of the request: `session` cookie first,
/// `Authorization: Bearer` as a fallback for non-browser clients.
fn extract_session_jwt(parts: &Parts) -> Option<String> {
    let cookie_header = parts
        .headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    for pair in cookie_header.split(';') {
        let pair = pair.trim();
        if let Some(value) = pair.strip_prefix("session=") {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let jwt = extract_session_jwt(parts).ok_or_else(AppError::unauthorized)?;
        let claims = token::verify_session_token(&state.jwt_secret, &jwt)?;
        Ok(AuthUser {
            id: claims.sub,
            name: claims.name,
        })
    }
}
