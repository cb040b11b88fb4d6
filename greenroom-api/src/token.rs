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

//! JWT signing for room access tokens and session tokens.
//!
//! Both token kinds are signed with the same shared secret (HMAC-SHA256) but
//! carry distinct issuer claims. Room access tokens are consumed by the
//! external conferencing client; session tokens only ever round-trip back to
//! this service through the `session` cookie.

use chrono::Utc;
use greenroom_types::token::{TokenFeatures, TokenRole};
use greenroom_types::RoomAccessTokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT payload for a session token carried in the `session` cookie.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Stable identity for this session (random UUID).
    pub sub: String,
    /// Display name chosen at identification time.
    pub name: String,
    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
    /// Issuer identifier. Always [`SessionClaims::ISSUER`].
    pub iss: String,
}

impl SessionClaims {
    pub const ISSUER: &'static str = "greenroom-session";
}

/// A missing signing secret must fail closed: no token, explicit error.
fn signing_key(secret: &str) -> Result<EncodingKey, AppError> {
    if secret.is_empty() {
        tracing::error!("Refusing to sign token: signing secret is not configured");
        return Err(AppError::internal("signing secret is not configured"));
    }
    Ok(EncodingKey::from_secret(secret.as_bytes()))
}

/// Sign a room access token for an authorized caller.
pub fn generate_room_token(
    secret: &str,
    ttl_secs: i64,
    subject: &str,
    display_name: &str,
    room: &str,
    role: TokenRole,
) -> Result<String, AppError> {
    let key = signing_key(secret)?;
    let now = Utc::now().timestamp();
    let claims = RoomAccessTokenClaims {
        sub: subject.to_string(),
        name: display_name.to_string(),
        room: room.to_string(),
        role,
        features: TokenFeatures::for_role(role),
        exp: now + ttl_secs,
        iss: RoomAccessTokenClaims::ISSUER.to_string(),
        aud: RoomAccessTokenClaims::AUDIENCE.to_string(),
    };

    encode(&Header::default(), &claims, &key).map_err(|e| {
        tracing::error!("Failed to sign room token: {e}");
        AppError::internal("failed to generate room token")
    })
}

/// Sign a session token embedding the caller's identity.
pub fn generate_session_token(
    secret: &str,
    subject: &str,
    display_name: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let key = signing_key(secret)?;
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: subject.to_string(),
        name: display_name.to_string(),
        exp: now + ttl_secs,
        iss: SessionClaims::ISSUER.to_string(),
    };

    encode(&Header::default(), &claims, &key).map_err(|e| {
        tracing::error!("Failed to sign session token: {e}");
        AppError::internal("failed to generate session token")
    })
}

/// Validate a session token and return its claims.
///
/// Rejects bad signatures, wrong issuers, and expired tokens.
pub fn verify_session_token(secret: &str, jwt: &str) -> Result<SessionClaims, AppError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[SessionClaims::ISSUER]);
    decode::<SessionClaims>(
        jwt,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized())
}
