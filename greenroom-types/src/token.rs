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

//! Room access token (JWT) claims.
//!
//! The room access token is a signed JWT (HMAC-SHA256) that admits a client
//! to the external conferencing provider for a specific room. The Gatekeeper
//! signs the token; the provider's client validates the signature and
//! extracts the claims.

use serde::{Deserialize, Serialize};

/// Role claim embedded in a room access token.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenRole {
    Host,
    Participant,
}

/// Feature flags embedded in a room access token.
///
/// Recording and live streaming are host-only; screen sharing is granted to
/// every admitted participant.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TokenFeatures {
    pub recording: bool,
    pub livestreaming: bool,
    pub screen_sharing: bool,
}

impl TokenFeatures {
    /// The feature set granted to the given role.
    pub fn for_role(role: TokenRole) -> Self {
        let is_host = role == TokenRole::Host;
        Self {
            recording: is_host,
            livestreaming: is_host,
            screen_sharing: true,
        }
    }
}

/// JWT payload for a room access token.
///
/// This is the only credential the conferencing provider accepts. It is
/// never persisted; the Gatekeeper re-derives it on every authorized access.
///
/// # Example payload
///
/// ```json
/// {
///   "sub": "1f6b2c1e-8f4b-4ad7-9f2b-b94a64a2c0d1",
///   "name": "Alice",
///   "room": "team-sync",
///   "role": "participant",
///   "features": { "recording": false, "livestreaming": false, "screen_sharing": true },
///   "exp": 1707004800,
///   "iss": "greenroom-gatekeeper",
///   "aud": "greenroom-conference"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoomAccessTokenClaims {
    /// Caller's session subject (unique identity).
    pub sub: String,

    /// Caller's chosen display name for this meeting.
    pub name: String,

    /// The normalized room name the caller is authorized to join.
    pub room: String,

    /// Role inside the conference.
    pub role: TokenRole,

    /// Feature set granted by the role.
    pub features: TokenFeatures,

    /// Expiration timestamp (Unix seconds).
    /// Token is rejected after this time.
    pub exp: i64,

    /// Issuer identifier. Always [`RoomAccessTokenClaims::ISSUER`].
    pub iss: String,

    /// Audience identifier. Always [`RoomAccessTokenClaims::AUDIENCE`].
    pub aud: String,
}

impl RoomAccessTokenClaims {
    /// The expected issuer value for tokens produced by the Gatekeeper.
    pub const ISSUER: &'static str = "greenroom-gatekeeper";

    /// The expected audience value, consumed by the conference client.
    pub const AUDIENCE: &'static str = "greenroom-conference";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_features_include_recording_and_livestreaming() {
        let features = TokenFeatures::for_role(TokenRole::Host);
        assert!(features.recording);
        assert!(features.livestreaming);
        assert!(features.screen_sharing);
    }

    #[test]
    fn participant_features_are_screen_sharing_only() {
        let features = TokenFeatures::for_role(TokenRole::Participant);
        assert!(!features.recording);
        assert!(!features.livestreaming);
        assert!(features.screen_sharing);
    }

    #[test]
    fn role_serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&TokenRole::Host).unwrap(), "\"host\"");
        assert_eq!(
            serde_json::to_string(&TokenRole::Participant).unwrap(),
            "\"participant\""
        );
    }
}
