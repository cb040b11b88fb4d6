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

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Every error is returned as `APIResponse<APIError>` with `success: false`,
//! paired with the appropriate HTTP status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use greenroom_types::{APIError, APIResponse};

/// Application-level error that pairs an HTTP status code with an [`APIError`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: APIError,
}

impl AppError {
    pub fn new(status: StatusCode, body: APIError) -> Self {
        Self { status, body }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, APIError::unauthorized())
    }

    pub fn invalid_room_name(detail: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::invalid_room_name(detail))
    }

    pub fn invalid_display_name(detail: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            APIError::invalid_display_name(detail),
        )
    }

    pub fn too_many_guests(count: usize, max: usize) -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::too_many_guests(count, max))
    }

    pub fn name_taken(name: &str) -> Self {
        Self::new(StatusCode::CONFLICT, APIError::name_taken(name))
    }

    pub fn room_not_found(name: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, APIError::room_not_found(name))
    }

    pub fn room_not_active(name: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::room_not_active(name))
    }

    pub fn not_host() -> Self {
        Self::new(StatusCode::FORBIDDEN, APIError::not_host())
    }

    pub fn request_not_found(guest_id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, APIError::request_not_found(guest_id))
    }

    pub fn invalid_transition(current: &str, requested: &str) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            APIError::invalid_transition(current, requested),
        )
    }

    pub fn internal(detail: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            APIError::internal_error(detail),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = APIResponse::error(self.body);
        (self.status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {err}");
        Self::internal(&err.to_string())
    }
}
