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

//! Integration tests for session identity endpoints and the retention sweep.


use axum::body::Body;
use axum::http::{header, StatusCode};
use chrono::{Duration, Utc};
use greenroom_api::db;
use greenroom_types::{
    responses::{APIResponse, ProfileResponse},
    APIError,
};
use serial_test::serial;
use test_helpers::*;
use tower::ServiceExt;

// ── Identify / profile ───────────────────────────────────────────────────

#[tokio::test]
#[serial]
async fn test_identify_sets_a_usable_session_cookie() {
    let pool = get_test_pool().await;

    let app = build_app(pool.clone());
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/session")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"display_name":"  Alice  "}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("identify should set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let body: APIResponse<ProfileResponse> = response_json(resp).await;
    assert!(body.success);
    assert_eq!(body.result.display_name, "Alice");
    assert!(!body.result.id.is_empty());

    // The cookie round-trips through /profile.
    let session_pair = cookie.split(';').next().unwrap().to_string();
    let app = build_app(pool.clone());
    let req = axum::http::Request::builder()
        .method("GET")
        .uri("/profile")
        .header(header::COOKIE, session_pair)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: APIResponse<ProfileResponse> = response_json(resp).await;
    assert_eq!(profile.result.id, body.result.id);
    assert_eq!(profile.result.display_name, "Alice");
}

#[tokio::test]
#[serial]
async fn test_identify_rejects_blank_display_name() {
    let pool = get_test_pool().await;

    let app = build_app(pool.clone());
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/session")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"display_name":"   "}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "INVALID_DISPLAY_NAME");
}

#[tokio::test]
#[serial]
async fn test_session_probe_and_logout() {
    let pool = get_test_pool().await;

    // No cookie: 401.
    let app = build_app(pool.clone());
    let req = axum::http::Request::builder()
        .method("GET")
        .uri("/session")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Valid cookie: 200.
    let app = build_app(pool.clone());
    let req = request_as("GET", "/session", "sub-1", "Alice")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Logout clears the cookie.
    let app = build_app(pool.clone());
    let req = axum::http::Request::builder()
        .method("GET")
        .uri("/logout")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout should clear the cookie")
        .to_str()
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

// ── Retention sweep ──────────────────────────────────────────────────────

#[tokio::test]
#[serial]
async fn test_purge_removes_only_long_inactive_rooms() {
    let pool = get_test_pool().await;
    cleanup_test_data(&pool, "stale-room").await;
    cleanup_test_data(&pool, "live-room").await;

    // One long-ended room with a leftover join request, one active room.
    let stale_id: (i32,) = sqlx::query_as(
        "INSERT INTO rooms (name, host_id, is_active, updated_at) \
         VALUES ($1, 'host-a', FALSE, NOW() - INTERVAL '60 days') RETURNING id",
    )
    .bind("stale-room")
    .fetch_one(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO join_requests (room_id, guest_id, status) VALUES ($1, 'guest-b', 'approved')",
    )
    .bind(stale_id.0)
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO rooms (name, host_id) VALUES ($1, 'host-a')")
        .bind("live-room")
        .execute(&pool)
        .await
        .unwrap();

    let cutoff = Utc::now() - Duration::days(30);
    let purged = db::rooms::purge_inactive(&pool, cutoff).await.unwrap();
    assert_eq!(purged, 1);

    // The stale room and its cascaded requests are gone; the live room stays.
    let stale: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms WHERE name = $1")
        .bind("stale-room")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stale.0, 0);

    let orphaned: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM join_requests WHERE room_id = $1")
            .bind(stale_id.0)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphaned.0, 0);

    let live: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms WHERE name = $1")
        .bind("live-room")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(live.0, 1);

    cleanup_test_data(&pool, "live-room").await;
}
