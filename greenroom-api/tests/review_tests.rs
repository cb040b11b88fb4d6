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

//! Integration tests for host review endpoints.


use axum::body::Body;
use axum::http::StatusCode;
use greenroom_types::{
    responses::{APIResponse, JoinRequestInfo, PendingRequestsResponse},
    APIError, JoinStatus,
};
use serial_test::serial;
use test_helpers::*;
use tower::ServiceExt;

/// Create a room as host-a and file join requests from the given guests,
/// in order.
async fn setup_with_requests(pool: &sqlx::PgPool, room: &str, guests: &[(&str, &str)]) {
    cleanup_test_data(pool, room).await;

    let app = build_app(pool.clone());
    let req = request_as("POST", "/api/v1/rooms", "host-a", "Alice")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::to_string(&serde_json::json!({ "name": room })).unwrap(),
        ))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    for (guest_id, guest_name) in guests {
        let app = build_app(pool.clone());
        let req = request_as(
            "POST",
            &format!("/api/v1/rooms/{room}/request"),
            guest_id,
            guest_name,
        )
        .body(Body::empty())
        .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

// ── Pending list ─────────────────────────────────────────────────────────

#[tokio::test]
#[serial]
async fn test_pending_list_is_oldest_first() {
    let pool = get_test_pool().await;
    setup_with_requests(
        &pool,
        "review-order",
        &[("guest-1", "Bob"), ("guest-2", "Carol"), ("guest-3", "Dana")],
    )
    .await;

    let app = build_app(pool.clone());
    let req = request_as("GET", "/api/v1/rooms/review-order/requests", "host-a", "Alice")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: APIResponse<PendingRequestsResponse> = response_json(resp).await;
    assert_eq!(body.result.room, "review-order");
    let guests: Vec<&str> = body
        .result
        .pending
        .iter()
        .map(|r| r.guest_id.as_str())
        .collect();
    assert_eq!(guests, vec!["guest-1", "guest-2", "guest-3"]);
    assert!(body
        .result
        .pending
        .iter()
        .all(|r| r.status == JoinStatus::Pending));

    cleanup_test_data(&pool, "review-order").await;
}

#[tokio::test]
#[serial]
async fn test_pending_list_refuses_non_host() {
    let pool = get_test_pool().await;
    setup_with_requests(&pool, "review-perms", &[("guest-1", "Bob")]).await;

    // Even the requester themselves cannot see the review queue.
    let app = build_app(pool.clone());
    let req = request_as("GET", "/api/v1/rooms/review-perms/requests", "guest-1", "Bob")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "NOT_HOST");

    cleanup_test_data(&pool, "review-perms").await;
}

#[tokio::test]
#[serial]
async fn test_resolved_requests_leave_the_pending_list() {
    let pool = get_test_pool().await;
    setup_with_requests(&pool, "review-drain", &[("guest-1", "Bob"), ("guest-2", "Carol")])
        .await;

    let app = build_app(pool.clone());
    let req = request_as("POST", "/api/v1/rooms/review-drain/respond", "host-a", "Alice")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"guest_id":"guest-1","action":"approve"}"#))
        .unwrap();
    let _ = app.oneshot(req).await.unwrap();

    let app = build_app(pool.clone());
    let req = request_as("GET", "/api/v1/rooms/review-drain/requests", "host-a", "Alice")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let body: APIResponse<PendingRequestsResponse> = response_json(resp).await;
    assert_eq!(body.result.pending.len(), 1);
    assert_eq!(body.result.pending[0].guest_id, "guest-2");

    cleanup_test_data(&pool, "review-drain").await;
}

// ── Respond ──────────────────────────────────────────────────────────────

#[tokio::test]
#[serial]
async fn test_approve_is_idempotent() {
    let pool = get_test_pool().await;
    setup_with_requests(&pool, "idem-approve", &[("guest-1", "Bob")]).await;

    for _ in 0..2 {
        let app = build_app(pool.clone());
        let req = request_as("POST", "/api/v1/rooms/idem-approve/respond", "host-a", "Alice")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"guest_id":"guest-1","action":"approve"}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: APIResponse<JoinRequestInfo> = response_json(resp).await;
        assert_eq!(body.result.status, JoinStatus::Approved);
    }

    cleanup_test_data(&pool, "idem-approve").await;
}

#[tokio::test]
#[serial]
async fn test_approve_after_deny_is_a_conflict() {
    let pool = get_test_pool().await;
    setup_with_requests(&pool, "deny-flip", &[("guest-1", "Bob")]).await;

    let app = build_app(pool.clone());
    let req = request_as("POST", "/api/v1/rooms/deny-flip/respond", "host-a", "Alice")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"guest_id":"guest-1","action":"deny"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let app = build_app(pool.clone());
    let req = request_as("POST", "/api/v1/rooms/deny-flip/respond", "host-a", "Alice")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"guest_id":"guest-1","action":"approve"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "INVALID_TRANSITION");

    cleanup_test_data(&pool, "deny-flip").await;
}

#[tokio::test]
#[serial]
async fn test_respond_refuses_non_host() {
    let pool = get_test_pool().await;
    setup_with_requests(&pool, "respond-perms", &[("guest-1", "Bob")]).await;

    // A guest cannot resolve requests, not even their own.
    let app = build_app(pool.clone());
    let req = request_as("POST", "/api/v1/rooms/respond-perms/respond", "guest-1", "Bob")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"guest_id":"guest-1","action":"approve"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The ledger row is unchanged.
    let status: (String,) = sqlx::query_as(
        "SELECT status FROM join_requests WHERE guest_id = $1 AND room_id IN \
         (SELECT id FROM rooms WHERE name = $2)",
    )
    .bind("guest-1")
    .bind("respond-perms")
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status.0, "pending");

    cleanup_test_data(&pool, "respond-perms").await;
}

#[tokio::test]
#[serial]
async fn test_respond_to_unknown_request_is_not_found() {
    let pool = get_test_pool().await;
    setup_with_requests(&pool, "no-request", &[]).await;

    let app = build_app(pool.clone());
    let req = request_as("POST", "/api/v1/rooms/no-request/respond", "host-a", "Alice")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"guest_id":"guest-x","action":"approve"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "REQUEST_NOT_FOUND");

    cleanup_test_data(&pool, "no-request").await;
}

#[tokio::test]
#[serial]
async fn test_respond_after_end_is_refused() {
    let pool = get_test_pool().await;
    setup_with_requests(&pool, "late-approve", &[("guest-1", "Bob")]).await;

    let app = build_app(pool.clone());
    let req = request_as("POST", "/api/v1/rooms/late-approve/end", "host-a", "Alice")
        .body(Body::empty())
        .unwrap();
    let _ = app.oneshot(req).await.unwrap();

    let app = build_app(pool.clone());
    let req = request_as("POST", "/api/v1/rooms/late-approve/respond", "host-a", "Alice")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"guest_id":"guest-1","action":"approve"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: APIResponse<APIError> = response_json(resp).await;
    assert_eq!(body.result.code, "ROOM_NOT_ACTIVE");

    cleanup_test_data(&pool, "late-approve").await;
}

#[tokio::test]
#[serial]
async fn test_malformed_respond_body_is_a_bad_request() {
    let pool = get_test_pool().await;
    setup_with_requests(&pool, "bad-body", &[("guest-1", "Bob")]).await;

    let app = build_app(pool.clone());
    let req = request_as("POST", "/api/v1/rooms/bad-body/respond", "host-a", "Alice")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"guest_id":"guest-1","action":"maybe"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    // The Json extractor rejects the unknown action before any handler runs.
    assert!(resp.status().is_client_error());

    // No partial ledger mutation.
    let status: (String,) = sqlx::query_as(
        "SELECT status FROM join_requests WHERE guest_id = $1 AND room_id IN \
         (SELECT id FROM rooms WHERE name = $2)",
    )
    .bind("guest-1")
    .bind("bad-body")
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status.0, "pending");

    cleanup_test_data(&pool, "bad-body").await;
}
