// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # API Integration Tests
//!
//! Integration tests for routeguard-api functionality including:
//!
//! - Route access middleware on an axum router
//! - Login required vs. forbidden responses
//! - Root warning flashes in the request session

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use routeguard_api::{
    ErrorResponseBody, RouteAccessLayer, SessionHandle, FORBIDDEN_MESSAGE, LOGIN_REQUIRED_MESSAGE,
};
use routeguard_core::{FlashStore, Identity, ROOT_WARNING_MESSAGE, WARNING_FLASH_KEY};
use tower::ServiceExt;

use routeguard_tests::prelude::*;

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> Router {
    init_test_logging();
    let gate = GateFixtures::blog_gate(AccessFixtures::with_root());

    Router::new()
        .route("/site/index", get(|| async { "home" }))
        .route("/blog/post/view", get(|| async { "post" }))
        .route("/blog/post/update", post(|| async { "updated" }))
        .route("/billing/invoice/delete", post(|| async { "deleted" }))
        .layer(RouteAccessLayer::new(Arc::new(gate)))
}

fn request(method: &str, uri: &str, identity: Option<Identity>) -> Request<Body> {
    let mut req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    if let Some(identity) = identity {
        req.extensions_mut().insert(identity);
    }
    req
}

async fn error_body(response: axum::response::Response) -> ErrorResponseBody {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Middleware Tests
// =============================================================================

#[tokio::test]
async fn test_guest_reaches_public_routes() {
    let response = app()
        .oneshot(request("GET", "/site/index", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app()
        .oneshot(request("GET", "/blog/post/view", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_guest_denied_requires_login() {
    let response = app()
        .oneshot(request("POST", "/blog/post/update", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "UNAUTHORIZED");
    assert_eq!(body.error.message, LOGIN_REQUIRED_MESSAGE);
}

#[tokio::test]
async fn test_user_denied_is_forbidden() {
    let response = app()
        .oneshot(request(
            "POST",
            "/billing/invoice/delete",
            Some(IdentityFixtures::editor()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = error_body(response).await;
    assert_eq!(body.error.message, FORBIDDEN_MESSAGE);
}

#[tokio::test]
async fn test_user_allowed() {
    let response = app()
        .oneshot(request(
            "POST",
            "/blog/post/update",
            Some(IdentityFixtures::editor()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_root_user_flashed_once_per_session() {
    let (handle, session) = SessionHandle::memory();

    for uri in ["/billing/invoice/delete", "/blog/post/update"] {
        let mut req = request("POST", uri, Some(IdentityFixtures::admin()));
        req.extensions_mut().insert(handle.clone());
        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(session.flashes(WARNING_FLASH_KEY), vec![ROOT_WARNING_MESSAGE]);
}

#[tokio::test]
async fn test_manager_failure_is_internal_error() {
    let gate = GateFixtures::gate(
        Arc::new(FailingAuthManager::new("store offline")),
        &AccessFixtures::plain(),
    );
    let app = Router::new()
        .route("/site/index", get(|| async { "home" }))
        .layer(RouteAccessLayer::new(Arc::new(gate)));

    let response = app
        .oneshot(request("GET", "/site/index", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = error_body(response).await;
    assert!(!body.error.message.contains("offline"));
}
