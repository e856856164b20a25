// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route access middleware.
//!
//! Runs [`RouteAccessGate::check`] before the inner service. Inputs are
//! taken from the request:
//!
//! - identity: [`Identity`] extension set by the host's authentication layer,
//!   guest when absent
//! - session: [`SessionHandle`] extension
//! - route: [`RouteTarget`] extension, or derived from the URI path
//! - background: `X-Requested-With: XMLHttpRequest`

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    response::{IntoResponse, Response},
};
use routeguard_core::{Caller, Identity, RouteAccessGate, RouteDefaults, RouteTarget};
use tower::{Layer, Service};

use crate::error::ApiError;
use crate::session::SessionHandle;

/// Header marking background (XHR) requests.
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Returns `true` if the request was sent in the background.
pub fn is_background_request(headers: &HeaderMap) -> bool {
    headers
        .get(REQUESTED_WITH_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

// =============================================================================
// RouteAccessLayer
// =============================================================================

/// Layer enforcing route access.
#[derive(Clone)]
pub struct RouteAccessLayer {
    gate: Arc<RouteAccessGate>,
    defaults: Arc<RouteDefaults>,
}

impl RouteAccessLayer {
    /// Creates a layer over `gate`.
    pub fn new(gate: Arc<RouteAccessGate>) -> Self {
        Self {
            gate,
            defaults: Arc::new(RouteDefaults::default()),
        }
    }

    /// Sets the fallback ids used when deriving routes from paths.
    pub fn with_defaults(mut self, defaults: RouteDefaults) -> Self {
        self.defaults = Arc::new(defaults);
        self
    }
}

impl<S> Layer<S> for RouteAccessLayer {
    type Service = RouteAccessMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RouteAccessMiddleware {
            inner,
            gate: self.gate.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

// =============================================================================
// RouteAccessMiddleware
// =============================================================================

/// Middleware enforcing route access.
#[derive(Clone)]
pub struct RouteAccessMiddleware<S> {
    inner: S,
    gate: Arc<RouteAccessGate>,
    defaults: Arc<RouteDefaults>,
}

impl<S> RouteAccessMiddleware<S> {
    fn authorize(&self, req: &Request<Body>) -> Result<(), ApiError> {
        let extensions = req.extensions();
        let identity = extensions.get::<Identity>();
        let session = extensions.get::<SessionHandle>();
        let route = extensions
            .get::<RouteTarget>()
            .cloned()
            .unwrap_or_else(|| RouteTarget::from_path(req.uri().path(), &self.defaults));

        let mut caller = Caller::from_identity(identity)
            .in_background(is_background_request(req.headers()));
        if let Some(session) = session {
            caller = caller.with_session(session.store());
        }

        if self.gate.check(&route, &caller)? {
            return Ok(());
        }

        tracing::warn!(
            route = %route,
            user = identity.map(|i| i.id.as_str()).unwrap_or("guest"),
            method = %req.method(),
            "Route access denied"
        );
        Err(ApiError::access_denied(caller.is_guest()))
    }
}

impl<S> Service<Request<Body>> for RouteAccessMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let decision = self.authorize(&req);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match decision {
                Ok(()) => inner.call(req).await,
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use routeguard_core::{
        AccessConfig, FlashStore, InMemoryAuthManager, PermissionResolver, ROOT_WARNING_MESSAGE,
        WARNING_FLASH_KEY,
    };
    use std::convert::Infallible;
    use tower::ServiceExt;

    fn mock_service() -> impl Service<Request<Body>, Response = Response, Error = Infallible, Future = impl Future<Output = Result<Response, Infallible>> + Send> + Clone + Send {
        tower::service_fn(|_req| async {
            Ok::<_, Infallible>(Response::new(Body::empty()))
        })
    }

    fn layer() -> RouteAccessLayer {
        let manager = Arc::new(
            InMemoryAuthManager::builder()
                .role("Guest")
                .role("editor")
                .permission("app_site")
                .permission("app_post")
                .child("Guest", "app_site")
                .child("editor", "app_post")
                .assign("7", "editor")
                .build(),
        );
        let config = AccessConfig::new().with_root_user("1");
        let resolver = Arc::new(PermissionResolver::new(manager, &config));
        RouteAccessLayer::new(Arc::new(RouteAccessGate::new(resolver, &config)))
    }

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_guest_allowed() {
        let mut service = layer().layer(mock_service());

        let response = service
            .ready()
            .await
            .unwrap()
            .call(request("/site/login"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_guest_denied_login_required() {
        let service = layer().layer(mock_service());

        let response = service.oneshot(request("/post/update")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["message"], "Login Required");
    }

    #[tokio::test]
    async fn test_user_allowed_and_forbidden() {
        let alice = Identity::new("7", "alice");

        let mut req = request("/post/update");
        req.extensions_mut().insert(alice.clone());
        let response = layer().layer(mock_service()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut req = request("/site/index");
        req.extensions_mut().insert(alice);
        let response = layer().layer(mock_service()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_route_extension_takes_precedence() {
        let mut req = request("/post/update");
        req.extensions_mut().insert(RouteTarget::new("app", "site", "index"));

        let response = layer().layer(mock_service()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_warning_flash() {
        let (handle, session) = SessionHandle::memory();

        let mut req = request("/billing/invoice/delete");
        req.extensions_mut().insert(Identity::new("1", "admin"));
        req.extensions_mut().insert(handle.clone());
        let response = layer().layer(mock_service()).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(session.flashes(WARNING_FLASH_KEY), vec![ROOT_WARNING_MESSAGE]);
    }

    #[tokio::test]
    async fn test_root_warning_skipped_for_background() {
        let (handle, session) = SessionHandle::memory();

        let mut req = Request::builder()
            .uri("/site/index")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut().insert(Identity::new("1", "admin"));
        req.extensions_mut().insert(handle);
        let response = layer().layer(mock_service()).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session.flashes(WARNING_FLASH_KEY).is_empty());
    }

    #[test]
    fn test_is_background_request() {
        let mut headers = HeaderMap::new();
        assert!(!is_background_request(&headers));

        headers.insert(REQUESTED_WITH_HEADER, "xmlhttprequest".parse().unwrap());
        assert!(is_background_request(&headers));
    }
}
