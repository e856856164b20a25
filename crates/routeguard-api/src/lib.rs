// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # routeguard-api
//!
//! HTTP integration for routeguard.
//!
//! This crate provides a `tower` layer that runs the route access gate
//! before every request of an `axum` application and maps denials to
//! `401`/`403` JSON responses.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/site/index", get(index))
//!     .layer(RouteAccessLayer::new(gate));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod middleware;
pub mod session;

pub use error::{
    ApiError, ErrorDetails, ErrorResponseBody, FORBIDDEN_MESSAGE, LOGIN_REQUIRED_MESSAGE,
};
pub use middleware::{RouteAccessLayer, RouteAccessMiddleware};
pub use session::SessionHandle;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
