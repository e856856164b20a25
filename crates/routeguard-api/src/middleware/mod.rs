// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the host application.
//!
//! - [`RouteAccessLayer`]: Route access gate run before each request

mod route_access;

pub use route_access::{is_background_request, RouteAccessLayer, RouteAccessMiddleware};
