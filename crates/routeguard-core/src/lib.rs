// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # routeguard-core
//!
//! Route-based access control on top of a role-based access control (RBAC)
//! manager.
//!
//! This crate provides:
//!
//! - **Route**: Route targets and route permission expansion
//! - **Resolver**: Permission resolution for root users, users and guests
//! - **Gate**: The access gate invoked before each action
//! - **Closure**: Memoized permission closures of roles
//! - **Manager**: The RBAC manager seam and an in-memory implementation
//! - **Flash**: Session flash messages and the root user warning
//! - **Error**: Unified error type
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use routeguard_core::prelude::*;
//!
//! let manager = Arc::new(
//!     InMemoryAuthManager::builder()
//!         .role("Guest")
//!         .permission("app_site")
//!         .child("Guest", "app_site")
//!         .build(),
//! );
//!
//! let config = AccessConfig::default();
//! let resolver = Arc::new(PermissionResolver::new(manager, &config));
//! let gate = RouteAccessGate::new(resolver, &config);
//!
//! assert!(gate.check_action("app", "site", "login", &Caller::guest()).unwrap());
//! assert!(!gate.check_action("app", "post", "index", &Caller::guest()).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Core Modules
// =============================================================================

pub mod access;
pub mod error;
pub mod identity;
pub mod params;

// =============================================================================
// RBAC Modules
// =============================================================================

pub mod closure;
pub mod manager;
pub mod memory;

// =============================================================================
// Access Control Modules
// =============================================================================

pub mod flash;
pub mod gate;
pub mod resolver;
pub mod route;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use access::{AccessConfig, DEFAULT_GUEST_ROLE};
pub use closure::{compute_closure, PermissionClosure, RoleClosureCache};
pub use error::{GuardError, GuardResult};
pub use flash::{FlashStore, MemorySession, RootWarning, ROOT_WARNING_MESSAGE, WARNING_FLASH_KEY};
pub use gate::RouteAccessGate;
pub use identity::{Identity, RootMatch, RootUserSet};
pub use manager::{AuthManager, ItemChild};
pub use memory::{
    InMemoryAuthManager, InMemoryAuthManagerBuilder, Item, ItemKind, Rule,
    DEFAULT_ACCESS_CACHE_CAPACITY,
};
pub use params::CheckParams;
pub use resolver::{Caller, PermissionResolver};
pub use route::{expand, RouteDefaults, RouteTarget, DEFAULT_SEPARATOR};

/// Commonly used types.
pub mod prelude {
    pub use crate::access::AccessConfig;
    pub use crate::error::{GuardError, GuardResult};
    pub use crate::flash::{FlashStore, MemorySession};
    pub use crate::gate::RouteAccessGate;
    pub use crate::identity::Identity;
    pub use crate::manager::{AuthManager, ItemChild};
    pub use crate::memory::InMemoryAuthManager;
    pub use crate::params::CheckParams;
    pub use crate::resolver::{Caller, PermissionResolver};
    pub use crate::route::{RouteDefaults, RouteTarget};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
