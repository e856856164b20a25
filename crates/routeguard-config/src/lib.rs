// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # routeguard-config
//!
//! Configuration management for routeguard.
//!
//! ## Features
//!
//! - **Schema Definition**: Access settings, RBAC seed data and logging
//! - **Multi-Format Support**: YAML, TOML, and JSON configuration files
//! - **Environment Overrides**: Override access settings via environment variables
//!
//! ## Quick Start
//!
//! ```no_run
//! use routeguard_config::loader::load_config;
//!
//! let config = load_config("routeguard.yaml").unwrap();
//!
//! println!("Guest role: {}", config.access.guest_role_name);
//! println!("Users: {}", config.rbac.users.len());
//! ```
//!
//! ## Configuration Schema
//!
//! ```yaml
//! access:
//!   root_users: ["1"]
//!   root_match: id
//!   enable_root_warning_flash: true
//!   route_part_separator: "_"
//!   guest_role_name: Guest
//!
//! rbac:
//!   items:
//!     - { name: Guest, kind: role }
//!     - { name: app_site }
//!   children:
//!     - { parent: Guest, child: app_site }
//!   users:
//!     - { id: "1", username: admin, roles: [] }
//!
//! logging:
//!   level: info
//!   format: text
//! ```
//!
//! ## Environment Variables
//!
//! ```text
//! ROUTEGUARD_ROOT_USERS=admin,42
//! ROUTEGUARD_GUEST_ROLE_NAME=Public
//! ROUTEGUARD_LOG_LEVEL=debug
//! ```
//!
//! Values in config files can reference environment variables:
//!
//! ```yaml
//! access:
//!   guest_role_name: "${GUEST_ROLE:Guest}"
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod loader;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    load_config, load_config_str, ConfigFormat, ConfigLoader, ConfigLoaderBuilder,
    DEFAULT_ENV_PREFIX,
};
pub use schema::{
    ChildConfig, GuardConfig, ItemConfig, LogFormat, LogLevel, LoggingConfig, RbacConfig,
    UserConfig,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// =============================================================================
// Prelude
// =============================================================================

/// Convenience re-exports for common use cases.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::loader::{load_config, ConfigLoader};
    pub use crate::schema::{GuardConfig, RbacConfig, UserConfig};
}

// =============================================================================
// Tests
// =============================================================================
