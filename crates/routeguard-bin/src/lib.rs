// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # routeguard-bin
//!
//! Command-line front end for routeguard.
//!
//! - CLI argument parsing with clap
//! - Logging initialization
//! - Command implementations (check, expand, validate, version)
//!
//! ## Usage
//!
//! ```bash
//! # Check a route as a guest
//! routeguard check site/login
//!
//! # Check a route for a configured user, JSON output
//! routeguard -c /etc/routeguard/config.yaml check blog/post/update -u alice -f json
//!
//! # Show permission candidates
//! routeguard expand user_admin_role_index
//!
//! # Validate configuration
//! routeguard validate --strict
//! ```
//!
//! `check` exits with 0 when access is granted and 10 when it is denied.

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
