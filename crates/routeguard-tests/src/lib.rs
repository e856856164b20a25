// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # routeguard Integration Tests
//!
//! Integration tests across the routeguard crates, plus the fixtures and
//! mock managers they share.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Pre-built hierarchies, identities and configuration files
//!   - `mocks`: Auth managers that count calls or fail on demand
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p routeguard-tests
//!
//! # Run specific test suite
//! cargo test -p routeguard-tests --test integration_core
//! cargo test -p routeguard-tests --test integration_config
//! cargo test -p routeguard-tests --test integration_api
//! ```
//!
//! ## Test Categories
//!
//! ### Core Tests (`integration_core.rs`)
//! - Route expansion and the route gate end to end
//! - Guest closures over rule-gated and cyclic hierarchies
//! - Root bypass and the warning flash
//! - Manager failures and caching hints
//!
//! ### Config Tests (`integration_config.rs`)
//! - Configuration parsing (YAML, TOML, JSON)
//! - Validation rules and warnings
//! - Environment variable overrides
//!
//! ### API Tests (`integration_api.rs`)
//! - Middleware decisions on an axum router
//! - Login required vs. forbidden responses
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use routeguard_tests::prelude::*;
//!
//! #[test]
//! fn test_something() {
//!     let gate = GateFixtures::blog_gate(AccessFixtures::with_root());
//!     let alice = IdentityFixtures::editor();
//!     // ... test logic
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::fixtures::*;
    pub use crate::common::mocks::*;
    pub use crate::common::init_test_logging;
}
