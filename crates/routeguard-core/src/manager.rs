// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The RBAC manager seam.
//!
//! Role and permission storage, rule evaluation and hierarchy traversal are
//! owned by an external manager. The resolver only needs the two queries
//! defined by [`AuthManager`].

use serde::{Deserialize, Serialize};

use crate::error::GuardResult;
use crate::identity::Identity;
use crate::params::CheckParams;

// =============================================================================
// ItemChild
// =============================================================================

/// A direct child of a role or permission in the RBAC hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemChild {
    /// Child item name.
    pub name: String,
    /// Rule guarding the child, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
}

impl ItemChild {
    /// Creates a child without a rule.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule_name: None,
        }
    }

    /// Creates a child guarded by a rule.
    pub fn with_rule(name: impl Into<String>, rule_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule_name: Some(rule_name.into()),
        }
    }

    /// Returns `true` if the child is guarded by a rule.
    pub fn is_rule_gated(&self) -> bool {
        self.rule_name.is_some()
    }
}

// =============================================================================
// AuthManager
// =============================================================================

/// Queries the resolver needs from an RBAC manager.
///
/// Implementations are called synchronously on the request path. Errors are
/// reserved for failures of the manager itself; a missing permission or
/// role is `Ok(false)` or an empty child list.
pub trait AuthManager: Send + Sync {
    /// Checks whether `identity` holds `permission`.
    ///
    /// `allow_caching` is a hint the manager may use to memoize the result
    /// for parameterless checks.
    fn check_access(
        &self,
        identity: &Identity,
        permission: &str,
        params: &CheckParams,
        allow_caching: bool,
    ) -> GuardResult<bool>;

    /// Returns the direct children of a role or permission, in order.
    fn children(&self, name: &str) -> GuardResult<Vec<ItemChild>>;
}

// =============================================================================
// Tests
// =============================================================================
