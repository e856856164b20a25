// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route targets and route permission expansion.
//!
//! A route is turned into a permission name by joining its levels with a
//! separator. Access may be granted on any level of that name:
//!
//! ```text
//! route:      user/admin/role/index
//! permission: user_admin_role_index
//! checks:     user
//!             user_admin
//!             user_admin_role
//!             user_admin_role_index
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default separator between route levels in a permission name.
pub const DEFAULT_SEPARATOR: &str = "_";

// =============================================================================
// Expansion
// =============================================================================

/// Expands a permission name into candidates, least specific first.
///
/// Every candidate is a prefix of `permission` ending right before an
/// occurrence of `separator`; the last candidate is `permission` itself.
/// An input without separator, an empty input and an empty separator all
/// yield a single candidate equal to the input.
///
/// ```
/// use routeguard_core::route::expand;
///
/// assert_eq!(expand("app_site_index", "_"), vec!["app", "app_site", "app_site_index"]);
/// assert_eq!(expand("single", "_"), vec!["single"]);
/// ```
pub fn expand(permission: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return vec![permission.to_string()];
    }

    permission
        .match_indices(separator)
        .map(|(idx, _)| permission[..idx].to_string())
        .chain(std::iter::once(permission.to_string()))
        .collect()
}

// =============================================================================
// RouteTarget
// =============================================================================

/// The module/controller/action triple addressed by a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteTarget {
    /// Id of the module owning the controller.
    pub module_id: String,
    /// Full path of the module including parent modules. Empty for the
    /// application module.
    #[serde(default)]
    pub module_path: String,
    /// Controller id, may itself contain `/`.
    pub controller_id: String,
    /// Action id.
    pub action_id: String,
}

impl RouteTarget {
    /// Creates a route target in a top-level module.
    pub fn new(
        module_id: impl Into<String>,
        controller_id: impl Into<String>,
        action_id: impl Into<String>,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            module_path: String::new(),
            controller_id: controller_id.into(),
            action_id: action_id.into(),
        }
    }

    /// Sets the full module path.
    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    /// Derives a route target from a URI path.
    ///
    /// The last segment is the action, the one before it the controller,
    /// and anything earlier the module path. Missing parts are taken from
    /// `defaults`.
    pub fn from_path(path: &str, defaults: &RouteDefaults) -> Self {
        let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

        let action_id = match parts.len() {
            0 | 1 => defaults.action.clone(),
            _ => parts.pop().map(str::to_string).unwrap_or_default(),
        };
        let controller_id = parts
            .pop()
            .map(str::to_string)
            .unwrap_or_else(|| defaults.controller.clone());

        if parts.is_empty() {
            return Self::new(defaults.module.clone(), controller_id, action_id);
        }

        let module_path = parts.join("/");
        let module_id = parts.last().map(|s| s.to_string()).unwrap_or_default();
        Self {
            module_id,
            module_path,
            controller_id,
            action_id,
        }
    }

    /// Returns the route levels: module path (or module id), controller
    /// path, action.
    pub fn segments(&self) -> Vec<&str> {
        let module = if self.module_path.trim_matches('/').is_empty() {
            self.module_id.as_str()
        } else {
            self.module_path.as_str()
        };

        split_path(module)
            .chain(split_path(&self.controller_id))
            .chain(split_path(&self.action_id))
            .collect()
    }

    /// Builds the permission name of this route.
    pub fn permission_name(&self, separator: &str) -> String {
        self.segments().join(separator)
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments().join("/"))
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|p| !p.is_empty())
}

// =============================================================================
// RouteDefaults
// =============================================================================

/// Fallback ids used when a path does not name every route level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteDefaults {
    /// Application module id.
    pub module: String,
    /// Default controller id.
    pub controller: String,
    /// Default action id.
    pub action: String,
}

impl Default for RouteDefaults {
    fn default() -> Self {
        Self {
            module: "app".to_string(),
            controller: "site".to_string(),
            action: "index".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
