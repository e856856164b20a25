// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Parameters passed along with a permission check.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for a single permission check.
///
/// `route` switches the resolver into route mode. Everything in `values`
/// is opaque to the resolver and forwarded to the RBAC manager, where rules
/// may inspect it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckParams {
    /// Treat the permission name as a route and check each level.
    pub route: bool,
    /// Opaque values for rule evaluation.
    pub values: BTreeMap<String, Value>,
}

impl CheckParams {
    /// Creates empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates parameters with the route flag set.
    pub fn route() -> Self {
        Self {
            route: true,
            values: BTreeMap::new(),
        }
    }

    /// Adds a value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns `true` if the route flag is set.
    pub fn is_route(&self) -> bool {
        self.route
    }

    /// Returns a copy with the route flag cleared.
    pub fn without_route(&self) -> Self {
        Self {
            route: false,
            values: self.values.clone(),
        }
    }

    /// Returns `true` if there is no route flag and no values.
    pub fn is_empty(&self) -> bool {
        !self.route && self.values.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
