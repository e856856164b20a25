// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory RBAC manager.
//!
//! Holds roles, permissions, parent/child edges, user assignments and rule
//! implementations in plain maps. It is built once (usually from
//! configuration) and shared read-only across requests; only the access
//! cache is mutated afterwards.
//!
//! # Example
//!
//! ```
//! use routeguard_core::{AuthManager, CheckParams, Identity, InMemoryAuthManager};
//!
//! let manager = InMemoryAuthManager::builder()
//!     .role("editor")
//!     .permission("app_post")
//!     .child("editor", "app_post")
//!     .assign("7", "editor")
//!     .build();
//!
//! let alice = Identity::new("7", "alice");
//! assert!(manager.check_access(&alice, "app_post", &CheckParams::new(), true).unwrap());
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GuardError, GuardResult};
use crate::identity::Identity;
use crate::manager::{AuthManager, ItemChild};
use crate::params::CheckParams;

/// Default bound of the access cache.
pub const DEFAULT_ACCESS_CACHE_CAPACITY: usize = 10_000;

// =============================================================================
// Items and Rules
// =============================================================================

/// Kind of an RBAC item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A role, assignable to users.
    Role,
    /// A permission.
    Permission,
}

impl ItemKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Role => "role",
            ItemKind::Permission => "permission",
        }
    }
}

/// A role or permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Item name.
    pub name: String,
    /// Item kind.
    pub kind: ItemKind,
    /// Rule that must pass for the item to apply.
    pub rule_name: Option<String>,
}

impl Item {
    /// Creates a role.
    pub fn role(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Role,
            rule_name: None,
        }
    }

    /// Creates a permission.
    pub fn permission(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Permission,
            rule_name: None,
        }
    }

    /// Attaches a rule.
    pub fn with_rule(mut self, rule_name: impl Into<String>) -> Self {
        self.rule_name = Some(rule_name.into());
        self
    }
}

/// An identity-scoped predicate attached to an item.
pub trait Rule: Send + Sync {
    /// Returns `true` if the item applies to `identity` with `params`.
    fn execute(&self, identity: &Identity, item: &str, params: &CheckParams) -> bool;
}

impl<F> Rule for F
where
    F: Fn(&Identity, &str, &CheckParams) -> bool + Send + Sync,
{
    fn execute(&self, identity: &Identity, item: &str, params: &CheckParams) -> bool {
        self(identity, item, params)
    }
}

// =============================================================================
// InMemoryAuthManager
// =============================================================================

/// RBAC manager backed by in-memory maps.
pub struct InMemoryAuthManager {
    items: HashMap<String, Item>,
    children: HashMap<String, Vec<String>>,
    parents: HashMap<String, Vec<String>>,
    assignments: HashMap<String, HashSet<String>>,
    rules: HashMap<String, Arc<dyn Rule>>,
    /// Results of parameterless checks keyed by (user id, permission).
    access_cache: RwLock<HashMap<(String, String), bool>>,
    cache_capacity: usize,
}

impl InMemoryAuthManager {
    /// Creates a builder.
    pub fn builder() -> InMemoryAuthManagerBuilder {
        InMemoryAuthManagerBuilder::new()
    }

    /// Returns an item by name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Returns all items.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Returns the items directly assigned to a user.
    pub fn assignments(&self, user_id: &str) -> Vec<&str> {
        let mut assigned: Vec<&str> = self
            .assignments
            .get(user_id)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        assigned.sort_unstable();
        assigned
    }

    /// Returns the number of memoized access checks.
    pub fn cached_checks(&self) -> usize {
        self.access_cache.read().len()
    }

    /// Drops all memoized access checks.
    pub fn clear_access_cache(&self) {
        self.access_cache.write().clear();
    }

    /// Returns the maximum number of memoized access checks.
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    fn remember(&self, key: (String, String), granted: bool) {
        if self.cache_capacity == 0 {
            return;
        }
        let mut cache = self.access_cache.write();
        if cache.len() >= self.cache_capacity && !cache.contains_key(&key) {
            debug!(capacity = self.cache_capacity, "Access cache full, clearing");
            cache.clear();
        }
        cache.insert(key, granted);
    }

    fn rule_passes(&self, identity: &Identity, item: &Item, params: &CheckParams) -> GuardResult<bool> {
        let Some(rule_name) = item.rule_name.as_deref() else {
            return Ok(true);
        };
        let rule = self
            .rules
            .get(rule_name)
            .ok_or_else(|| GuardError::rule_not_found(rule_name, &item.name))?;
        Ok(rule.execute(identity, &item.name, params))
    }

    /// Walks from `permission` towards the roots until an item assigned to
    /// the identity is reached.
    fn check_hierarchy(
        &self,
        identity: &Identity,
        permission: &str,
        params: &CheckParams,
    ) -> GuardResult<bool> {
        let Some(assigned) = self.assignments.get(&identity.id) else {
            return Ok(false);
        };

        let mut stack = vec![permission.to_string()];
        let mut visited = HashSet::new();

        while let Some(name) = stack.pop() {
            if !visited.insert(name.clone()) {
                continue;
            }
            let Some(item) = self.items.get(&name) else {
                continue;
            };
            if !self.rule_passes(identity, item, params)? {
                continue;
            }
            if assigned.contains(&name) {
                return Ok(true);
            }
            if let Some(parents) = self.parents.get(&name) {
                stack.extend(parents.iter().cloned());
            }
        }

        Ok(false)
    }
}

impl AuthManager for InMemoryAuthManager {
    fn check_access(
        &self,
        identity: &Identity,
        permission: &str,
        params: &CheckParams,
        allow_caching: bool,
    ) -> GuardResult<bool> {
        // Names that are not items can never be granted.
        if !self.items.contains_key(permission) {
            return Ok(false);
        }

        let cacheable = allow_caching && params.is_empty();
        let key = (identity.id.clone(), permission.to_string());

        if cacheable {
            if let Some(granted) = self.access_cache.read().get(&key) {
                return Ok(*granted);
            }
        }

        let granted = self.check_hierarchy(identity, permission, params)?;

        if cacheable {
            self.remember(key, granted);
        }

        Ok(granted)
    }

    fn children(&self, name: &str) -> GuardResult<Vec<ItemChild>> {
        let children = self
            .children
            .get(name)
            .map(|names| {
                names
                    .iter()
                    .map(|child| ItemChild {
                        name: child.clone(),
                        rule_name: self.items.get(child).and_then(|i| i.rule_name.clone()),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(children)
    }
}

impl fmt::Debug for InMemoryAuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryAuthManager")
            .field("items", &self.items.len())
            .field("edges", &self.children.values().map(Vec::len).sum::<usize>())
            .field("users", &self.assignments.len())
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`InMemoryAuthManager`].
#[derive(Default)]
pub struct InMemoryAuthManagerBuilder {
    items: HashMap<String, Item>,
    edges: Vec<(String, String)>,
    assignments: Vec<(String, String)>,
    rules: HashMap<String, Arc<dyn Rule>>,
    cache_capacity: Option<usize>,
}

impl InMemoryAuthManagerBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, replacing any item with the same name.
    pub fn item(mut self, item: Item) -> Self {
        self.items.insert(item.name.clone(), item);
        self
    }

    /// Adds a role.
    pub fn role(self, name: impl Into<String>) -> Self {
        self.item(Item::role(name))
    }

    /// Adds a permission.
    pub fn permission(self, name: impl Into<String>) -> Self {
        self.item(Item::permission(name))
    }

    /// Adds a permission guarded by a rule.
    pub fn permission_with_rule(self, name: impl Into<String>, rule_name: impl Into<String>) -> Self {
        self.item(Item::permission(name).with_rule(rule_name))
    }

    /// Adds a parent/child edge.
    pub fn child(mut self, parent: impl Into<String>, child: impl Into<String>) -> Self {
        let edge = (parent.into(), child.into());
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
        self
    }

    /// Assigns an item to a user id.
    pub fn assign(mut self, user_id: impl Into<String>, item: impl Into<String>) -> Self {
        self.assignments.push((user_id.into(), item.into()));
        self
    }

    /// Registers a rule implementation.
    pub fn rule(mut self, name: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.rules.insert(name.into(), Arc::new(rule));
        self
    }

    /// Bounds the access cache; `0` disables it.
    ///
    /// When the bound is reached the cache is cleared before the next insert.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Builds the manager.
    pub fn build(self) -> InMemoryAuthManager {
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut parents: HashMap<String, Vec<String>> = HashMap::new();

        for (parent, child) in self.edges {
            parents.entry(child.clone()).or_default().push(parent.clone());
            children.entry(parent).or_default().push(child);
        }

        let mut assignments: HashMap<String, HashSet<String>> = HashMap::new();
        for (user_id, item) in self.assignments {
            assignments.entry(user_id).or_default().insert(item);
        }

        InMemoryAuthManager {
            items: self.items,
            children,
            parents,
            assignments,
            rules: self.rules,
            access_cache: RwLock::new(HashMap::new()),
            cache_capacity: self.cache_capacity.unwrap_or(DEFAULT_ACCESS_CACHE_CAPACITY),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
