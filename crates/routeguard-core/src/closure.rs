// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Memoized permission closures of roles.
//!
//! A closure is the set of item names reachable from a role through
//! children that carry no rule. Rule-gated children are skipped together
//! with everything below them, since a rule cannot be evaluated without an
//! identity.
//!
//! Closures are computed once per role and kept for the lifetime of the
//! cache. Each role has its own compute-once cell, so concurrent first
//! lookups of the same role run the traversal only once.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::{GuardError, GuardResult};
use crate::manager::AuthManager;

/// Set of item names reachable from a role.
pub type PermissionClosure = HashSet<String>;

type ClosureCell = Arc<OnceCell<Arc<PermissionClosure>>>;

// =============================================================================
// RoleClosureCache
// =============================================================================

/// Lazily computed, process-lifetime cache of role closures.
pub struct RoleClosureCache {
    manager: Arc<dyn AuthManager>,
    cells: Mutex<HashMap<String, ClosureCell>>,
}

impl RoleClosureCache {
    /// Creates an empty cache over the given manager.
    pub fn new(manager: Arc<dyn AuthManager>) -> Self {
        Self {
            manager,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the closure of `role`, computing it on first use.
    ///
    /// A failed computation is not cached; the next call retries.
    pub fn closure_for(&self, role: &str) -> GuardResult<Arc<PermissionClosure>> {
        let cell = {
            let mut cells = self.cells.lock();
            cells.entry(role.to_string()).or_default().clone()
        };

        cell.get_or_try_init(|| {
            debug!(role, "Fetching role closure from auth manager");
            let closure = compute_closure(self.manager.as_ref(), role)?;
            debug!(role, size = closure.len(), "Role closure cached");
            Ok::<_, GuardError>(Arc::new(closure))
        })
        .cloned()
    }

    /// Returns `true` if the closure of `role` has been computed.
    pub fn is_cached(&self, role: &str) -> bool {
        self.cells
            .lock()
            .get(role)
            .is_some_and(|cell| cell.get().is_some())
    }

    /// Drops every cached closure.
    pub fn clear(&self) {
        self.cells.lock().clear();
    }
}

impl std::fmt::Debug for RoleClosureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleClosureCache")
            .field("roles", &self.cells.lock().keys().cloned().collect::<Vec<_>>())
            .finish()
    }
}

/// Traverses the hierarchy below `role` with an explicit stack.
///
/// The visited set makes the walk terminate on cyclic hierarchies.
pub fn compute_closure(manager: &dyn AuthManager, role: &str) -> GuardResult<PermissionClosure> {
    let mut closure = PermissionClosure::new();
    let mut visited = HashSet::from([role.to_string()]);
    let mut stack = vec![role.to_string()];

    while let Some(name) = stack.pop() {
        for child in manager.children(&name)? {
            if child.is_rule_gated() {
                trace!(parent = %name, child = %child.name, "Skipping rule-gated child");
                continue;
            }
            closure.insert(child.name.clone());
            if visited.insert(child.name.clone()) {
                stack.push(child.name);
            }
        }
    }

    Ok(closure)
}

// =============================================================================
// Tests
// =============================================================================
