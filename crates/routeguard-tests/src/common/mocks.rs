// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! Auth managers for testing the resolver in isolation:
//!
//! - [`CountingAuthManager`] delegates and records every call
//! - [`FailingAuthManager`] reports the manager as unavailable

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use routeguard_core::{AuthManager, CheckParams, GuardError, GuardResult, Identity, ItemChild};

// =============================================================================
// Counting Auth Manager
// =============================================================================

/// A recorded `check_access` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCheck {
    /// Identity id.
    pub user_id: String,
    /// Checked permission.
    pub permission: String,
    /// Forwarded parameters.
    pub params: CheckParams,
    /// Forwarded caching hint.
    pub allow_caching: bool,
}

/// Delegating manager that records calls for verification.
pub struct CountingAuthManager {
    inner: Arc<dyn AuthManager>,
    checks: Mutex<Vec<RecordedCheck>>,
    children_calls: AtomicUsize,
}

impl CountingAuthManager {
    /// Wraps `inner`.
    pub fn new(inner: Arc<dyn AuthManager>) -> Self {
        Self {
            inner,
            checks: Mutex::new(Vec::new()),
            children_calls: AtomicUsize::new(0),
        }
    }

    /// Returns the recorded `check_access` calls.
    pub fn checks(&self) -> Vec<RecordedCheck> {
        self.checks.lock().clone()
    }

    /// Returns the permissions passed to `check_access`, in call order.
    pub fn checked_permissions(&self) -> Vec<String> {
        self.checks.lock().iter().map(|c| c.permission.clone()).collect()
    }

    /// Number of `children` calls.
    pub fn children_calls(&self) -> usize {
        self.children_calls.load(Ordering::SeqCst)
    }

    /// Forgets all recorded calls.
    pub fn reset(&self) {
        self.checks.lock().clear();
        self.children_calls.store(0, Ordering::SeqCst);
    }
}

impl AuthManager for CountingAuthManager {
    fn check_access(
        &self,
        identity: &Identity,
        permission: &str,
        params: &CheckParams,
        allow_caching: bool,
    ) -> GuardResult<bool> {
        self.checks.lock().push(RecordedCheck {
            user_id: identity.id.clone(),
            permission: permission.to_string(),
            params: params.clone(),
            allow_caching,
        });
        self.inner.check_access(identity, permission, params, allow_caching)
    }

    fn children(&self, name: &str) -> GuardResult<Vec<ItemChild>> {
        self.children_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.children(name)
    }
}

// =============================================================================
// Failing Auth Manager
// =============================================================================

/// Manager whose calls fail while `failing` is set.
#[derive(Debug)]
pub struct FailingAuthManager {
    failing: AtomicBool,
    message: String,
}

impl FailingAuthManager {
    /// Creates a manager that fails until [`recover`](Self::recover) is called.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            failing: AtomicBool::new(true),
            message: message.into(),
        }
    }

    /// Makes subsequent calls succeed with empty answers.
    pub fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }

    fn fail(&self) -> GuardResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(GuardError::manager_unavailable(self.message.clone()))
        } else {
            Ok(())
        }
    }
}

impl AuthManager for FailingAuthManager {
    fn check_access(
        &self,
        _identity: &Identity,
        _permission: &str,
        _params: &CheckParams,
        _allow_caching: bool,
    ) -> GuardResult<bool> {
        self.fail()?;
        Ok(false)
    }

    fn children(&self, _name: &str) -> GuardResult<Vec<ItemChild>> {
        self.fail()?;
        Ok(Vec::new())
    }
}
