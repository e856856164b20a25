// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Permission resolution for root users, authenticated users and guests.
//!
//! # Decision Order
//!
//! The first matching branch decides:
//!
//! 1. Root users are always granted. The root warning flash is added to
//!    their session.
//! 2. Route checks (`params.route`) grant if any level of the route grants.
//!    Levels are checked with plain checks only.
//! 3. Authenticated users are checked by the RBAC manager.
//! 4. Guests are checked against the closure of the guest role.

use std::sync::Arc;

use tracing::trace;

use crate::access::AccessConfig;
use crate::closure::RoleClosureCache;
use crate::error::GuardResult;
use crate::flash::{FlashStore, RootWarning};
use crate::identity::{Identity, RootMatch, RootUserSet};
use crate::manager::AuthManager;
use crate::params::CheckParams;
use crate::route::expand;

// =============================================================================
// Caller
// =============================================================================

/// Request-scoped inputs of a permission check.
#[derive(Clone, Copy, Default)]
pub struct Caller<'a> {
    /// The authenticated identity, `None` for guests.
    pub identity: Option<&'a Identity>,
    /// Session of the request, if any.
    pub session: Option<&'a dyn FlashStore>,
    /// Background (XHR) request, no flash messages.
    pub background: bool,
}

impl<'a> Caller<'a> {
    /// Creates a guest caller.
    pub fn guest() -> Self {
        Self::default()
    }

    /// Creates an authenticated caller.
    pub fn user(identity: &'a Identity) -> Self {
        Self {
            identity: Some(identity),
            ..Self::default()
        }
    }

    /// Creates a caller from an optional identity.
    pub fn from_identity(identity: Option<&'a Identity>) -> Self {
        Self {
            identity,
            ..Self::default()
        }
    }

    /// Attaches the request session.
    pub fn with_session(mut self, session: &'a dyn FlashStore) -> Self {
        self.session = Some(session);
        self
    }

    /// Marks the request as a background request.
    pub fn in_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// Returns `true` if there is no authenticated identity.
    pub fn is_guest(&self) -> bool {
        self.identity.is_none()
    }
}

impl std::fmt::Debug for Caller<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Caller")
            .field("identity", &self.identity)
            .field("session", &self.session.is_some())
            .field("background", &self.background)
            .finish()
    }
}

// =============================================================================
// PermissionResolver
// =============================================================================

/// Decides single permission checks.
pub struct PermissionResolver {
    manager: Arc<dyn AuthManager>,
    closures: RoleClosureCache,
    root_users: RootUserSet,
    root_match: RootMatch,
    warning: RootWarning,
    separator: String,
    guest_role: String,
}

impl PermissionResolver {
    /// Creates a resolver over `manager`.
    pub fn new(manager: Arc<dyn AuthManager>, config: &AccessConfig) -> Self {
        Self {
            closures: RoleClosureCache::new(manager.clone()),
            manager,
            root_users: config.root_user_set(),
            root_match: config.root_match,
            warning: RootWarning::new(config.enable_root_warning_flash),
            separator: config.route_part_separator.clone(),
            guest_role: config.guest_role_name.clone(),
        }
    }

    /// Replaces the root warning.
    pub fn with_root_warning(mut self, warning: RootWarning) -> Self {
        self.warning = warning;
        self
    }

    /// Checks `permission` for `caller`.
    pub fn resolve(
        &self,
        caller: &Caller<'_>,
        permission: &str,
        params: &CheckParams,
        allow_caching: bool,
    ) -> GuardResult<bool> {
        if self.is_root(caller) {
            self.warning.notify(caller.session, caller.background);
            return Ok(true);
        }

        if params.is_route() {
            let inner = params.without_route();
            let granted = self.resolve_route(caller, permission, &inner, allow_caching)?;
            trace!(permission, granted, "Checked route permissions");
            return Ok(granted);
        }

        self.resolve_plain(caller, permission, params, allow_caching)
    }

    /// Returns `true` if the caller is a root user.
    pub fn is_root(&self, caller: &Caller<'_>) -> bool {
        caller
            .identity
            .is_some_and(|identity| self.root_users.matches(identity, self.root_match))
    }

    /// Checks `permission` against the guest role closure.
    pub fn can_guest(&self, permission: &str) -> GuardResult<bool> {
        Ok(self.closures.closure_for(&self.guest_role)?.contains(permission))
    }

    /// Returns the role closure cache.
    pub fn closures(&self) -> &RoleClosureCache {
        &self.closures
    }

    /// Returns the route part separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the guest role name.
    pub fn guest_role(&self) -> &str {
        &self.guest_role
    }

    fn resolve_route(
        &self,
        caller: &Caller<'_>,
        permission: &str,
        params: &CheckParams,
        allow_caching: bool,
    ) -> GuardResult<bool> {
        for candidate in expand(permission, &self.separator) {
            if self.resolve_plain(caller, &candidate, params, allow_caching)? {
                trace!(permission, candidate = %candidate, "Route level granted");
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn resolve_plain(
        &self,
        caller: &Caller<'_>,
        permission: &str,
        params: &CheckParams,
        allow_caching: bool,
    ) -> GuardResult<bool> {
        match caller.identity {
            Some(identity) => {
                self.manager
                    .check_access(identity, permission, params, allow_caching)
            }
            None => self.can_guest(permission),
        }
    }
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver")
            .field("root_users", &self.root_users.len())
            .field("root_match", &self.root_match)
            .field("separator", &self.separator)
            .field("guest_role", &self.guest_role)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flash::{MemorySession, WARNING_FLASH_KEY};
    use crate::memory::InMemoryAuthManager;

    fn manager() -> Arc<InMemoryAuthManager> {
        Arc::new(
            InMemoryAuthManager::builder()
                .role("Guest")
                .role("editor")
                .permission("app_site")
                .permission("app_post")
                .permission_with_rule("app_post_update", "never")
                .child("Guest", "app_site")
                .child("Guest", "app_post_update")
                .child("editor", "app_post")
                .assign("7", "editor")
                .rule("never", |_: &Identity, _: &str, _: &CheckParams| false)
                .build(),
        )
    }

    fn resolver(config: &AccessConfig) -> PermissionResolver {
        PermissionResolver::new(manager(), config)
    }

    #[test]
    fn test_root_bypass() {
        let resolver = resolver(&AccessConfig::new().with_root_user("1"));
        let admin = Identity::new("1", "admin");

        assert!(resolver
            .resolve(&Caller::user(&admin), "anything_at_all", &CheckParams::new(), true)
            .unwrap());
    }

    #[test]
    fn test_root_bypass_adds_flash_once() {
        let resolver = resolver(&AccessConfig::new().with_root_user("1"));
        let admin = Identity::new("1", "admin");
        let session = MemorySession::new();
        let caller = Caller::user(&admin).with_session(&session);

        for _ in 0..3 {
            assert!(resolver.resolve(&caller, "x", &CheckParams::new(), true).unwrap());
        }
        assert_eq!(session.flashes(WARNING_FLASH_KEY).len(), 1);
    }

    #[test]
    fn test_guest_closure_check() {
        let resolver = resolver(&AccessConfig::new());
        let guest = Caller::guest();

        assert!(resolver.resolve(&guest, "app_site", &CheckParams::new(), true).unwrap());
        assert!(!resolver.resolve(&guest, "app_site_index", &CheckParams::new(), true).unwrap());
        assert!(!resolver.resolve(&guest, "app_post_update", &CheckParams::new(), true).unwrap());
    }

    #[test]
    fn test_guest_route_mode() {
        let resolver = resolver(&AccessConfig::new());
        let guest = Caller::guest();

        assert!(resolver
            .resolve(&guest, "app_site_index", &CheckParams::route(), true)
            .unwrap());
        assert!(!resolver
            .resolve(&guest, "app_post_index", &CheckParams::route(), true)
            .unwrap());
    }

    #[test]
    fn test_user_plain_and_route() {
        let resolver = resolver(&AccessConfig::new());
        let editor = Identity::new("7", "editor");
        let caller = Caller::user(&editor);

        assert!(resolver.resolve(&caller, "app_post", &CheckParams::new(), true).unwrap());
        assert!(!resolver.resolve(&caller, "app_post_view", &CheckParams::new(), true).unwrap());
        assert!(resolver
            .resolve(&caller, "app_post_view", &CheckParams::route(), true)
            .unwrap());
    }

    #[test]
    fn test_user_not_checked_against_guest_role() {
        let resolver = resolver(&AccessConfig::new());
        let editor = Identity::new("7", "editor");

        assert!(!resolver
            .resolve(&Caller::user(&editor), "app_site", &CheckParams::new(), true)
            .unwrap());
    }

    #[test]
    fn test_custom_guest_role_and_separator() {
        let manager = Arc::new(
            InMemoryAuthManager::builder()
                .role("Public")
                .permission("app.site")
                .child("Public", "app.site")
                .build(),
        );
        let config = AccessConfig::new().with_guest_role("Public").with_separator(".");
        let resolver = PermissionResolver::new(manager, &config);

        assert!(resolver
            .resolve(&Caller::guest(), "app.site.index", &CheckParams::route(), true)
            .unwrap());
        assert_eq!(resolver.separator(), ".");
        assert_eq!(resolver.guest_role(), "Public");
    }

    #[test]
    fn test_username_equal_to_root_id_is_not_root() {
        let resolver = resolver(&AccessConfig::new().with_root_user("1"));
        let squatter = Identity::new("2", "1");

        assert!(!resolver.is_root(&Caller::user(&squatter)));
        assert!(!resolver
            .resolve(&Caller::user(&squatter), "anything_at_all", &CheckParams::new(), true)
            .unwrap());
    }

    #[test]
    fn test_root_match_id_only() {
        let config = AccessConfig::new()
            .with_root_user("admin")
            .with_root_match(RootMatch::Id);
        let resolver = resolver(&config);
        let admin = Identity::new("1", "admin");

        assert!(!resolver.is_root(&Caller::user(&admin)));
        assert!(!resolver.is_root(&Caller::guest()));
    }
}
