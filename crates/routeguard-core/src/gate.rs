// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The route access gate invoked before each action.

use std::sync::Arc;

use tracing::debug;

use crate::access::AccessConfig;
use crate::error::GuardResult;
use crate::params::CheckParams;
use crate::resolver::{Caller, PermissionResolver};
use crate::route::{expand, RouteTarget};

/// Grants a route if any of its levels is granted.
#[derive(Debug)]
pub struct RouteAccessGate {
    resolver: Arc<PermissionResolver>,
    separator: String,
    params: CheckParams,
}

impl RouteAccessGate {
    /// Creates a gate over `resolver`.
    pub fn new(resolver: Arc<PermissionResolver>, config: &AccessConfig) -> Self {
        Self {
            resolver,
            separator: config.route_part_separator.clone(),
            params: config.route_check_params.without_route(),
        }
    }

    /// Returns the permission candidates of `route`, least specific first.
    pub fn candidates(&self, route: &RouteTarget) -> Vec<String> {
        expand(&route.permission_name(&self.separator), &self.separator)
    }

    /// Checks whether `caller` may run `route`.
    ///
    /// Candidates are resolved as plain checks; errors from the RBAC manager
    /// propagate unchanged.
    pub fn check(&self, route: &RouteTarget, caller: &Caller<'_>) -> GuardResult<bool> {
        for candidate in self.candidates(route) {
            if self.resolver.resolve(caller, &candidate, &self.params, true)? {
                debug!(route = %route, candidate = %candidate, "Route access granted");
                return Ok(true);
            }
        }

        debug!(route = %route, guest = caller.is_guest(), "Route access denied");
        Ok(false)
    }

    /// Checks an action addressed by its ids in a top-level module.
    pub fn check_action(
        &self,
        module_id: &str,
        controller_id: &str,
        action_id: &str,
        caller: &Caller<'_>,
    ) -> GuardResult<bool> {
        self.check(&RouteTarget::new(module_id, controller_id, action_id), caller)
    }

    /// Returns the resolver.
    pub fn resolver(&self) -> &Arc<PermissionResolver> {
        &self.resolver
    }

    /// Returns the route part separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }
}
