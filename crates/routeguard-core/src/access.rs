// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Access configuration shared by the resolver and the route gate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, GuardResult};
use crate::identity::{RootMatch, RootUserSet};
use crate::params::CheckParams;
use crate::route::DEFAULT_SEPARATOR;

/// Default name of the role checked for guests.
pub const DEFAULT_GUEST_ROLE: &str = "Guest";

/// Access configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Identifiers and/or usernames with unconditional access.
    pub root_users: BTreeSet<String>,
    /// Which identity field is matched against `root_users`.
    pub root_match: RootMatch,
    /// Add a warning flash to the session of root users.
    pub enable_root_warning_flash: bool,
    /// Separator between route levels in permission names.
    pub route_part_separator: String,
    /// Role whose permissions apply to guests.
    pub guest_role_name: String,
    /// Extra parameters passed with every route level check.
    pub route_check_params: CheckParams,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            root_users: BTreeSet::new(),
            root_match: RootMatch::default(),
            enable_root_warning_flash: true,
            route_part_separator: DEFAULT_SEPARATOR.to_string(),
            guest_role_name: DEFAULT_GUEST_ROLE.to_string(),
            route_check_params: CheckParams::default(),
        }
    }
}

impl AccessConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root user.
    pub fn with_root_user(mut self, user: impl Into<String>) -> Self {
        self.root_users.insert(user.into());
        self
    }

    /// Sets the root matching rule.
    pub fn with_root_match(mut self, root_match: RootMatch) -> Self {
        self.root_match = root_match;
        self
    }

    /// Enables or disables the root warning flash.
    pub fn with_root_warning_flash(mut self, enabled: bool) -> Self {
        self.enable_root_warning_flash = enabled;
        self
    }

    /// Sets the route part separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.route_part_separator = separator.into();
        self
    }

    /// Sets the guest role name.
    pub fn with_guest_role(mut self, role: impl Into<String>) -> Self {
        self.guest_role_name = role.into();
        self
    }

    /// Sets the extra route check parameters.
    pub fn with_route_check_params(mut self, params: CheckParams) -> Self {
        self.route_check_params = params;
        self
    }

    /// Returns the configured root users.
    pub fn root_user_set(&self) -> RootUserSet {
        RootUserSet::new(self.root_users.iter().cloned())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GuardResult<()> {
        if self.route_part_separator.is_empty() {
            return Err(GuardError::invalid_config(
                "route_part_separator",
                "separator must not be empty",
            ));
        }
        if self.route_part_separator.contains('/') {
            return Err(GuardError::invalid_config(
                "route_part_separator",
                "separator must not contain '/'",
            ));
        }
        if self.guest_role_name.trim().is_empty() {
            return Err(GuardError::invalid_config(
                "guest_role_name",
                "guest role name must not be empty",
            ));
        }
        if self.root_users.iter().any(|u| u.trim().is_empty()) {
            return Err(GuardError::invalid_config(
                "root_users",
                "root user entries must not be empty",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;

    #[test]
    fn test_defaults() {
        let config = AccessConfig::default();
        assert!(config.root_users.is_empty());
        assert!(config.enable_root_warning_flash);
        assert_eq!(config.route_part_separator, "_");
        assert_eq!(config.guest_role_name, "Guest");
        assert_eq!(config.root_match, RootMatch::Id);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_root_users_match_ids_only() {
        let config = AccessConfig::new().with_root_user("1");
        let roots = config.root_user_set();

        assert!(roots.matches(&Identity::new("1", "admin"), config.root_match));
        assert!(!roots.matches(&Identity::new("2", "1"), config.root_match));
    }

    #[test]
    fn test_validate_rejects_empty_separator() {
        let config = AccessConfig::new().with_separator("");
        assert!(matches!(
            config.validate(),
            Err(GuardError::InvalidConfig { ref field, .. }) if field == "route_part_separator"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_guest_role() {
        assert!(AccessConfig::new().with_guest_role(" ").validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AccessConfig =
            serde_json::from_str(r#"{"root_users": ["admin"], "root_match": "id"}"#).unwrap();
        assert!(config.root_user_set().contains("admin"));
        assert_eq!(config.root_match, RootMatch::Id);
        assert_eq!(config.guest_role_name, DEFAULT_GUEST_ROLE);
    }
}
