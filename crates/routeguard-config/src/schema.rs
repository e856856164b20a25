// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema definitions for routeguard.
//!
//! # Schema Structure
//!
//! ```text
//! GuardConfig
//! ├── access: AccessConfig
//! ├── rbac: RbacConfig
//! │   ├── items: Vec<ItemConfig>
//! │   ├── children: Vec<ChildConfig>
//! │   └── users: Vec<UserConfig>
//! └── logging: LoggingConfig
//! ```
//!
//! RBAC entries are lists rather than maps so that item and user names keep
//! their case through every configuration format.

use std::collections::HashSet;

use routeguard_core::memory::{InMemoryAuthManager, InMemoryAuthManagerBuilder, Item, ItemKind};
use routeguard_core::{AccessConfig, Identity, RootUserSet};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure for routeguard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Access control settings.
    pub access: AccessConfig,

    /// RBAC seed data for the in-memory manager.
    pub rbac: RbacConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl GuardConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.access.validate()?;
        self.rbac.validate()?;
        Ok(())
    }

    /// Returns non-fatal findings about the configuration.
    ///
    /// - the guest role is not defined as an item
    /// - a root user entry matches no configured user
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.rbac.items.is_empty() && self.rbac.item(&self.access.guest_role_name).is_none() {
            warnings.push(format!(
                "guest role '{}' is not defined, guests will be denied everywhere",
                self.access.guest_role_name
            ));
        }

        for entry in &self.access.root_users {
            let single = RootUserSet::new([entry.as_str()]);
            let known = self
                .rbac
                .users
                .iter()
                .any(|u| single.matches(&u.identity(), self.access.root_match));
            if !known {
                warnings.push(format!(
                    "root user '{}' matches no configured user ({} matching)",
                    entry,
                    self.access.root_match.as_str()
                ));
            }
        }

        warnings
    }
}

// =============================================================================
// RBAC Configuration
// =============================================================================

/// Roles, permissions, hierarchy and assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RbacConfig {
    /// Role and permission definitions.
    pub items: Vec<ItemConfig>,

    /// Parent/child edges.
    pub children: Vec<ChildConfig>,

    /// Users and their assigned items.
    pub users: Vec<UserConfig>,

    /// Bound of the manager's access cache; `0` disables it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,
}

impl RbacConfig {
    /// Validates item, edge and user definitions.
    ///
    /// Item names and user ids must be unique. Edges and assignments must
    /// reference defined items.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut names = HashSet::new();
        for item in &self.items {
            if item.name.trim().is_empty() {
                return Err(ConfigError::validation("rbac.items", "item name must not be empty"));
            }
            if !names.insert(item.name.as_str()) {
                return Err(ConfigError::duplicate_item(&item.name));
            }
        }

        for edge in &self.children {
            for name in [&edge.parent, &edge.child] {
                if !names.contains(name.as_str()) {
                    return Err(ConfigError::unknown_item(
                        name,
                        format!("edge '{}' -> '{}'", edge.parent, edge.child),
                    ));
                }
            }
        }

        let mut ids = HashSet::new();
        for user in &self.users {
            if user.id.trim().is_empty() {
                return Err(ConfigError::validation("rbac.users", "user id must not be empty"));
            }
            if !ids.insert(user.id.as_str()) {
                return Err(ConfigError::duplicate_user(&user.id));
            }
            for role in &user.roles {
                if !names.contains(role.as_str()) {
                    return Err(ConfigError::unknown_item(
                        role,
                        format!("assignment of user '{}'", user.id),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Returns an item definition by name.
    pub fn item(&self, name: &str) -> Option<&ItemConfig> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Finds a user by id, falling back to username.
    pub fn find_user(&self, id_or_username: &str) -> Option<&UserConfig> {
        self.users
            .iter()
            .find(|u| u.id == id_or_username)
            .or_else(|| self.users.iter().find(|u| u.username == id_or_username))
    }

    /// Returns a manager builder seeded with this configuration.
    ///
    /// Rule implementations can be registered on the builder before it is
    /// built.
    pub fn manager_builder(&self) -> InMemoryAuthManagerBuilder {
        let builder = self
            .items
            .iter()
            .fold(InMemoryAuthManager::builder(), |b, item| b.item(item.to_item()));
        let builder = self
            .children
            .iter()
            .fold(builder, |b, edge| b.child(&edge.parent, &edge.child));
        let builder = self.users.iter().fold(builder, |b, user| {
            user.roles.iter().fold(b, |b, role| b.assign(&user.id, role))
        });
        match self.cache_capacity {
            Some(capacity) => builder.cache_capacity(capacity),
            None => builder,
        }
    }

    /// Builds an in-memory manager without rule implementations.
    pub fn build_manager(&self) -> InMemoryAuthManager {
        self.manager_builder().build()
    }
}

/// A role or permission definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemConfig {
    /// Item name.
    pub name: String,

    /// Item kind.
    #[serde(default = "default_item_kind")]
    pub kind: ItemKind,

    /// Rule that must pass for the item to apply.
    #[serde(default)]
    pub rule: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_item_kind() -> ItemKind {
    ItemKind::Permission
}

impl ItemConfig {
    /// Creates a role definition.
    pub fn role(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Role,
            rule: None,
            description: None,
        }
    }

    /// Creates a permission definition.
    pub fn permission(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Permission,
            rule: None,
            description: None,
        }
    }

    /// Converts to a manager item.
    pub fn to_item(&self) -> Item {
        let item = match self.kind {
            ItemKind::Role => Item::role(&self.name),
            ItemKind::Permission => Item::permission(&self.name),
        };
        match &self.rule {
            Some(rule) => item.with_rule(rule),
            None => item,
        }
    }
}

/// A parent/child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChildConfig {
    /// Parent item.
    pub parent: String,
    /// Child item.
    pub child: String,
}

impl ChildConfig {
    /// Creates an edge.
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

/// A user with assigned items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    /// Stable identifier.
    pub id: String,

    /// Login name.
    pub username: String,

    /// Assigned roles or permissions.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserConfig {
    /// Creates a user without assignments.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            roles: Vec::new(),
        }
    }

    /// Adds an assignment.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Returns the identity of this user.
    pub fn identity(&self) -> Identity {
        Identity::new(&self.id, &self.username)
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    pub level: LogLevel,

    /// Log format.
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::validation(
                "logging.level",
                format!("unknown log level '{other}'"),
            )),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Compact format.
    Compact,
    /// JSON format for production.
    Json,
}
