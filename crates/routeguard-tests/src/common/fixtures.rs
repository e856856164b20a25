// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built hierarchies, identities and configuration files.
//!
//! The blog hierarchy used throughout:
//!
//! ```text
//! Guest  ── app_site
//!        ── blog_post_view
//!        ── blog_comment_create (rule: notBanned) ── blog_comment_preview
//! editor ── blog_post
//!        ── Guest
//! author ── blog_post_update (rule: isAuthor)
//! ```
//!
//! Assignments: `7` alice is an editor, `8` bob an author and `9` carol
//! holds `app_site_index` directly. `1` admin has no assignment and is
//! configured as root by [`AccessFixtures::with_root`].

use std::sync::Arc;

use routeguard_core::{
    AccessConfig, AuthManager, CheckParams, Identity, InMemoryAuthManager, PermissionResolver,
    RouteAccessGate,
};

// =============================================================================
// RBAC Fixtures
// =============================================================================

/// Fixture providing in-memory RBAC hierarchies.
pub struct RbacFixtures;

impl RbacFixtures {
    /// The blog hierarchy described in the module docs.
    pub fn blog() -> InMemoryAuthManager {
        InMemoryAuthManager::builder()
            .role("Guest")
            .role("editor")
            .role("author")
            .permission("app_site")
            .permission("app_site_index")
            .permission("blog_post")
            .permission("blog_post_view")
            .permission("blog_comment_preview")
            .permission_with_rule("blog_comment_create", "notBanned")
            .permission_with_rule("blog_post_update", "isAuthor")
            .child("Guest", "app_site")
            .child("Guest", "blog_post_view")
            .child("Guest", "blog_comment_create")
            .child("blog_comment_create", "blog_comment_preview")
            .child("editor", "blog_post")
            .child("editor", "Guest")
            .child("author", "blog_post_update")
            .assign("7", "editor")
            .assign("8", "author")
            .assign("9", "app_site_index")
            .rule("isAuthor", |identity: &Identity, _: &str, params: &CheckParams| {
                params
                    .get("author_id")
                    .and_then(|v| v.as_str())
                    .is_some_and(|author| author == identity.id)
            })
            .rule("notBanned", |_: &Identity, _: &str, _: &CheckParams| true)
            .build()
    }

    /// A hierarchy with the cycle `Guest -> a -> b -> Guest`.
    pub fn cyclic() -> InMemoryAuthManager {
        InMemoryAuthManager::builder()
            .role("Guest")
            .permission("a")
            .permission("b")
            .child("Guest", "a")
            .child("a", "b")
            .child("b", "Guest")
            .build()
    }
}

// =============================================================================
// Identity Fixtures
// =============================================================================

/// Fixture providing identities of the blog hierarchy.
pub struct IdentityFixtures;

impl IdentityFixtures {
    /// Root user without assignments.
    pub fn admin() -> Identity {
        Identity::new("1", "admin")
    }

    /// Editor.
    pub fn editor() -> Identity {
        Identity::new("7", "alice")
    }

    /// Author of post 8.
    pub fn author() -> Identity {
        Identity::new("8", "bob")
    }

    /// Holder of `app_site_index` only.
    pub fn direct() -> Identity {
        Identity::new("9", "carol")
    }

    /// Authenticated identity without any assignment.
    pub fn nobody() -> Identity {
        Identity::new("99", "nobody")
    }
}

// =============================================================================
// Access Fixtures
// =============================================================================

/// Fixture providing access configurations.
pub struct AccessFixtures;

impl AccessFixtures {
    /// Default settings without root users.
    pub fn plain() -> AccessConfig {
        AccessConfig::new()
    }

    /// Default settings with `admin` (id `1`) as root user.
    pub fn with_root() -> AccessConfig {
        AccessConfig::new().with_root_user("1")
    }
}

// =============================================================================
// Gate Fixtures
// =============================================================================

/// Fixture wiring managers into resolvers and gates.
pub struct GateFixtures;

impl GateFixtures {
    /// Resolver over `manager`.
    pub fn resolver(manager: Arc<dyn AuthManager>, config: &AccessConfig) -> Arc<PermissionResolver> {
        Arc::new(PermissionResolver::new(manager, config))
    }

    /// Gate over `manager`.
    pub fn gate(manager: Arc<dyn AuthManager>, config: &AccessConfig) -> RouteAccessGate {
        RouteAccessGate::new(Self::resolver(manager, config), config)
    }

    /// Gate over the blog hierarchy.
    pub fn blog_gate(config: AccessConfig) -> RouteAccessGate {
        Self::gate(Arc::new(RbacFixtures::blog()), &config)
    }
}

// =============================================================================
// Config Fixtures
// =============================================================================

/// Fixture providing configuration file contents.
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// Blog configuration in YAML.
    pub fn blog_yaml() -> &'static str {
        r#"
access:
  root_users: ["1"]
  root_match: id
  enable_root_warning_flash: true
  route_part_separator: "_"
  guest_role_name: Guest

rbac:
  items:
    - { name: Guest, kind: role }
    - { name: editor, kind: role }
    - { name: app_site }
    - { name: blog_post }
    - { name: blog_post_view }
  children:
    - { parent: Guest, child: app_site }
    - { parent: Guest, child: blog_post_view }
    - { parent: editor, child: blog_post }
  users:
    - { id: "1", username: admin }
    - { id: "7", username: alice, roles: [editor] }

logging:
  level: debug
  format: json
"#
    }

    /// Blog configuration in TOML.
    pub fn blog_toml() -> &'static str {
        r#"
[access]
root_users = ["1"]
guest_role_name = "Guest"

[[rbac.items]]
name = "Guest"
kind = "role"

[[rbac.items]]
name = "app_site"

[[rbac.children]]
parent = "Guest"
child = "app_site"

[[rbac.users]]
id = "1"
username = "admin"
"#
    }

    /// Blog configuration in JSON.
    pub fn blog_json() -> &'static str {
        r#"{
  "access": { "guest_role_name": "Public", "route_part_separator": "." },
  "rbac": {
    "items": [
      { "name": "Public", "kind": "role" },
      { "name": "app.site" }
    ],
    "children": [ { "parent": "Public", "child": "app.site" } ],
    "users": []
  }
}"#
    }
}
