// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Config Integration Tests
//!
//! Integration tests for routeguard-config functionality including:
//!
//! - Loading files in every supported format
//! - Wiring a loaded configuration into a working gate
//! - Validation rules and warnings
//! - Environment variable overrides

use std::sync::Arc;

use routeguard_config::{
    load_config, ConfigError, ConfigFormat, ConfigLoader, LogFormat, LogLevel,
};
use routeguard_core::{Caller, Identity, RootMatch};

use routeguard_tests::prelude::*;
use routeguard_tests::common::temp_config_file;

// =============================================================================
// Loading Tests
// =============================================================================

#[test]
fn test_load_yaml_file() {
    let file = temp_config_file(ConfigFixtures::blog_yaml(), "yaml");
    let config = load_config(file.path()).unwrap();

    assert!(config.access.root_users.contains("1"));
    assert_eq!(config.access.root_match, RootMatch::Id);
    assert_eq!(config.rbac.items.len(), 5);
    assert_eq!(config.rbac.children.len(), 3);
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.warnings().is_empty());
}

#[test]
fn test_load_toml_file() {
    let file = temp_config_file(ConfigFixtures::blog_toml(), "toml");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.rbac.users.len(), 1);
    assert_eq!(config.access.route_part_separator, "_");
}

#[test]
fn test_load_json_file() {
    let file = temp_config_file(ConfigFixtures::blog_json(), "json");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.access.guest_role_name, "Public");
    assert_eq!(config.access.route_part_separator, ".");
}

#[test]
fn test_unsupported_extension() {
    let file = temp_config_file("{}", "ini");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

// =============================================================================
// Wiring Tests
// =============================================================================

#[test]
fn test_loaded_config_drives_gate() {
    let file = temp_config_file(ConfigFixtures::blog_yaml(), "yaml");
    let config = load_config(file.path()).unwrap();
    let gate = GateFixtures::gate(Arc::new(config.rbac.build_manager()), &config.access);

    let guest = Caller::guest();
    assert!(gate.check_action("app", "site", "index", &guest).unwrap());
    assert!(!gate.check_action("blog", "post", "update", &guest).unwrap());

    let alice = config.rbac.find_user("alice").unwrap().identity();
    assert!(gate
        .check_action("blog", "post", "update", &Caller::user(&alice))
        .unwrap());

    let admin = Identity::new("1", "admin");
    assert!(gate
        .check_action("billing", "invoice", "delete", &Caller::user(&admin))
        .unwrap());
}

#[test]
fn test_json_config_custom_separator() {
    let config = ConfigLoader::new()
        .with_env_vars(false)
        .load_from_str(ConfigFixtures::blog_json(), ConfigFormat::Json)
        .unwrap();
    let gate = GateFixtures::gate(Arc::new(config.rbac.build_manager()), &config.access);

    assert!(gate
        .check_action("app", "site", "index", &Caller::guest())
        .unwrap());
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_unknown_child_rejected() {
    let content = r#"{
  "rbac": {
    "items": [ { "name": "Guest", "kind": "role" } ],
    "children": [ { "parent": "Guest", "child": "missing" } ]
  }
}"#;
    let err = ConfigLoader::new()
        .with_env_vars(false)
        .load_from_str(content, ConfigFormat::Json)
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownItem { .. }));
}

#[test]
fn test_duplicate_user_rejected() {
    let content = r#"{
  "rbac": {
    "users": [
      { "id": "1", "username": "admin" },
      { "id": "1", "username": "root" }
    ]
  }
}"#;
    let err = ConfigLoader::new()
        .with_env_vars(false)
        .load_from_str(content, ConfigFormat::Json)
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateUser { .. }));
}

#[test]
fn test_empty_guest_role_rejected() {
    let content = r#"{ "access": { "guest_role_name": "" } }"#;
    let err = ConfigLoader::new()
        .with_env_vars(false)
        .load_from_str(content, ConfigFormat::Json)
        .unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn test_warnings_reported() {
    let content = r#"{
  "access": { "root_users": ["ghost"] },
  "rbac": { "items": [ { "name": "editor", "kind": "role" } ] }
}"#;
    let config = ConfigLoader::new()
        .with_env_vars(false)
        .load_from_str(content, ConfigFormat::Json)
        .unwrap();

    assert_eq!(config.warnings().len(), 2);
}

// =============================================================================
// Environment Tests
// =============================================================================

#[test]
fn test_env_overrides_reach_gate() {
    std::env::set_var("RG_IT_ROOT_USERS", "alice");
    std::env::set_var("RG_IT_ROOT_MATCH", "username");

    let file = temp_config_file(ConfigFixtures::blog_yaml(), "yaml");
    let config = ConfigLoader::new()
        .with_env_prefix("RG_IT")
        .load(file.path())
        .unwrap();
    let gate = GateFixtures::gate(Arc::new(config.rbac.build_manager()), &config.access);

    let alice = Identity::new("7", "alice");
    let admin = Identity::new("1", "admin");
    assert!(gate
        .check_action("billing", "invoice", "index", &Caller::user(&alice))
        .unwrap());
    assert!(!gate
        .check_action("billing", "invoice", "index", &Caller::user(&admin))
        .unwrap());
}
