// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `check` command.

use std::sync::Arc;

use routeguard_config::{GuardConfig, UserConfig};
use routeguard_core::{
    Caller, FlashStore, MemorySession, PermissionResolver, RouteAccessGate, RouteDefaults,
    RouteTarget, WARNING_FLASH_KEY,
};
use tracing::info;

use crate::cli::{CheckArgs, Cli, OutputFormat};
use crate::error::{BinError, BinResult};

/// Exit code returned when access is denied.
pub const EXIT_DENIED: i32 = 10;

/// Outcome of a single route check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Route as `module/.../controller/action`.
    pub route: String,
    /// Checked user id, `None` for guests.
    pub user: Option<String>,
    /// Permission candidates, least specific first.
    pub candidates: Vec<String>,
    /// Whether the caller bypassed the checks as a root user.
    pub root: bool,
    /// The decision.
    pub allowed: bool,
    /// Warning flashes added during the check.
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Returns the exit code for this decision.
    pub fn exit_code(&self) -> i32 {
        if self.allowed {
            0
        } else {
            EXIT_DENIED
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "route": self.route,
            "user": self.user,
            "candidates": self.candidates,
            "root": self.root,
            "allowed": self.allowed,
            "warnings": self.warnings,
        })
    }
}

/// Executes the `check` command.
pub fn check(cli: &Cli, args: &CheckArgs) -> BinResult<i32> {
    let config = routeguard_config::load_config(&cli.config)?;
    let report = evaluate(&config, &args.route, args.user.as_deref())?;

    match args.format {
        OutputFormat::Text => {
            let who = report.user.as_deref().unwrap_or("guest");
            println!("Route:      {}", report.route);
            println!("User:       {}", who);
            println!("Candidates: {}", report.candidates.join(", "));
            if report.root {
                println!("Root user:  yes");
            }
            for warning in &report.warnings {
                println!("Warning:    {}", warning);
            }
            println!();
            println!("{}", if report.allowed { "ALLOWED" } else { "DENIED" });
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.to_json())?);
        }
    }

    Ok(report.exit_code())
}

/// Evaluates `route` for `user` (or a guest) against `config`.
pub fn evaluate(config: &GuardConfig, route: &str, user: Option<&str>) -> BinResult<CheckReport> {
    let identity = user
        .map(|u| {
            config
                .rbac
                .find_user(u)
                .map(UserConfig::identity)
                .ok_or_else(|| BinError::unknown_user(u))
        })
        .transpose()?;

    let resolver = Arc::new(PermissionResolver::new(
        Arc::new(config.rbac.build_manager()),
        &config.access,
    ));
    let gate = RouteAccessGate::new(resolver, &config.access);

    let target = RouteTarget::from_path(route, &RouteDefaults::default());
    let session = MemorySession::new();
    let caller = Caller::from_identity(identity.as_ref()).with_session(&session);

    let allowed = gate.check(&target, &caller)?;
    let report = CheckReport {
        route: target.to_string(),
        user: identity.as_ref().map(|i| i.id.clone()),
        candidates: gate.candidates(&target),
        root: gate.resolver().is_root(&caller),
        allowed,
        warnings: session.flashes(WARNING_FLASH_KEY),
    };

    info!(route = %report.route, allowed, "Route checked");
    Ok(report)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use routeguard_config::{ChildConfig, ItemConfig};
    use routeguard_core::ROOT_WARNING_MESSAGE;

    fn config() -> GuardConfig {
        let mut config = GuardConfig::default();
        config.access.root_users.insert("1".to_string());
        config.rbac.items = vec![
            ItemConfig::role("Guest"),
            ItemConfig::role("editor"),
            ItemConfig::permission("app_site"),
            ItemConfig::permission("blog_post"),
        ];
        config.rbac.children = vec![
            ChildConfig::new("Guest", "app_site"),
            ChildConfig::new("editor", "blog_post"),
        ];
        config.rbac.users = vec![
            UserConfig::new("1", "admin"),
            UserConfig::new("7", "alice").with_role("editor"),
        ];
        config
    }

    #[test]
    fn test_guest_check() {
        let report = evaluate(&config(), "site/login", None).unwrap();
        assert!(report.allowed);
        assert!(report.user.is_none());
        assert_eq!(report.candidates, vec!["app", "app_site", "app_site_login"]);
        assert_eq!(report.exit_code(), 0);

        let report = evaluate(&config(), "blog/post/update", None).unwrap();
        assert!(!report.allowed);
        assert_eq!(report.exit_code(), EXIT_DENIED);
    }

    #[test]
    fn test_user_check_by_username() {
        let report = evaluate(&config(), "blog/post/update", Some("alice")).unwrap();
        assert!(report.allowed);
        assert_eq!(report.user.as_deref(), Some("7"));
        assert!(!report.root);
    }

    #[test]
    fn test_root_check_adds_warning() {
        let report = evaluate(&config(), "billing/invoice/delete", Some("admin")).unwrap();
        assert!(report.allowed);
        assert!(report.root);
        assert_eq!(report.warnings, vec![ROOT_WARNING_MESSAGE]);
    }

    #[test]
    fn test_unknown_user() {
        let err = evaluate(&config(), "site/index", Some("mallory")).unwrap_err();
        assert!(matches!(err, BinError::UnknownUser(_)));
    }
}
