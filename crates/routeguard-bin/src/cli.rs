// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `check`: Evaluate a route for a user or a guest
//! - `expand`: Print the permission candidates of a route permission
//! - `validate`: Validate configuration file
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use routeguard_core::DEFAULT_SEPARATOR;

// =============================================================================
// Main CLI Structure
// =============================================================================

/// routeguard - route-hierarchical access control over RBAC
///
/// Evaluates which routes a user or a guest may reach, given the access
/// settings and RBAC seed data of a configuration file.
#[derive(Parser, Debug)]
#[command(
    name = "routeguard",
    author = "Sylvex <contact@sylvex.io>",
    version = routeguard_core::VERSION,
    about = "Route-hierarchical access control over RBAC",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "routeguard.yaml",
        env = "ROUTEGUARD_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "warn",
        env = "ROUTEGUARD_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the routeguard CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check whether a route is accessible
    ///
    /// Builds the permission name of the route, expands it into its levels
    /// and evaluates them for the given user (or a guest). Exits with 0 when
    /// access is granted and 10 when it is denied.
    Check(CheckArgs),

    /// Print the permission candidates of a permission name
    Expand(ExpandArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration file and reports warnings.
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Route as `module/.../controller/action`, e.g. `user/admin/role/index`
    pub route: String,

    /// User id or username; checks as a guest when omitted
    #[arg(short, long)]
    pub user: Option<String>,

    /// Output format for the decision
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `expand` command.
#[derive(Args, Debug, Clone)]
pub struct ExpandArgs {
    /// Permission name, e.g. `user_admin_role_index`
    pub permission: String,

    /// Separator between route levels
    #[arg(short, long, default_value = DEFAULT_SEPARATOR)]
    pub separator: String,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Output format for validation results
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["routeguard", "check", "site/index", "--user", "alice"]);
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.route, "site/index");
            assert_eq!(args.user.as_deref(), Some("alice"));
            assert_eq!(args.format, OutputFormat::Text);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_check_as_guest_json() {
        let cli = Cli::parse_from(["routeguard", "check", "post/view", "-f", "json"]);
        if let Commands::Check(args) = cli.command {
            assert!(args.user.is_none());
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_expand_command() {
        let cli = Cli::parse_from(["routeguard", "expand", "app_site_index"]);
        if let Commands::Expand(args) = cli.command {
            assert_eq!(args.separator, "_");
        } else {
            panic!("Expected Expand command");
        }
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["routeguard", "validate", "--strict"]);
        if let Commands::Validate(args) = cli.command {
            assert!(args.strict);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "routeguard",
            "version",
            "-c",
            "/etc/routeguard/config.yaml",
            "-l",
            "debug",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.config, PathBuf::from("/etc/routeguard/config.yaml"));
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Version));
    }
}
