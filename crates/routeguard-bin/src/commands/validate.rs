// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use routeguard_core::ItemKind;

use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: &ValidateArgs) -> BinResult<i32> {
    let config_path = &cli.config;

    if !config_path.exists() {
        return Err(BinError::config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = routeguard_config::load_config(config_path)
        .map_err(|e| BinError::from(e).with_context("Configuration validation failed"))?;
    let warnings = config.warnings();

    let count = |kind: ItemKind| {
        config
            .rbac
            .items
            .iter()
            .filter(|item| item.kind == kind)
            .count()
    };
    let roles = count(ItemKind::Role);
    let permissions = count(ItemKind::Permission);

    match args.format {
        OutputFormat::Text => {
            println!("✓ Configuration is valid: {}", config_path.display());
            println!();
            println!("Summary:");
            println!("  Guest role:   {}", config.access.guest_role_name);
            println!("  Separator:    {:?}", config.access.route_part_separator);
            println!("  Root users:   {}", config.access.root_users.len());
            println!("  Root match:   {}", config.access.root_match.as_str());
            println!("  Roles:        {}", roles);
            println!("  Permissions:  {}", permissions);
            println!("  Users:        {}", config.rbac.users.len());

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  ⚠ {}", warning);
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "config_path": config_path.display().to_string(),
                "summary": {
                    "guest_role": config.access.guest_role_name,
                    "separator": config.access.route_part_separator,
                    "root_users": config.access.root_users.len(),
                    "root_match": config.access.root_match.as_str(),
                    "roles": roles,
                    "permissions": permissions,
                    "users": config.rbac.users.len(),
                },
                "warnings": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if args.strict && !warnings.is_empty() {
        return Err(BinError::config(format!(
            "Strict mode: {} warning(s) found",
            warnings.len()
        )));
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli_for(path: &std::path::Path, extra: &[&str]) -> Cli {
        let mut argv = vec!["routeguard", "-c", path.to_str().unwrap(), "validate"];
        argv.extend_from_slice(extra);
        Cli::parse_from(argv)
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validate_missing_file() {
        let cli = cli_for(std::path::Path::new("/nonexistent/routeguard.yaml"), &[]);
        let crate::cli::Commands::Validate(args) = &cli.command else {
            panic!("Expected Validate command");
        };
        assert!(validate(&cli, args).is_err());
    }

    #[test]
    fn test_validate_strict_fails_on_warnings() {
        let file = write_config(
            r#"
access:
  root_users: [ghost]
rbac:
  items:
    - { name: Guest, kind: role }
"#,
        );

        let cli = cli_for(file.path(), &[]);
        let crate::cli::Commands::Validate(args) = &cli.command else {
            panic!("Expected Validate command");
        };
        assert_eq!(validate(&cli, args).unwrap(), 0);

        let cli = cli_for(file.path(), &["--strict"]);
        let crate::cli::Commands::Validate(args) = &cli.command else {
            panic!("Expected Validate command");
        };
        assert!(validate(&cli, args).is_err());
    }
}
