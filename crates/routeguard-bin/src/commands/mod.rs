// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `check`: Evaluate a route for a user or a guest
//! - `expand`: Print permission candidates
//! - `validate`: Validate configuration file
//! - `version`: Show version information
//!
//! Every command returns the process exit code on success.

mod check;
mod expand;
mod validate;
mod version;

pub use check::{check, evaluate, CheckReport, EXIT_DENIED};
pub use expand::expand;
pub use validate::validate;
pub use version::version;

use crate::cli::{Cli, Commands};
use crate::error::BinResult;

/// Executes the appropriate command based on CLI arguments.
pub fn execute(cli: &Cli) -> BinResult<i32> {
    match &cli.command {
        Commands::Check(args) => check::check(cli, args),
        Commands::Expand(args) => expand::expand(args),
        Commands::Validate(args) => validate::validate(cli, args),
        Commands::Version => version::version(),
    }
}
