// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! routeguard command-line entry point.

use routeguard_bin::error::report_error_and_exit;
use routeguard_bin::{commands, init_logging, Cli};

fn main() {
    let cli = Cli::parse_args();
    init_logging(&cli.log_level, cli.log_format);

    match commands::execute(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => report_error_and_exit(err),
    }
}
