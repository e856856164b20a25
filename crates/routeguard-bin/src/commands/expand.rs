// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `expand` command.

use crate::cli::ExpandArgs;
use crate::error::BinResult;

/// Prints one permission candidate per line, least specific first.
pub fn expand(args: &ExpandArgs) -> BinResult<i32> {
    for candidate in routeguard_core::expand(&args.permission, &args.separator) {
        println!("{}", candidate);
    }
    Ok(0)
}
