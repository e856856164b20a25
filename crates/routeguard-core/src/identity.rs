// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Caller identities and the root user set.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Identity
// =============================================================================

/// An authenticated identity as provided by the host's auth subsystem.
///
/// Guests have no identity at all; they are represented by `None` wherever
/// an `Option<&Identity>` is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier.
    pub id: String,
    /// Login name. May change over the lifetime of the account.
    pub username: String,
}

impl Identity {
    /// Creates a new identity.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.id)
    }
}

// =============================================================================
// RootMatch
// =============================================================================

/// Which identity field is compared against the root user set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootMatch {
    /// Match the stable identifier only.
    #[default]
    Id,
    /// Match the username only.
    Username,
    /// Match either the identifier or the username.
    IdOrUsername,
}

impl RootMatch {
    /// Returns the rule name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RootMatch::Id => "id",
            RootMatch::Username => "username",
            RootMatch::IdOrUsername => "id_or_username",
        }
    }
}

// =============================================================================
// RootUserSet
// =============================================================================

/// Identities granted unconditional access.
///
/// Built once from configuration and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootUserSet {
    entries: BTreeSet<String>,
}

impl RootUserSet {
    /// Creates a root user set from identifiers and/or usernames.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the identity is a root user under the given rule.
    pub fn matches(&self, identity: &Identity, rule: RootMatch) -> bool {
        match rule {
            RootMatch::Id => self.entries.contains(&identity.id),
            RootMatch::Username => self.entries.contains(&identity.username),
            RootMatch::IdOrUsername => {
                self.entries.contains(&identity.id) || self.entries.contains(&identity.username)
            }
        }
    }

    /// Returns `true` if the raw entry is present.
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no root users are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

// =============================================================================
// Tests
// =============================================================================
