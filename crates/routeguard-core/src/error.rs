// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for routeguard-core.
//!
//! A denied permission is never an error: it is the ordinary `Ok(false)`
//! outcome of a check. The variants here cover failures of the RBAC manager
//! and misconfiguration, which are propagated unchanged to the host.
//!
//! # Examples
//!
//! ```
//! use routeguard_core::error::GuardError;
//!
//! let error = GuardError::rule_not_found("isAuthor", "post_update");
//! assert!(error.is_configuration());
//! ```

use thiserror::Error;

/// Result type alias for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;

// =============================================================================
// GuardError
// =============================================================================

/// Errors raised while resolving permissions.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The RBAC manager could not answer the query.
    #[error("Auth manager unavailable: {message}")]
    ManagerUnavailable {
        /// Error message.
        message: String,
    },

    /// An item references a rule that has no registered implementation.
    #[error("Rule '{rule}' referenced by '{item}' is not registered")]
    RuleNotFound {
        /// The missing rule name.
        rule: String,
        /// The item carrying the rule.
        item: String,
    },

    /// Invalid access configuration.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Error message.
        message: String,
    },
}

impl GuardError {
    /// Creates a manager unavailable error.
    pub fn manager_unavailable(message: impl Into<String>) -> Self {
        Self::ManagerUnavailable {
            message: message.into(),
        }
    }

    /// Creates a rule not found error.
    pub fn rule_not_found(rule: impl Into<String>, item: impl Into<String>) -> Self {
        Self::RuleNotFound {
            rule: rule.into(),
            item: item.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if the error stems from configuration rather than
    /// from the manager being unreachable.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::RuleNotFound { .. } | Self::InvalidConfig { .. })
    }

    /// Returns the error type as a string for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ManagerUnavailable { .. } => "manager_unavailable",
            Self::RuleNotFound { .. } => "rule_not_found",
            Self::InvalidConfig { .. } => "invalid_config",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
