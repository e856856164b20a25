// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration error types for routeguard-config.

use std::path::PathBuf;

use routeguard_core::GuardError;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration content.
    #[error("Failed to parse config '{path}': {message}")]
    Parse {
        /// Path to the configuration file, `<string>` for inline content.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// File I/O error.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// An RBAC item is defined twice.
    #[error("Duplicate RBAC item: {name}")]
    DuplicateItem {
        /// The duplicated item name.
        name: String,
    },

    /// A user id is defined twice.
    #[error("Duplicate user id: {id}")]
    DuplicateUser {
        /// The duplicated user id.
        id: String,
    },

    /// A hierarchy edge or assignment references an undefined item.
    #[error("Unknown RBAC item '{name}' referenced by {context}")]
    UnknownItem {
        /// The undefined item name.
        name: String,
        /// Where the reference appears.
        context: String,
    },

    /// Environment variable not found.
    #[error("Environment variable not found: {name}")]
    EnvVarNotFound {
        /// The environment variable name.
        name: String,
    },

    /// Invalid environment variable value.
    #[error("Invalid environment variable value for '{name}': {message}")]
    InvalidEnvVar {
        /// The environment variable name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Unsupported configuration format.
    #[error("Unsupported configuration format: {format}")]
    UnsupportedFormat {
        /// The unsupported format.
        format: String,
    },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Creates a parse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a duplicate item error.
    pub fn duplicate_item(name: impl Into<String>) -> Self {
        Self::DuplicateItem { name: name.into() }
    }

    /// Creates a duplicate user error.
    pub fn duplicate_user(id: impl Into<String>) -> Self {
        Self::DuplicateUser { id: id.into() }
    }

    /// Creates an unknown item error.
    pub fn unknown_item(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownItem {
            name: name.into(),
            context: context.into(),
        }
    }

    /// Creates an environment variable not found error.
    pub fn env_var_not_found(name: impl Into<String>) -> Self {
        Self::EnvVarNotFound { name: name.into() }
    }

    /// Creates an invalid environment variable error.
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is related to file I/O.
    pub fn is_io_error(&self) -> bool {
        matches!(self, ConfigError::Io { .. } | ConfigError::FileNotFound { .. })
    }

    /// Returns `true` if the content parsed but is not a valid configuration.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ConfigError::Validation { .. }
                | ConfigError::DuplicateItem { .. }
                | ConfigError::DuplicateUser { .. }
                | ConfigError::UnknownItem { .. }
        )
    }

    /// Returns the error type as a string for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            ConfigError::Parse { .. } => "parse",
            ConfigError::Validation { .. } => "validation",
            ConfigError::Io { .. } => "io",
            ConfigError::FileNotFound { .. } => "file_not_found",
            ConfigError::DuplicateItem { .. } => "duplicate_item",
            ConfigError::DuplicateUser { .. } => "duplicate_user",
            ConfigError::UnknownItem { .. } => "unknown_item",
            ConfigError::EnvVarNotFound { .. } => "env_var_not_found",
            ConfigError::InvalidEnvVar { .. } => "invalid_env_var",
            ConfigError::UnsupportedFormat { .. } => "unsupported_format",
            ConfigError::Serialization { .. } => "serialization",
        }
    }
}

impl From<GuardError> for ConfigError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::InvalidConfig { field, message } => Self::Validation { field, message },
            other => Self::validation("access", other.to_string()),
        }
    }
}

/// A Result type with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_creation() {
        let error = ConfigError::validation("access.guest_role_name", "must not be empty");
        assert!(matches!(error, ConfigError::Validation { .. }));
        assert_eq!(error.error_type(), "validation");
        assert!(error.is_validation_error());

        let error = ConfigError::unknown_item("editor", "assignment of user '7'");
        assert_eq!(error.error_type(), "unknown_item");
        assert!(error.to_string().contains("editor"));
    }

    #[test]
    fn test_config_error_is_io_error() {
        let error = ConfigError::io(
            "routeguard.yaml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(error.is_io_error());
        assert!(ConfigError::file_not_found("routeguard.yaml").is_io_error());
        assert!(!ConfigError::duplicate_item("Guest").is_io_error());
    }

    #[test]
    fn test_from_guard_error() {
        let error: ConfigError = GuardError::invalid_config("route_part_separator", "empty").into();
        match error {
            ConfigError::Validation { field, .. } => assert_eq!(field, "route_part_separator"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
