//! # Search Scope Error Types
//!
//! Structured error handling for scope registration, filter resolution and
//! composition using thiserror.

use thiserror::Error;

/// Errors raised while configuring scopes or composing a search
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScopeError {
    #[error("Unknown scope kind '{kind}' requested for scope '{name}'")]
    UnknownScopeKind { name: String, kind: String },

    #[error("Scope '{name}' wraps a filter that is not defined on the model")]
    MissingFilter { name: String },

    #[error("Filter '{filter}' is not defined on the model")]
    UnknownFilter { filter: String },

    #[error("Invalid value for filter '{filter}': {reason}")]
    InvalidFilterValue { filter: String, reason: String },

    #[error("Invalid option '{option}' for scope '{name}': {reason}")]
    InvalidOption {
        name: String,
        option: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl ScopeError {
    /// Create an unknown scope kind error
    pub fn unknown_scope_kind(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnknownScopeKind {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Create a missing filter error
    pub fn missing_filter(name: impl Into<String>) -> Self {
        Self::MissingFilter { name: name.into() }
    }

    /// Create an unknown filter error
    pub fn unknown_filter(filter: impl Into<String>) -> Self {
        Self::UnknownFilter {
            filter: filter.into(),
        }
    }

    /// Create an invalid filter value error
    pub fn invalid_filter_value(filter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            filter: filter.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(
        name: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            name: name.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error was raised while setting scopes up rather than while searching
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownScopeKind { .. }
                | Self::MissingFilter { .. }
                | Self::InvalidOption { .. }
                | Self::Configuration { .. }
        )
    }
}

impl From<config::ConfigError> for ScopeError {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for ScopeError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;
