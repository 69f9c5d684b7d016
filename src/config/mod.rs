//! # Search Scope Configuration
//!
//! Behavioural switches for scope registration and composition, resolved per
//! environment the same way the rest of the application resolves its settings:
//! a profile picked from `SEARCH_SCOPES_ENV` / `RAILS_ENV` / `APP_ENV`, then
//! individual `SEARCH_SCOPES_*` environment overrides on top.
//!
//! Settings can also be loaded from a YAML (or TOML/JSON) file through the
//! `config` crate; environment variables with the `SEARCH_SCOPES` prefix take
//! precedence over the file.
//!
//! ```rust
//! use search_scopes::config::SearchScopesConfig;
//!
//! let config = SearchScopesConfig::for_test();
//! assert!(config.strict_scope_kinds);
//! assert!(config.validate().is_ok());
//! ```

pub mod definitions;

pub use definitions::{ScopeDefinition, ScopeDefinitions};

use crate::error::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{info, warn};

/// Prefix shared by every environment variable this crate reads
pub const ENV_PREFIX: &str = "SEARCH_SCOPES";

/// Behaviour of a scope registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchScopesConfig {
    /// Reject registrations naming a kind tag nobody registered
    pub strict_scope_kinds: bool,
    /// Reject `register_existing` for filters the model does not define
    pub strict_existing_filters: bool,
    /// Log parameter keys no scope consumed
    pub log_unconsumed_params: bool,
}

impl Default for SearchScopesConfig {
    /// Production defaults: unknown kinds and missing filters are tolerated
    fn default() -> Self {
        Self {
            strict_scope_kinds: false,
            strict_existing_filters: false,
            log_unconsumed_params: true,
        }
    }
}

impl SearchScopesConfig {
    /// Everything strict so misconfigured scopes fail the test that declares them
    pub fn for_test() -> Self {
        Self {
            strict_scope_kinds: true,
            strict_existing_filters: true,
            log_unconsumed_params: true,
        }
    }

    pub fn for_development() -> Self {
        Self {
            strict_scope_kinds: true,
            strict_existing_filters: false,
            log_unconsumed_params: true,
        }
    }

    /// Pick a profile from the detected environment, then apply overrides
    pub fn from_environment() -> Self {
        let environment = detect_environment();

        let config = match environment.as_str() {
            "test" => {
                info!("Loading test search scope configuration (strict)");
                Self::for_test()
            }
            "development" => {
                info!("Loading development search scope configuration");
                Self::for_development()
            }
            _ => {
                info!("Loading production search scope configuration");
                Self::default()
            }
        };

        config.with_env_overrides()
    }

    /// Apply `SEARCH_SCOPES_*` environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(strict) = env_flag("SEARCH_SCOPES_STRICT_SCOPE_KINDS") {
            self.strict_scope_kinds = strict;
            info!("Strict scope kinds override: {}", strict);
        }

        if let Some(strict) = env_flag("SEARCH_SCOPES_STRICT_EXISTING_FILTERS") {
            self.strict_existing_filters = strict;
            info!("Strict existing filters override: {}", strict);
        }

        if let Some(log) = env_flag("SEARCH_SCOPES_LOG_UNCONSUMED_PARAMS") {
            self.log_unconsumed_params = log;
            info!("Log unconsumed params override: {}", log);
        }

        self
    }

    /// Load settings from `path`, layered under `SEARCH_SCOPES_*` variables
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading search scope configuration from: {}", path.display());

        let config: Self = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        config.log_configuration();
        Ok(config)
    }

    pub fn log_configuration(&self) {
        info!("Search Scope Configuration:");
        info!("  Strict scope kinds: {}", self.strict_scope_kinds);
        info!("  Strict existing filters: {}", self.strict_existing_filters);
        info!("  Log unconsumed params: {}", self.log_unconsumed_params);
    }

    /// Validate the combination of settings.
    ///
    /// No combination is currently invalid; permissive production settings
    /// are reported so they do not go unnoticed.
    pub fn validate(&self) -> Result<()> {
        if !self.strict_scope_kinds && !self.log_unconsumed_params {
            warn!(
                "Unknown scope kinds are ignored and unconsumed params are not logged - \
                 misconfigured scopes will be silent"
            );
        }

        Ok(())
    }
}

/// The deployment environment name, defaulting to `production`
pub fn detect_environment() -> String {
    env::var("SEARCH_SCOPES_ENV")
        .or_else(|_| env::var("RAILS_ENV"))
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "production".to_string())
}

fn env_flag(key: &str) -> Option<bool> {
    let raw = env::var(key).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!(variable = %key, value = %raw, "Ignoring unparseable boolean override");
            None
        }
    }
}
