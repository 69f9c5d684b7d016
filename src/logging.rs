//! # Structured Logging Module
//!
//! Environment-aware structured logging for scope registration and search
//! composition. Console output by default, JSON lines when
//! `SEARCH_SCOPES_LOG_FORMAT=json`.

use crate::config::detect_environment;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = detect_environment();
        let log_level = get_log_level(&environment);
        let json = use_json_format();

        // RUST_LOG wins over the environment's default level
        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
        };

        let layer = if json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter())
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter())
                .boxed()
        };

        // A global subscriber may already be installed by the host application
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            environment = %environment,
            json = json,
            "Structured logging initialized"
        );
    });
}

fn use_json_format() -> bool {
    std::env::var("SEARCH_SCOPES_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "test" => "debug",
        "development" => "debug",
        "production" => "info",
        _ => "debug",
    }
}

/// Log a scope being added to (or replaced in) a registry
pub fn log_scope_registration(name: &str, kind: &str, named_filter: &str) {
    tracing::debug!(
        operation = "register_scope",
        scope = %name,
        kind = %kind,
        named_filter = %named_filter,
        "SCOPE_REGISTRATION"
    );
}

/// Log the outcome of folding a registry's scopes over request parameters
pub fn log_composition(scope_count: usize, consumed: &[&str], unconsumed: &[&str]) {
    tracing::debug!(
        operation = "compose",
        scopes = scope_count,
        consumed = ?consumed,
        "SEARCH_COMPOSITION"
    );

    if !unconsumed.is_empty() {
        tracing::debug!(
            operation = "compose",
            unconsumed = ?unconsumed,
            "Parameters not consumed by any scope"
        );
    }
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        "SEARCH_SCOPES_ERROR"
    );
}
