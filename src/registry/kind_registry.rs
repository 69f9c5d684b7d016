//! # Scope Kind Registry
//!
//! Process-wide mapping from kind tag (`boolean`, `reference`, ...) to the
//! factory that builds a scope of that kind.
//!
//! The built-in kinds are installed the first time the registry is touched.
//! Additional kinds are registered with [`register_scope_kind`] during process
//! initialisation, before any scopes are declared; the registry is treated as
//! read-only afterwards.
//!
//! ```rust
//! use search_scopes::model::FilterTarget;
//! use search_scopes::registry::{register_scope_kind, scope_factory};
//! use search_scopes::scopes::{BaseScope, Scope, ScopeOptions};
//!
//! register_scope_kind(
//!     "passthrough",
//!     |name: &str, _options: &ScopeOptions, _target: &dyn FilterTarget| {
//!         Ok(Box::new(BaseScope::new(name)) as Box<dyn Scope>)
//!     },
//! );
//! assert!(scope_factory("passthrough").is_some());
//! ```

use crate::error::Result;
use crate::model::FilterTarget;
use crate::scopes::{
    kind, BaseScope, BooleanScope, DateRangeScope, LikeQueryScope, ReferenceScope, Scope,
    ScopeOptions,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Builds a scope named `name` from `options`, attaching its filters to the target
pub type ScopeFactory =
    Arc<dyn Fn(&str, &ScopeOptions, &dyn FilterTarget) -> Result<Box<dyn Scope>> + Send + Sync>;

static SCOPE_KINDS: OnceLock<RwLock<HashMap<String, ScopeFactory>>> = OnceLock::new();

fn kinds() -> &'static RwLock<HashMap<String, ScopeFactory>> {
    SCOPE_KINDS.get_or_init(|| RwLock::new(builtin_kinds()))
}

fn builtin_kinds() -> HashMap<String, ScopeFactory> {
    let mut kinds: HashMap<String, ScopeFactory> = HashMap::new();
    kinds.insert(
        kind::BASE.to_string(),
        factory(|name: &str, _: &ScopeOptions, _: &dyn FilterTarget| {
            Ok(BaseScope::new(name))
        }),
    );
    kinds.insert(kind::REFERENCE.to_string(), factory(ReferenceScope::new));
    kinds.insert(kind::BOOLEAN.to_string(), factory(BooleanScope::new));
    kinds.insert(kind::DATE_RANGE.to_string(), factory(DateRangeScope::new));
    kinds.insert(kind::LIKE.to_string(), factory(LikeQueryScope::new));
    kinds
}

/// Wrap a concrete scope constructor as a [`ScopeFactory`]
pub fn factory<S, F>(build: F) -> ScopeFactory
where
    S: Scope,
    F: Fn(&str, &ScopeOptions, &dyn FilterTarget) -> Result<S> + Send + Sync + 'static,
{
    Arc::new(
        move |name: &str,
              options: &ScopeOptions,
              target: &dyn FilterTarget|
              -> Result<Box<dyn Scope>> { Ok(Box::new(build(name, options, target)?)) },
    )
}

/// Register (or replace) the factory for `tag`, returning the previous one
pub fn register_scope_kind<F>(tag: impl Into<String>, build: F) -> Option<ScopeFactory>
where
    F: Fn(&str, &ScopeOptions, &dyn FilterTarget) -> Result<Box<dyn Scope>>
        + Send
        + Sync
        + 'static,
{
    let tag = tag.into();
    info!(kind = %tag, "Registering scope kind");
    kinds().write().insert(tag, Arc::new(build))
}

/// The factory registered for `tag`
pub fn scope_factory(tag: &str) -> Option<ScopeFactory> {
    kinds().read().get(tag).cloned()
}

pub fn is_registered_kind(tag: &str) -> bool {
    kinds().read().contains_key(tag)
}

/// All registered kind tags, sorted
pub fn registered_kinds() -> Vec<String> {
    let mut tags: Vec<String> = kinds().read().keys().cloned().collect();
    tags.sort();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, StaticSchema};

    #[test]
    fn test_builtin_kinds_are_registered() {
        for tag in ["base", "boolean", "reference", "date_range", "like"] {
            assert!(is_registered_kind(tag), "missing built-in kind {tag}");
        }
        assert!(!is_registered_kind("tree"));

        let tags = registered_kinds();
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn test_factory_builds_scope_and_defines_filters() {
        let model = Model::new("posts", StaticSchema::new());
        let build = scope_factory("reference").unwrap();
        let scope = build("forums", &ScopeOptions::default(), &model).unwrap();

        assert_eq!(scope.kind(), "reference");
        assert_eq!(scope.named_filter(), "by_forums");
        assert!(model.has_filter("by_forums"));
    }

    #[test]
    fn test_custom_kind_registration() {
        let previous = register_scope_kind(
            "kind_registry_test_passthrough",
            |name: &str, _options: &ScopeOptions, _target: &dyn FilterTarget| {
                Ok(Box::new(BaseScope::new(name)) as Box<dyn Scope>)
            },
        );
        assert!(previous.is_none());

        let model = Model::new("posts", StaticSchema::new());
        let build = scope_factory("kind_registry_test_passthrough").unwrap();
        let scope = build("featured", &ScopeOptions::default(), &model).unwrap();
        assert_eq!(scope.kind(), "base");
    }
}
