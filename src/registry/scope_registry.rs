//! # Scope Registry
//!
//! Per-model, ordered collection of search scopes. Scopes are declared once
//! during setup and then folded over request parameters to build a filtered
//! query.
//!
//! Declaration order is composition order. When two scopes answer to the same
//! parameter key, the one registered first consumes it and the later one sees
//! nothing.
//!
//! ```rust
//! use search_scopes::config::SearchScopesConfig;
//! use search_scopes::model::{FieldType, Model, StaticSchema};
//! use search_scopes::registry::define_scopes;
//! use search_scopes::scopes::{ScopeOptions, SearchParams};
//!
//! # fn main() -> Result<(), search_scopes::ScopeError> {
//! let posts = Model::new(
//!     "posts",
//!     StaticSchema::new()
//!         .field("forum_id", FieldType::Integer)
//!         .field("live", FieldType::Boolean),
//! );
//!
//! let scopes = define_scopes(posts, SearchScopesConfig::default(), |scopes| {
//!     scopes.register("forums", ScopeOptions::default())?;
//!     scopes.register("live", ScopeOptions::default())
//! })?;
//!
//! let params = SearchParams::new().with("forum", 4).with("live", true);
//! let relation = scopes.search(&params)?;
//! assert_eq!(
//!     relation.to_sql(),
//!     "SELECT * FROM posts WHERE forum_id = 4 AND live = true"
//! );
//! # Ok(())
//! # }
//! ```

use super::kind_registry::scope_factory;
use crate::config::SearchScopesConfig;
use crate::error::{Result, ScopeError};
use crate::logging::{log_composition, log_scope_registration};
use crate::model::{Queryable, ScopeModel};
use crate::scopes::{kind, BaseScope, Scope, ScopeOptions, SearchParams};
use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, warn};

/// Ordered scopes declared on one model
pub struct ScopeRegistry<M: ScopeModel> {
    model: M,
    scopes: IndexMap<String, Box<dyn Scope>>,
    config: SearchScopesConfig,
}

impl<M: ScopeModel> ScopeRegistry<M> {
    pub fn new(model: M) -> Self {
        Self::with_config(model, SearchScopesConfig::default())
    }

    pub fn with_config(model: M, config: SearchScopesConfig) -> Self {
        Self {
            model,
            scopes: IndexMap::new(),
            config,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &SearchScopesConfig {
        &self.config
    }

    /// Kind used when a registration does not name one: `boolean` for fields
    /// the schema declares boolean, `reference` for everything else.
    pub fn infer_kind(&self, name: &str) -> &'static str {
        match self.model.field_type(name) {
            Some(field_type) if field_type.is_boolean() => kind::BOOLEAN,
            Some(_) => kind::REFERENCE,
            None => {
                debug!(scope = %name, "No schema field for scope, inferring reference kind");
                kind::REFERENCE
            }
        }
    }

    /// Declare a scope named `name`.
    ///
    /// The kind comes from `options.scope`, or is inferred from the schema.
    /// Building the scope attaches its named filters to the model. A scope
    /// already registered under `name` is replaced in place.
    ///
    /// Unknown kinds are skipped with a warning unless
    /// [`SearchScopesConfig::strict_scope_kinds`] is set.
    pub fn register(&mut self, name: &str, options: ScopeOptions) -> Result<()> {
        let tag = match options.scope.as_deref() {
            Some(tag) => tag.to_string(),
            None => self.infer_kind(name).to_string(),
        };

        let Some(build) = scope_factory(&tag) else {
            if self.config.strict_scope_kinds {
                return Err(ScopeError::unknown_scope_kind(name, tag));
            }
            warn!(scope = %name, kind = %tag, "Unknown scope kind, scope not registered");
            return Ok(());
        };

        let scope = build(name, &options, &self.model)?;
        self.insert(name, scope);
        Ok(())
    }

    /// Declare a scope over a filter the model already has, without defining one.
    ///
    /// The filter is expected under `name` and receives the parameter of the
    /// same name. A missing filter is an error only with
    /// [`SearchScopesConfig::strict_existing_filters`]; otherwise it surfaces
    /// when a search supplies that key.
    pub fn register_existing(&mut self, name: &str) -> Result<()> {
        if !self.model.has_filter(name) {
            if self.config.strict_existing_filters {
                return Err(ScopeError::missing_filter(name));
            }
            debug!(scope = %name, "Existing scope wraps a filter the model does not define yet");
        }

        self.insert(name, Box::new(BaseScope::new(name)));
        Ok(())
    }

    pub fn register_existing_all<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .try_for_each(|name| self.register_existing(name.as_ref()))
    }

    /// Store a pre-built scope under `name`, returning the one it replaced
    pub fn insert(&mut self, name: &str, scope: Box<dyn Scope>) -> Option<Box<dyn Scope>> {
        log_scope_registration(name, scope.kind(), scope.named_filter());
        self.scopes.insert(name.to_string(), scope)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Scope> {
        self.scopes.get(name).map(|scope| scope.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    /// Scope names in composition order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Scope)> {
        self.scopes
            .iter()
            .map(|(name, scope)| (name.as_str(), scope.as_ref()))
    }

    /// Fold every scope over `params`, starting from the model's unfiltered query
    pub fn compose(&self, params: &SearchParams) -> Result<M::Query> {
        self.compose_onto(self.model.query(), params)
    }

    /// Fold every scope over `params`, starting from `query`.
    ///
    /// Each parameter key is consumed by at most one scope. Keys no scope
    /// consumes are ignored. `params` itself is never modified.
    pub fn compose_onto<Q: Queryable>(&self, query: Q, params: &SearchParams) -> Result<Q> {
        let mut cursor = params.cursor();

        let query = self
            .scopes
            .values()
            .try_fold(query, |query, scope| scope.apply(query, &mut cursor))?;

        let unconsumed = if self.config.log_unconsumed_params {
            cursor.remaining_keys()
        } else {
            Vec::new()
        };
        log_composition(self.scopes.len(), &cursor.consumed_keys(), &unconsumed);

        Ok(query)
    }

    /// Alias of [`compose`](Self::compose)
    pub fn search(&self, params: &SearchParams) -> Result<M::Query> {
        self.compose(params)
    }
}

impl<M: ScopeModel + fmt::Debug> fmt::Debug for ScopeRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeRegistry")
            .field("model", &self.model)
            .field("scopes", &self.scopes)
            .field("config", &self.config)
            .finish()
    }
}

/// Build a registry for `model` and run `setup` against it
pub fn define_scopes<M, F>(
    model: M,
    config: SearchScopesConfig,
    setup: F,
) -> Result<ScopeRegistry<M>>
where
    M: ScopeModel,
    F: FnOnce(&mut ScopeRegistry<M>) -> Result<()>,
{
    let mut registry = ScopeRegistry::with_config(model, config);
    setup(&mut registry)?;
    debug!(scopes = registry.len(), "Search scopes defined");
    Ok(registry)
}
