//! # Search Scopes
//!
//! A scope is a named, reusable filter bound to a model field. It is exposed
//! two ways: as a named filter on the model that can be invoked directly, and
//! as a composition unit that pulls its own parameters out of a request.
//!
//! ## Scope Kinds
//!
//! - [`BaseScope`]: wraps a filter that already exists on the model
//! - [`ReferenceScope`]: foreign key membership, matched by plural or singular key
//! - [`BooleanScope`]: flag equality, with a derived negated filter
//! - [`DateRangeScope`]: lower and/or upper bound on a temporal field
//! - [`LikeQueryScope`]: case-insensitive pattern search over one or more fields
//!
//! ## Contract
//!
//! Every kind implements [`Scope::extract`]: consume the parameters it owns
//! from a [`ParamCursor`] and describe at most one [`FilterCall`]. Applying the
//! call to a queryable is done in one place, `<dyn Scope>::apply`, so scopes
//! never see or mutate the caller's parameters.
//!
//! ```rust
//! use search_scopes::model::{FieldType, Model, StaticSchema};
//! use search_scopes::scopes::{ReferenceScope, Scope, ScopeOptions, SearchParams};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), search_scopes::ScopeError> {
//! let posts = Model::new("posts", StaticSchema::new().field("forum_id", FieldType::Integer));
//! let forums = ReferenceScope::new("forums", &ScopeOptions::default(), &posts)?;
//!
//! let params = SearchParams::new().with("forum", 1);
//! let call = forums.extract(&mut params.cursor())?.expect("forum was given");
//! assert_eq!(call.filter, "by_forums");
//! assert_eq!(call.value, json!(1));
//! # Ok(())
//! # }
//! ```

pub mod base;
pub mod boolean;
pub mod date_range;
pub mod like_query;
pub mod options;
pub mod params;
pub mod reference;

pub use base::BaseScope;
pub use boolean::BooleanScope;
pub use date_range::DateRangeScope;
pub use like_query::LikeQueryScope;
pub use options::ScopeOptions;
pub use params::{ParamCursor, SearchParams};
pub use reference::ReferenceScope;

use crate::error::Result;
use crate::model::{FilterCall, Queryable};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Kind tags understood by the scope kind registry out of the box
pub mod kind {
    pub const BASE: &str = "base";
    pub const REFERENCE: &str = "reference";
    pub const BOOLEAN: &str = "boolean";
    pub const DATE_RANGE: &str = "date_range";
    pub const LIKE: &str = "like";
}

/// Fields shared by every scope kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeCore {
    /// Logical key used in request parameters
    pub name: String,
    /// Field being filtered
    pub attribute: String,
    /// Name the filter operation is attached under on the model
    pub named_filter: String,
}

impl ScopeCore {
    pub fn new(
        name: impl Into<String>,
        attribute: impl Into<String>,
        named_filter: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            attribute: attribute.into(),
            named_filter: named_filter.into(),
        }
    }
}

/// A parameter-driven composition unit
pub trait Scope: fmt::Debug + Send + Sync + 'static {
    fn core(&self) -> &ScopeCore;

    /// Kind tag, as registered in the scope kind registry
    fn kind(&self) -> &'static str;

    /// Consume the parameters this scope owns and describe the filter to apply.
    ///
    /// The default consumes the key named after the scope's named filter and
    /// forwards its value, null included. Absent keys are a pass-through.
    fn extract(&self, params: &mut ParamCursor<'_>) -> Result<Option<FilterCall>> {
        let named_filter = &self.core().named_filter;
        Ok(params
            .take(named_filter)
            .map(|value| FilterCall::new(named_filter.clone(), value.clone())))
    }

    /// Kind-aware equality; see [`scope_eq`]
    fn eq_scope(&self, other: &dyn Scope) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn name(&self) -> &str {
        &self.core().name
    }

    fn attribute(&self) -> &str {
        &self.core().attribute
    }

    fn named_filter(&self) -> &str {
        &self.core().named_filter
    }
}

impl<'a> dyn Scope + 'a {
    /// Fold step: extract this scope's filter call and apply it to `query`.
    /// Errors from the queryable propagate unchanged.
    pub fn apply<Q: Queryable>(&self, query: Q, params: &mut ParamCursor<'_>) -> Result<Q> {
        match self.extract(params)? {
            Some(call) => query.filter_by(&call.filter, call.value),
            None => Ok(query),
        }
    }

    /// Downcast to a concrete scope kind
    pub fn downcast_ref<S: Scope>(&self) -> Option<&S> {
        self.as_any().downcast_ref::<S>()
    }
}

impl<'a> PartialEq for dyn Scope + 'a {
    fn eq(&self, other: &Self) -> bool {
        self.eq_scope(other)
    }
}

/// Equality helper for [`Scope::eq_scope`]: equal iff `other` is the same
/// concrete kind and compares equal field by field.
pub fn scope_eq<S: Scope + PartialEq>(this: &S, other: &dyn Scope) -> bool {
    other
        .as_any()
        .downcast_ref::<S>()
        .is_some_and(|other| this == other)
}
