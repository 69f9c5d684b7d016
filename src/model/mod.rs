//! # Model Layer
//!
//! The interfaces search scopes rely on, and a concrete SQL-rendering model
//! implementing them.
//!
//! ## Interfaces
//!
//! - [`Queryable`]: anything a named filter can be applied to by name
//! - [`FilterTarget`]: where scopes attach the named filters they derive
//! - [`SchemaProvider`]: field type introspection used for kind inference
//! - [`ScopeModel`]: a model combining the three, and the starting point of a search
//!
//! ## Concrete Implementation
//!
//! [`Model`] keeps its named filters as [`FilterDefinition`]s keyed by name and
//! hands out [`Relation`]s that render to SQL through the query builder.
//!
//! ```rust
//! use search_scopes::model::{FieldType, FilterDefinition, FilterTarget, Model, Queryable, StaticSchema};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), search_scopes::ScopeError> {
//! let posts = Model::new("posts", StaticSchema::new().field("live", FieldType::Boolean));
//! posts.define_filter(
//!     "live",
//!     FilterDefinition::BooleanEquals { attribute: "live".to_string(), negate: false },
//! );
//!
//! let relation = posts.all().filter_by("live", json!(true))?;
//! assert_eq!(relation.to_sql(), "SELECT * FROM posts WHERE live = true");
//! # Ok(())
//! # }
//! ```

pub mod filters;
pub mod relation;
pub mod schema;

pub use filters::{coerce_flag, CustomFilter, FilterDefinition, MatchMode};
pub use relation::Relation;
pub use schema::{FieldType, SchemaProvider, StaticSchema};

use crate::error::Result;
use crate::query_builder::WhereClause;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A named filter invocation: apply `filter` with argument `value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCall {
    pub filter: String,
    pub value: Value,
}

impl FilterCall {
    pub fn new(filter: impl Into<String>, value: Value) -> Self {
        Self {
            filter: filter.into(),
            value,
        }
    }
}

/// Something a named filter can be applied to, producing a new queryable
pub trait Queryable: Sized {
    /// Apply the filter registered as `filter` with argument `value`
    fn filter_by(self, filter: &str, value: Value) -> Result<Self>;
}

/// The surface scopes use to attach named filters at construction time
pub trait FilterTarget {
    fn has_filter(&self, name: &str) -> bool;

    /// Attach `definition` under `name` unless a filter with that name already
    /// exists. Returns whether the definition was attached.
    fn define_filter(&self, name: &str, definition: FilterDefinition) -> bool;
}

/// A model that search scopes can be declared on
pub trait ScopeModel: FilterTarget + Clone {
    type Query: Queryable;

    /// Declared type of `field`, if the model's schema knows it
    fn field_type(&self, field: &str) -> Option<FieldType>;

    /// An unfiltered queryable over the whole model
    fn query(&self) -> Self::Query;
}

struct ModelInner {
    table: String,
    schema: Arc<dyn SchemaProvider>,
    filters: RwLock<IndexMap<String, FilterDefinition>>,
}

/// Shared handle to a model: its table, schema and named filters
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

impl Model {
    pub fn new(table: impl Into<String>, schema: impl SchemaProvider + 'static) -> Self {
        Self::with_schema(table, Arc::new(schema))
    }

    pub fn with_schema(table: impl Into<String>, schema: Arc<dyn SchemaProvider>) -> Self {
        Self {
            inner: Arc::new(ModelInner {
                table: table.into(),
                schema,
                filters: RwLock::new(IndexMap::new()),
            }),
        }
    }

    pub fn table(&self) -> &str {
        &self.inner.table
    }

    /// The definition registered under `name`
    pub fn filter(&self, name: &str) -> Option<FilterDefinition> {
        self.inner.filters.read().get(name).cloned()
    }

    /// Names of every defined filter, in definition order
    pub fn filter_names(&self) -> Vec<String> {
        self.inner.filters.read().keys().cloned().collect()
    }

    /// Attach a hand-written filter, e.g. one later wrapped with `register_existing`
    pub fn define_custom_filter<F>(&self, name: &str, filter: F) -> bool
    where
        F: Fn(&Value) -> Result<WhereClause> + Send + Sync + 'static,
    {
        self.define_filter(name, FilterDefinition::custom(filter))
    }

    /// Start an unfiltered relation
    pub fn all(&self) -> Relation {
        Relation::new(self.clone())
    }

    /// Whether two handles point at the same model
    pub fn ptr_eq(&self, other: &Model) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl FilterTarget for Model {
    fn has_filter(&self, name: &str) -> bool {
        self.inner.filters.read().contains_key(name)
    }

    fn define_filter(&self, name: &str, definition: FilterDefinition) -> bool {
        let mut filters = self.inner.filters.write();
        if filters.contains_key(name) {
            debug!(table = %self.inner.table, filter = %name, "Filter already defined, keeping existing");
            return false;
        }

        debug!(table = %self.inner.table, filter = %name, definition = ?definition, "Defining named filter");
        filters.insert(name.to_string(), definition);
        true
    }
}

impl ScopeModel for Model {
    type Query = Relation;

    fn field_type(&self, field: &str) -> Option<FieldType> {
        self.inner.schema.field_type(field)
    }

    fn query(&self) -> Relation {
        self.all()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("table", &self.inner.table)
            .field("filters", &self.filter_names())
            .finish()
    }
}
