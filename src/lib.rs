#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Search Scopes
//!
//! Declarative, parameter-driven search composition for filtered model queries.
//!
//! ## Overview
//!
//! A model declares its search scopes once: which request keys it answers to
//! and how each maps onto a named filter. A search then folds every declared
//! scope over the request parameters, in declaration order, to produce a
//! filtered query. Scopes that find none of their keys leave the query alone,
//! and keys no scope recognises are ignored.
//!
//! ## Architecture
//!
//! - **Scope kinds** are strategies behind the object-safe [`Scope`] trait,
//!   built through a process-wide registry of factories keyed by kind tag.
//! - **Named filters** live on the model as data ([`FilterDefinition`]s) and
//!   are dispatched by name through [`Queryable::filter_by`].
//! - **Kind inference** asks the model's [`SchemaProvider`] for field types.
//! - **Parameters** are an immutable snapshot read through a consuming
//!   cursor, so a caller's parameters are never changed by a search.
//!
//! ## Module Organization
//!
//! - [`scopes`] - Scope kinds, options and request parameters
//! - [`registry`] - Scope kind registry and per-model scope registries
//! - [`model`] - Model interfaces and the SQL-rendering model
//! - [`query_builder`] - Composable SQL rendering
//! - [`config`] - Registry behaviour and declarative scope definitions
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use search_scopes::{define_scopes, FieldType, Model, ScopeOptions, SearchParams, SearchScopesConfig, StaticSchema};
//! use serde_json::json;
//!
//! # fn main() -> search_scopes::Result<()> {
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
//! let params = SearchParams::try_from(json!({"forums": [1, 2], "live": false}))
//!     .expect("params are an object");
//! let relation = scopes.search(&params)?;
//! assert_eq!(
//!     relation.to_sql(),
//!     "SELECT * FROM posts WHERE forum_id IN (1, 2) AND live = false"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod config;
pub mod error;
pub mod inflection;
pub mod logging;
pub mod model;
pub mod query_builder;
pub mod registry;
pub mod scopes;

pub use config::{ScopeDefinition, ScopeDefinitions, SearchScopesConfig};
pub use error::{Result, ScopeError};
pub use model::{
    FieldType, FilterCall, FilterDefinition, FilterTarget, MatchMode, Model, Queryable, Relation,
    SchemaProvider, ScopeModel, StaticSchema,
};
pub use registry::{define_scopes, register_scope_kind, ScopeFactory, ScopeRegistry};
pub use scopes::{
    BaseScope, BooleanScope, DateRangeScope, LikeQueryScope, ParamCursor, ReferenceScope, Scope,
    ScopeOptions, SearchParams,
};
