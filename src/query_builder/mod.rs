//! # Query Builder
//!
//! SQL text generation for filtered relations.
//!
//! ## Key Components
//!
//! - [`builder`] - Base table, where clauses, ordering and paging
//! - [`conditions`] - WHERE clause building (equality, IN, BETWEEN, ILIKE, raw SQL)
//!
//! Named filters on a model render to [`WhereClause`]s; a relation appends one
//! clause per applied filter and all clauses are ANDed in application order.

pub mod builder;
pub mod conditions;

pub use builder::QueryBuilder;
pub use conditions::{Condition, LogicalOperator, WhereClause};
