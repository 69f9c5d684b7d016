//! # Relation
//!
//! The concrete [`Queryable`] produced by a [`Model`]: a query builder for the
//! model's table plus the log of named filters applied to it, in order.

use super::{FilterCall, Model, Queryable};
use crate::error::{Result, ScopeError};
use crate::query_builder::{QueryBuilder, WhereClause};
use serde_json::Value;
use tracing::trace;

/// A chainable, filtered view over a model's table
#[derive(Debug, Clone)]
pub struct Relation {
    model: Model,
    query: QueryBuilder,
    applied: Vec<FilterCall>,
}

impl Relation {
    pub(crate) fn new(model: Model) -> Self {
        let query = QueryBuilder::new(model.table());
        Self {
            model,
            query,
            applied: Vec::new(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Named filters applied so far, in application order
    pub fn applied_filters(&self) -> &[FilterCall] {
        &self.applied
    }

    pub fn where_clauses(&self) -> &[WhereClause] {
        self.query.where_clauses()
    }

    /// Append a where clause that does not go through a named filter
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        self.query = self.query.where_clause(clause);
        self
    }

    pub fn order_asc(mut self, field: &str) -> Self {
        self.query = self.query.order_by(field, "ASC");
        self
    }

    pub fn order_desc(mut self, field: &str) -> Self {
        self.query = self.query.order_by(field, "DESC");
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.query = self.query.limit(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.query = self.query.offset(offset);
        self
    }

    /// Render the relation as SQL
    pub fn to_sql(&self) -> String {
        self.query.build_sql()
    }

    pub fn to_count_sql(&self) -> String {
        self.query.build_count_sql()
    }

    /// Execute the relation and return all rows
    #[cfg(feature = "postgres")]
    pub async fn fetch_all<T>(&self, pool: &sqlx::PgPool) -> Result<Vec<T>>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let sql = self.to_sql();
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(pool).await?)
    }

    /// Execute a count over the relation's conditions
    #[cfg(feature = "postgres")]
    pub async fn count(&self, pool: &sqlx::PgPool) -> Result<i64> {
        use sqlx::Row;

        let sql = self.to_count_sql();
        let row = sqlx::query(&sql).fetch_one(pool).await?;
        Ok(row.try_get::<i64, _>(0)?)
    }
}

impl Queryable for Relation {
    fn filter_by(mut self, filter: &str, value: Value) -> Result<Self> {
        let definition = self
            .model
            .filter(filter)
            .ok_or_else(|| ScopeError::unknown_filter(filter))?;

        let clause = definition.render(filter, &value)?;
        trace!(
            table = %self.model.table(),
            filter = %filter,
            clause = %clause.to_sql(),
            "Applying named filter"
        );

        self.query = self.query.where_clause(clause);
        self.applied.push(FilterCall::new(filter, value));
        Ok(self)
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.model.table() == other.model.table()
            && self.query == other.query
            && self.applied == other.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldType, FilterDefinition, FilterTarget, StaticSchema};
    use serde_json::json;

    fn posts() -> Model {
        let model = Model::new(
            "posts",
            StaticSchema::new().field("live", FieldType::Boolean),
        );
        model.define_filter(
            "live",
            FilterDefinition::BooleanEquals {
                attribute: "live".to_string(),
                negate: false,
            },
        );
        model
    }

    #[test]
    fn test_filter_by_appends_clause_and_records_call() {
        let relation = posts().all().filter_by("live", json!(true)).unwrap();

        assert_eq!(relation.to_sql(), "SELECT * FROM posts WHERE live = true");
        assert_eq!(
            relation.applied_filters(),
            &[FilterCall::new("live", json!(true))]
        );
    }

    #[test]
    fn test_unknown_filter_is_an_error() {
        let err = posts().all().filter_by("featured", json!(true)).unwrap_err();
        assert_eq!(err, ScopeError::unknown_filter("featured"));
    }

    #[test]
    fn test_relation_equality_tracks_applied_filters() {
        let model = posts();
        let a = model.all().filter_by("live", json!(true)).unwrap();
        let b = model.all().filter_by("live", json!(true)).unwrap();
        let c = model.all().filter_by("live", json!(false)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(model.all(), model.all());
    }

    #[test]
    fn test_ordering_and_paging() {
        let relation = posts()
            .all()
            .filter_by("live", Value::Null)
            .unwrap()
            .order_desc("created_at")
            .limit(20)
            .offset(40);

        assert_eq!(
            relation.to_sql(),
            "SELECT * FROM posts WHERE live = true ORDER BY created_at DESC LIMIT 20 OFFSET 40"
        );
        assert_eq!(
            relation.to_count_sql(),
            "SELECT COUNT(*) FROM posts WHERE live = true"
        );
    }
}
