//! Test doubles for the model interfaces: a model that only remembers which
//! filters were defined, and a queryable that records every filter call.

#![allow(dead_code)]

use indexmap::IndexMap;
use parking_lot::RwLock;
use search_scopes::{
    FieldType, FilterDefinition, FilterTarget, Queryable, Result, ScopeError, ScopeModel,
};
use serde_json::Value;
use std::sync::Arc;

/// Queryable that records `(filter, value)` pairs instead of building a query
#[derive(Debug, Clone)]
pub struct RecordingQuery {
    known: Arc<RwLock<IndexMap<String, FilterDefinition>>>,
    pub calls: Vec<(String, Value)>,
}

impl RecordingQuery {
    pub fn calls_to(&self, filter: &str) -> Vec<&Value> {
        self.calls
            .iter()
            .filter(|(name, _)| name == filter)
            .map(|(_, value)| value)
            .collect()
    }
}

impl Queryable for RecordingQuery {
    fn filter_by(mut self, filter: &str, value: Value) -> Result<Self> {
        if !self.known.read().contains_key(filter) {
            return Err(ScopeError::unknown_filter(filter));
        }
        self.calls.push((filter.to_string(), value));
        Ok(self)
    }
}

impl PartialEq for RecordingQuery {
    fn eq(&self, other: &Self) -> bool {
        self.calls == other.calls
    }
}

/// Model with a fixed field list and a shared filter table
#[derive(Debug, Clone, Default)]
pub struct FakeModel {
    fields: Arc<IndexMap<String, FieldType>>,
    filters: Arc<RwLock<IndexMap<String, FilterDefinition>>>,
}

impl FakeModel {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldType)>,
        S: Into<String>,
    {
        Self {
            fields: Arc::new(
                fields
                    .into_iter()
                    .map(|(name, field_type)| (name.into(), field_type))
                    .collect(),
            ),
            filters: Arc::default(),
        }
    }

    /// Pretend the model was written with a hand-made filter called `name`
    pub fn with_existing_filter(self, name: &str) -> Self {
        self.define_filter(
            name,
            FilterDefinition::BooleanEquals {
                attribute: name.to_string(),
                negate: false,
            },
        );
        self
    }

    pub fn filter_names(&self) -> Vec<String> {
        self.filters.read().keys().cloned().collect()
    }

    pub fn filter(&self, name: &str) -> Option<FilterDefinition> {
        self.filters.read().get(name).cloned()
    }
}

impl FilterTarget for FakeModel {
    fn has_filter(&self, name: &str) -> bool {
        self.filters.read().contains_key(name)
    }

    fn define_filter(&self, name: &str, definition: FilterDefinition) -> bool {
        let mut filters = self.filters.write();
        if filters.contains_key(name) {
            return false;
        }
        filters.insert(name.to_string(), definition);
        true
    }
}

impl ScopeModel for FakeModel {
    type Query = RecordingQuery;

    fn field_type(&self, field: &str) -> Option<FieldType> {
        self.fields.get(field).copied()
    }

    fn query(&self) -> RecordingQuery {
        RecordingQuery {
            known: Arc::clone(&self.filters),
            calls: Vec::new(),
        }
    }
}

/// The forum post model used across the integration tests
pub fn posts() -> FakeModel {
    FakeModel::new([
        ("forum_id", FieldType::Integer),
        ("live", FieldType::Boolean),
        ("title", FieldType::String),
        ("created_at", FieldType::DateTime),
    ])
}
