//! # Schema Introspection
//!
//! The schema collaborator answers one question for the scope registry: what
//! type a field is declared as. Kind inference only distinguishes booleans from
//! everything else, but providers report the full [`FieldType`] so other
//! callers can make finer decisions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared storage type of a model field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Boolean,
    Integer,
    Float,
    String,
    Text,
    Date,
    DateTime,
    Json,
    Other,
}

impl FieldType {
    pub fn is_boolean(self) -> bool {
        matches!(self, FieldType::Boolean)
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, FieldType::Date | FieldType::DateTime)
    }
}

/// Source of field type information for a model
pub trait SchemaProvider: Send + Sync {
    /// Declared type of `field`, or `None` if the schema has no such field
    fn field_type(&self, field: &str) -> Option<FieldType>;
}

/// In-memory schema, built up field by field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticSchema {
    fields: IndexMap<String, FieldType>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a field declaration
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), field_type);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SchemaProvider for StaticSchema {
    fn field_type(&self, field: &str) -> Option<FieldType> {
        self.fields.get(field).copied()
    }
}

impl<F> SchemaProvider for F
where
    F: Fn(&str) -> Option<FieldType> + Send + Sync,
{
    fn field_type(&self, field: &str) -> Option<FieldType> {
        self(field)
    }
}
