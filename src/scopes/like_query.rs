//! # Pattern Query Scope
//!
//! Free-text search over one or more fields. A scope named `q` over `title`
//! and `body` turns `{q: "rust"}` into `title ILIKE '%rust%' OR body ILIKE '%rust%'`.

use super::{kind, scope_eq, ParamCursor, Scope, ScopeCore, ScopeOptions};
use crate::error::{Result, ScopeError};
use crate::model::{FilterCall, FilterDefinition, FilterTarget, MatchMode};
use serde_json::Value;
use std::any::Any;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeQueryScope {
    core: ScopeCore,
    attributes: Vec<String>,
    match_mode: MatchMode,
}

impl LikeQueryScope {
    pub fn new(name: &str, options: &ScopeOptions, target: &dyn FilterTarget) -> Result<Self> {
        let attributes = match &options.attributes {
            Some(attributes) if attributes.is_empty() => {
                return Err(ScopeError::invalid_option(
                    name,
                    "attributes",
                    "at least one attribute is required",
                ))
            }
            Some(attributes) => attributes.clone(),
            None => vec![options.attribute.clone().unwrap_or_else(|| name.to_string())],
        };
        let named_filter = options
            .named_filter
            .clone()
            .unwrap_or_else(|| format!("{name}_like"));
        let match_mode = options.match_mode.unwrap_or_default();

        target.define_filter(
            &named_filter,
            FilterDefinition::Like {
                attributes: attributes.clone(),
                match_mode,
            },
        );

        debug!(
            scope = %name,
            attributes = ?attributes,
            named_filter = %named_filter,
            match_mode = ?match_mode,
            "Built pattern query scope"
        );

        Ok(Self {
            core: ScopeCore::new(name, attributes[0].clone(), named_filter),
            attributes,
            match_mode,
        })
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }
}

impl Scope for LikeQueryScope {
    fn core(&self) -> &ScopeCore {
        &self.core
    }

    fn kind(&self) -> &'static str {
        kind::LIKE
    }

    /// Reads the key named after the scope. Blank terms are consumed and ignored.
    fn extract(&self, params: &mut ParamCursor<'_>) -> Result<Option<FilterCall>> {
        let term = match params.take(&self.core.name) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(term)) => term.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(_) => {
                return Err(ScopeError::invalid_filter_value(
                    &self.core.named_filter,
                    "expected a search term",
                ))
            }
        };

        if term.is_empty() {
            return Ok(None);
        }

        Ok(Some(FilterCall::new(
            self.core.named_filter.clone(),
            Value::String(term),
        )))
    }

    fn eq_scope(&self, other: &dyn Scope) -> bool {
        scope_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
