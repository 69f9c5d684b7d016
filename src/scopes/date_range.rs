//! # Date Range Scope
//!
//! Bounds a temporal field from request parameters. A scope named
//! `created_at` reads `created_at_from` and `created_at_to` (or an object
//! `{from, to}` under `created_at`) and is attached as `created_at_between`.

use super::{kind, scope_eq, ParamCursor, Scope, ScopeCore, ScopeOptions};
use crate::error::{Result, ScopeError};
use crate::model::{FilterCall, FilterDefinition, FilterTarget};
use serde_json::{Map, Value};
use std::any::Any;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeScope {
    core: ScopeCore,
    from_key: String,
    to_key: String,
}

impl DateRangeScope {
    pub fn new(name: &str, options: &ScopeOptions, target: &dyn FilterTarget) -> Result<Self> {
        let attribute = options.attribute.clone().unwrap_or_else(|| name.to_string());
        let named_filter = options
            .named_filter
            .clone()
            .unwrap_or_else(|| format!("{name}_between"));
        let from_key = options
            .from_key
            .clone()
            .unwrap_or_else(|| format!("{name}_from"));
        let to_key = options
            .to_key
            .clone()
            .unwrap_or_else(|| format!("{name}_to"));

        target.define_filter(
            &named_filter,
            FilterDefinition::DateRange {
                attribute: attribute.clone(),
            },
        );

        debug!(
            scope = %name,
            attribute = %attribute,
            named_filter = %named_filter,
            from_key = %from_key,
            to_key = %to_key,
            "Built date range scope"
        );

        Ok(Self {
            core: ScopeCore::new(name, attribute, named_filter),
            from_key,
            to_key,
        })
    }

    pub fn from_key(&self) -> &str {
        &self.from_key
    }

    pub fn to_key(&self) -> &str {
        &self.to_key
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

impl Scope for DateRangeScope {
    fn core(&self) -> &ScopeCore {
        &self.core
    }

    fn kind(&self) -> &'static str {
        kind::DATE_RANGE
    }

    /// Bound keys take precedence over the matching field of an object under
    /// the scope name. Blank bounds are ignored; any other non-object value
    /// under the scope name is rejected.
    fn extract(&self, params: &mut ParamCursor<'_>) -> Result<Option<FilterCall>> {
        let mut bounds = Map::new();

        match params.take(&self.core.name) {
            Some(Value::Object(range)) => {
                for bound in ["from", "to"] {
                    if let Some(value) = range.get(bound).filter(|v| !is_blank(v)) {
                        bounds.insert(bound.to_string(), value.clone());
                    }
                }
            }
            Some(value) if !is_blank(value) => {
                return Err(ScopeError::invalid_filter_value(
                    &self.core.named_filter,
                    "expected an object with 'from' and/or 'to'",
                ));
            }
            _ => {}
        }

        for (bound, key) in [("from", &self.from_key), ("to", &self.to_key)] {
            if let Some(value) = params.take(key).filter(|v| !is_blank(v)) {
                bounds.insert(bound.to_string(), value.clone());
            }
        }

        if bounds.is_empty() {
            return Ok(None);
        }

        Ok(Some(FilterCall::new(
            self.core.named_filter.clone(),
            Value::Object(bounds),
        )))
    }

    fn eq_scope(&self, other: &dyn Scope) -> bool {
        scope_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
