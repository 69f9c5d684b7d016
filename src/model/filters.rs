//! # Named Filter Definitions
//!
//! A named filter is stored on the model as data describing how to turn an
//! argument into a [`WhereClause`]. Scope kinds define the built-in variants at
//! construction time; callers attach their own through [`FilterDefinition::custom`].

use crate::error::{Result, ScopeError};
use crate::query_builder::{Condition, WhereClause};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// User-supplied filter body for filters that already exist on the model
pub type CustomFilter = Arc<dyn Fn(&Value) -> Result<WhereClause> + Send + Sync>;

/// How a pattern query matches its input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Contains,
    StartsWith,
    EndsWith,
    Exact,
}

impl MatchMode {
    /// Build an escaped LIKE pattern for `term`
    pub fn pattern(self, term: &str) -> String {
        let escaped = escape_like(term);
        match self {
            MatchMode::Contains => format!("%{escaped}%"),
            MatchMode::StartsWith => format!("{escaped}%"),
            MatchMode::EndsWith => format!("%{escaped}"),
            MatchMode::Exact => escaped,
        }
    }
}

/// Filter operation attached to a model under a name
#[derive(Clone)]
pub enum FilterDefinition {
    /// `attribute = value` for a scalar, `attribute IN (values)` for an array
    AttributeIn { attribute: String },
    /// `attribute = flag`, where the flag is the coerced argument (absent means
    /// true) and is inverted for negated filters
    BooleanEquals { attribute: String, negate: bool },
    /// `attribute` bounded by an object argument `{ "from": .., "to": .. }`
    DateRange { attribute: String },
    /// Case-insensitive pattern match over one or more attributes, ORed
    Like {
        attributes: Vec<String>,
        match_mode: MatchMode,
    },
    Custom(CustomFilter),
}

impl FilterDefinition {
    pub fn custom<F>(filter: F) -> Self
    where
        F: Fn(&Value) -> Result<WhereClause> + Send + Sync + 'static,
    {
        FilterDefinition::Custom(Arc::new(filter))
    }

    /// Render the filter registered as `name` for argument `value`
    pub fn render(&self, name: &str, value: &Value) -> Result<WhereClause> {
        match self {
            FilterDefinition::AttributeIn { attribute } => match value {
                Value::Array(values) => Ok(WhereClause::in_condition(attribute, values.clone())),
                Value::Object(_) => Err(ScopeError::invalid_filter_value(
                    name,
                    "expected an identifier or a list of identifiers",
                )),
                scalar => Ok(WhereClause::eq(attribute, scalar.clone())),
            },
            FilterDefinition::BooleanEquals { attribute, negate } => {
                let flag = coerce_flag(value, true).ok_or_else(|| {
                    ScopeError::invalid_filter_value(name, format!("{value} is not a flag"))
                })?;
                Ok(WhereClause::eq(attribute, Value::Bool(flag != *negate)))
            }
            FilterDefinition::DateRange { attribute } => render_date_range(name, attribute, value),
            FilterDefinition::Like {
                attributes,
                match_mode,
            } => {
                let term = match value {
                    Value::String(term) => term.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => {
                        return Err(ScopeError::invalid_filter_value(
                            name,
                            "expected a search term",
                        ))
                    }
                };
                let pattern = match_mode.pattern(&term);
                let conditions = attributes
                    .iter()
                    .map(|attribute| Condition::Like {
                        field: attribute.clone(),
                        pattern: pattern.clone(),
                        case_insensitive: true,
                    })
                    .collect();
                Ok(WhereClause::or(conditions))
            }
            FilterDefinition::Custom(filter) => filter(value),
        }
    }
}

impl fmt::Debug for FilterDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterDefinition::AttributeIn { attribute } => f
                .debug_struct("AttributeIn")
                .field("attribute", attribute)
                .finish(),
            FilterDefinition::BooleanEquals { attribute, negate } => f
                .debug_struct("BooleanEquals")
                .field("attribute", attribute)
                .field("negate", negate)
                .finish(),
            FilterDefinition::DateRange { attribute } => f
                .debug_struct("DateRange")
                .field("attribute", attribute)
                .finish(),
            FilterDefinition::Like {
                attributes,
                match_mode,
            } => f
                .debug_struct("Like")
                .field("attributes", attributes)
                .field("match_mode", match_mode)
                .finish(),
            FilterDefinition::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Coerce a request value to a flag the way form parameters are usually read.
///
/// Null yields `default`. Arrays and objects are not flags.
pub fn coerce_flag(value: &Value, default: bool) -> Option<bool> {
    match value {
        Value::Null => Some(default),
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().map(|f| f != 0.0).unwrap_or(true)),
        Value::String(s) => {
            let normalized = s.trim().to_ascii_lowercase();
            Some(!matches!(
                normalized.as_str(),
                "" | "0" | "f" | "false" | "off" | "no" | "n"
            ))
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn render_date_range(name: &str, attribute: &str, value: &Value) -> Result<WhereClause> {
    let Value::Object(bounds) = value else {
        return Err(ScopeError::invalid_filter_value(
            name,
            "expected an object with 'from' and/or 'to'",
        ));
    };

    let from = bounds
        .get("from")
        .map(|bound| normalize_date(name, bound))
        .transpose()?
        .flatten();
    let to = bounds
        .get("to")
        .map(|bound| normalize_date(name, bound))
        .transpose()?
        .flatten();

    match (from, to) {
        (Some(from), Some(to)) => Ok(WhereClause::between(
            attribute,
            Value::String(from),
            Value::String(to),
        )),
        (Some(from), None) => Ok(WhereClause::simple(attribute, ">=", Value::String(from))),
        (None, Some(to)) => Ok(WhereClause::simple(attribute, "<=", Value::String(to))),
        (None, None) => Err(ScopeError::invalid_filter_value(
            name,
            "a date range needs at least one bound",
        )),
    }
}

/// Validate a date bound, normalising timestamps to UTC. Null and blank bounds are absent.
pub(crate) fn normalize_date(name: &str, bound: &Value) -> Result<Option<String>> {
    let raw = match bound {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim(),
        other => {
            return Err(ScopeError::invalid_filter_value(
                name,
                format!("{other} is not a date"),
            ))
        }
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(
            timestamp
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date.format("%Y-%m-%d").to_string()));
    }

    Err(ScopeError::invalid_filter_value(
        name,
        format!("'{raw}' is neither an RFC 3339 timestamp nor a YYYY-MM-DD date"),
    ))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
