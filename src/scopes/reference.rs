//! # Reference Scope
//!
//! Scope kind for foreign key / association fields. A scope named `forums`
//! answers to both `forums` (a list of ids) and `forum` (a single id), filters
//! `forum_id`, and is attached to the model as `by_forums`.

use super::{kind, scope_eq, ParamCursor, Scope, ScopeCore, ScopeOptions};
use crate::error::Result;
use crate::inflection::{foreign_key, singularize};
use crate::model::{FilterCall, FilterDefinition, FilterTarget};
use serde_json::Value;
use std::any::Any;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceScope {
    core: ScopeCore,
    singular_name: String,
}

impl ReferenceScope {
    /// Derive names from `name` and `options`, then attach the membership
    /// filter to `target` unless it already has one by that name.
    pub fn new(name: &str, options: &ScopeOptions, target: &dyn FilterTarget) -> Result<Self> {
        let singular_name = options
            .singular
            .clone()
            .unwrap_or_else(|| singularize(name));
        let attribute = options
            .attribute
            .clone()
            .unwrap_or_else(|| foreign_key(&singular_name));
        let named_filter = options
            .named_filter
            .clone()
            .unwrap_or_else(|| format!("by_{name}"));

        target.define_filter(
            &named_filter,
            FilterDefinition::AttributeIn {
                attribute: attribute.clone(),
            },
        );

        debug!(
            scope = %name,
            singular = %singular_name,
            attribute = %attribute,
            named_filter = %named_filter,
            "Built reference scope"
        );

        Ok(Self {
            core: ScopeCore::new(name, attribute, named_filter),
            singular_name,
        })
    }

    pub fn singular_name(&self) -> &str {
        &self.singular_name
    }
}

impl Scope for ReferenceScope {
    fn core(&self) -> &ScopeCore {
        &self.core
    }

    fn kind(&self) -> &'static str {
        kind::REFERENCE
    }

    /// Collect ids from the plural key, append the singular key's id, and pass
    /// a bare id when exactly one was given. Both keys are consumed even when
    /// no ids result.
    fn extract(&self, params: &mut ParamCursor<'_>) -> Result<Option<FilterCall>> {
        let mut ids: Vec<Value> = match params.take(&self.core.name) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(values)) => values.clone(),
            Some(value) => vec![value.clone()],
        };

        if let Some(id) = params.take(&self.singular_name) {
            if !id.is_null() {
                ids.push(id.clone());
            }
        }

        let argument = match ids.len() {
            0 => return Ok(None),
            1 => ids.remove(0),
            _ => Value::Array(ids),
        };

        Ok(Some(FilterCall::new(self.core.named_filter.clone(), argument)))
    }

    fn eq_scope(&self, other: &dyn Scope) -> bool {
        scope_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, StaticSchema};
    use crate::scopes::SearchParams;
    use serde_json::json;

    fn forums(model: &Model) -> ReferenceScope {
        ReferenceScope::new("forums", &ScopeOptions::default(), model).unwrap()
    }

    fn extract(scope: &ReferenceScope, params: &SearchParams) -> Option<FilterCall> {
        scope.extract(&mut params.cursor()).unwrap()
    }

    #[test]
    fn test_derived_names() {
        let model = Model::new("posts", StaticSchema::new());
        let scope = forums(&model);

        assert_eq!(scope.name(), "forums");
        assert_eq!(scope.singular_name(), "forum");
        assert_eq!(scope.attribute(), "forum_id");
        assert_eq!(scope.named_filter(), "by_forums");
        assert!(model.has_filter("by_forums"));
    }

    #[test]
    fn test_derived_names_for_irregular_plural() {
        let model = Model::new("rentals", StaticSchema::new());
        let scope = ReferenceScope::new("movies", &ScopeOptions::default(), &model).unwrap();

        assert_eq!(scope.singular_name(), "movie");
        assert_eq!(scope.attribute(), "movie_id");
        assert_eq!(scope.named_filter(), "by_movies");
    }

    #[test]
    fn test_option_overrides() {
        let model = Model::new("posts", StaticSchema::new());
        let options = ScopeOptions::new()
            .with_singular("board")
            .with_attribute("board_id")
            .with_named_filter("on_boards");
        let scope = ReferenceScope::new("forums", &options, &model).unwrap();

        assert_eq!(scope.singular_name(), "board");
        assert_eq!(scope.attribute(), "board_id");
        assert_eq!(scope.named_filter(), "on_boards");
        assert!(model.has_filter("on_boards"));
        assert!(!model.has_filter("by_forums"));
    }

    #[test]
    fn test_singular_key_yields_scalar() {
        let model = Model::new("posts", StaticSchema::new());
        let scope = forums(&model);

        let params = SearchParams::new().with("forum", 1);
        assert_eq!(
            extract(&scope, &params),
            Some(FilterCall::new("by_forums", json!(1)))
        );
    }

    #[test]
    fn test_plural_key_yields_collection() {
        let model = Model::new("posts", StaticSchema::new());
        let scope = forums(&model);

        let params = SearchParams::new().with("forums", json!([1, 2]));
        assert_eq!(
            extract(&scope, &params),
            Some(FilterCall::new("by_forums", json!([1, 2])))
        );

        // a one-element list collapses to the bare id
        let params = SearchParams::new().with("forums", json!([7]));
        assert_eq!(
            extract(&scope, &params),
            Some(FilterCall::new("by_forums", json!(7)))
        );
    }

    #[test]
    fn test_singular_is_appended_after_plural() {
        let model = Model::new("posts", StaticSchema::new());
        let scope = forums(&model);

        let params = SearchParams::new()
            .with("forum", 1)
            .with("forums", json!([2, 3]));
        assert_eq!(
            extract(&scope, &params),
            Some(FilterCall::new("by_forums", json!([2, 3, 1])))
        );
    }

    #[test]
    fn test_empty_input_is_consumed_but_passes_through() {
        let model = Model::new("posts", StaticSchema::new());
        let scope = forums(&model);

        let params = SearchParams::new()
            .with("forums", json!([]))
            .with("forum", Value::Null);
        let mut cursor = params.cursor();
        assert_eq!(scope.extract(&mut cursor).unwrap(), None);
        assert!(cursor.is_consumed("forums"));
        assert!(cursor.is_consumed("forum"));
    }

    #[test]
    fn test_equality() {
        let model = Model::new("posts", StaticSchema::new());
        let a = forums(&model);
        let b = forums(&Model::new("topics", StaticSchema::new()));
        assert_eq!(a, b);

        let c = ReferenceScope::new(
            "forums",
            &ScopeOptions::new().with_attribute("board_id"),
            &model,
        )
        .unwrap();
        assert_ne!(a, c);

        let d = ReferenceScope::new(
            "forums",
            &ScopeOptions::new().with_singular("board"),
            &model,
        )
        .unwrap();
        assert_ne!(a, d);
    }
}
