//! # Boolean Scope
//!
//! Scope kind for flag fields. Two filters are attached to the model: the
//! positive one under the scope's named filter, and a negated one whose name is
//! derived by convention (`has_replies` → `doesnt_have_replies`, `live` →
//! `not_live`).
//!
//! Composition only looks at the positive filter's key. `{live: false}` applies
//! `live(false)`; the negated filter is reachable from parameters only when some
//! scope maps a key to it, e.g. `register_existing("not_live")`.

use super::{kind, scope_eq, Scope, ScopeCore, ScopeOptions};
use crate::error::Result;
use crate::model::{FilterDefinition, FilterTarget};
use std::any::Any;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanScope {
    core: ScopeCore,
    negative: String,
}

impl BooleanScope {
    pub fn new(name: &str, options: &ScopeOptions, target: &dyn FilterTarget) -> Result<Self> {
        let attribute = options.attribute.clone().unwrap_or_else(|| name.to_string());
        let named_filter = options
            .named_filter
            .clone()
            .unwrap_or_else(|| name.to_string());
        let negative = options
            .negative
            .clone()
            .unwrap_or_else(|| negative_filter_name(&named_filter));

        target.define_filter(
            &named_filter,
            FilterDefinition::BooleanEquals {
                attribute: attribute.clone(),
                negate: false,
            },
        );
        target.define_filter(
            &negative,
            FilterDefinition::BooleanEquals {
                attribute: attribute.clone(),
                negate: true,
            },
        );

        debug!(
            scope = %name,
            attribute = %attribute,
            named_filter = %named_filter,
            negative = %negative,
            "Built boolean scope"
        );

        Ok(Self {
            core: ScopeCore::new(name, attribute, named_filter),
            negative,
        })
    }

    /// Name of the negated filter
    pub fn negative(&self) -> &str {
        &self.negative
    }
}

/// `has_x` negates to `doesnt_have_x`; anything else gains a `not_` prefix
pub fn negative_filter_name(named_filter: &str) -> String {
    match named_filter.strip_prefix("has_") {
        Some(rest) => format!("doesnt_have_{rest}"),
        None => format!("not_{named_filter}"),
    }
}

impl Scope for BooleanScope {
    fn core(&self) -> &ScopeCore {
        &self.core
    }

    fn kind(&self) -> &'static str {
        kind::BOOLEAN
    }

    fn eq_scope(&self, other: &dyn Scope) -> bool {
        scope_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
