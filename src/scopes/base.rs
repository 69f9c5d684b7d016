//! # Base Scope
//!
//! The minimal scope: no kind inference and no filter definition. It assumes a
//! filter named exactly like the scope already exists on the model and forwards
//! the parameter of the same name to it.

use super::{kind, scope_eq, Scope, ScopeCore};
use std::any::Any;

/// Wraps a pre-existing named filter so composition can invoke it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseScope {
    core: ScopeCore,
}

impl BaseScope {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            core: ScopeCore::new(name.clone(), name.clone(), name),
        }
    }
}

impl Scope for BaseScope {
    fn core(&self) -> &ScopeCore {
        &self.core
    }

    fn kind(&self) -> &'static str {
        kind::BASE
    }

    fn eq_scope(&self, other: &dyn Scope) -> bool {
        scope_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
