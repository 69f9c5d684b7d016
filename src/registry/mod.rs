//! # Registry Infrastructure
//!
//! Two registries cooperate when scopes are declared.
//!
//! ## Overview
//!
//! - **Scope kind registry**: process-wide, maps a kind tag to the factory
//!   that builds scopes of that kind. Built-in kinds are always present.
//! - **ScopeRegistry**: one per model, holds that model's scopes in
//!   declaration order and composes them over request parameters.
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── kind_registry     (tag -> ScopeFactory, global)
//! └── ScopeRegistry     (name -> Box<dyn Scope>, per model)
//! ```
//!
//! A registration looks the kind up in the kind registry, builds the scope
//! against the model (attaching its named filters), and stores it in the
//! model's `ScopeRegistry`.

pub mod kind_registry;
pub mod scope_registry;

// Re-export main types for easy access
pub use kind_registry::{
    factory, is_registered_kind, register_scope_kind, registered_kinds, scope_factory,
    ScopeFactory,
};
pub use scope_registry::{define_scopes, ScopeRegistry};
