//! # Declarative Scope Definitions
//!
//! Scope declarations kept in a configuration file instead of code. Entries
//! are applied in file order, which is also composition order.
//!
//! ```yaml
//! scopes:
//!   - name: forums
//!   - name: live
//!   - name: created_at
//!     options:
//!       scope: date_range
//!   - name: featured
//!     existing: true
//! ```

use crate::config::SearchScopesConfig;
use crate::error::Result;
use crate::logging::log_error;
use crate::model::ScopeModel;
use crate::registry::{define_scopes, ScopeRegistry};
use crate::scopes::ScopeOptions;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One scope declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeDefinition {
    pub name: String,
    /// Wrap a filter the model already defines instead of building one
    #[serde(default)]
    pub existing: bool,
    #[serde(default)]
    pub options: ScopeOptions,
}

/// Ordered scope declarations for one model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeDefinitions {
    #[serde(default)]
    pub scopes: Vec<ScopeDefinition>,
}

impl ScopeDefinitions {
    /// Load definitions from a file; the format follows the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading scope definitions from: {}", path.display());

        let definitions = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        Ok(definitions)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let definitions = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        Ok(definitions)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Register every definition on `registry`, stopping at the first failure
    pub fn apply<M: ScopeModel>(&self, registry: &mut ScopeRegistry<M>) -> Result<()> {
        for definition in &self.scopes {
            let result = if definition.existing {
                registry.register_existing(&definition.name)
            } else {
                registry.register(&definition.name, definition.options.clone())
            };

            if let Err(err) = result {
                log_error(
                    "scope_definitions",
                    "apply",
                    &err.to_string(),
                    Some(&definition.name),
                );
                return Err(err);
            }
        }

        Ok(())
    }

    pub fn build_registry<M: ScopeModel>(
        &self,
        model: M,
        config: SearchScopesConfig,
    ) -> Result<ScopeRegistry<M>> {
        define_scopes(model, config, |registry| self.apply(registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldType, Model, StaticSchema};
    use crate::scopes::{kind, SearchParams};
    use serde_json::json;

    const DEFINITIONS: &str = r#"
scopes:
  - name: forums
  - name: live
  - name: created_at
    options:
      scope: date_range
  - name: q
    options:
      scope: like
      attributes: [title, body]
      match_mode: starts_with
"#;

    fn posts() -> Model {
        Model::new(
            "posts",
            StaticSchema::new()
                .field("forum_id", FieldType::Integer)
                .field("live", FieldType::Boolean)
                .field("created_at", FieldType::DateTime),
        )
    }

    #[test]
    fn test_parse_yaml() {
        let definitions = ScopeDefinitions::from_yaml_str(DEFINITIONS).unwrap();

        assert_eq!(definitions.len(), 4);
        assert_eq!(definitions.scopes[0].name, "forums");
        assert!(!definitions.scopes[0].existing);
        assert_eq!(definitions.scopes[0].options, ScopeOptions::default());
        assert_eq!(
            definitions.scopes[3].options.attributes,
            Some(vec!["title".to_string(), "body".to_string()])
        );
    }

    #[test]
    fn test_build_registry_in_file_order() {
        let registry = ScopeDefinitions::from_yaml_str(DEFINITIONS)
            .unwrap()
            .build_registry(posts(), SearchScopesConfig::for_test())
            .unwrap();

        let kinds: Vec<&str> = registry.iter().map(|(_, scope)| scope.kind()).collect();
        assert_eq!(
            kinds,
            vec![kind::REFERENCE, kind::BOOLEAN, kind::DATE_RANGE, kind::LIKE]
        );

        let params = SearchParams::new().with("q", "rus").with("forum", 2);
        let relation = registry.search(&params).unwrap();
        assert_eq!(
            relation.to_sql(),
            "SELECT * FROM posts WHERE forum_id = 2 AND (title ILIKE 'rus%' ESCAPE '\\' OR body ILIKE 'rus%' ESCAPE '\\')"
        );
        assert_eq!(relation.applied_filters()[1].value, json!("rus"));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let yaml = "scopes:\n  - name: forums\n    options:\n      colour: blue\n";
        let err = ScopeDefinitions::from_yaml_str(yaml).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_existing_definition_in_strict_mode() {
        let yaml = "scopes:\n  - name: featured\n    existing: true\n";
        let definitions = ScopeDefinitions::from_yaml_str(yaml).unwrap();

        let err = definitions
            .build_registry(posts(), SearchScopesConfig::for_test())
            .unwrap_err();
        assert_eq!(err, crate::ScopeError::missing_filter("featured"));
    }
}
