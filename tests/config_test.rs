//! Loading registry settings and scope definitions from files on disk.

mod common;

use common::posts;
use search_scopes::{
    FieldType, Model, ScopeDefinitions, SearchParams, SearchScopesConfig, StaticSchema,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const POST_SCOPES: &str = r#"
scopes:
  - name: forums
  - name: live
  - name: featured
    existing: true
  - name: published_at
    options:
      scope: date_range
      from_key: published_after
      to_key: published_before
"#;

#[test]
fn test_definitions_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("post_scopes.yaml");
    fs::write(&path, POST_SCOPES).unwrap();

    let definitions = ScopeDefinitions::load(&path).unwrap();
    assert_eq!(definitions.len(), 4);
    assert!(definitions.scopes[2].existing);

    let model = posts().with_existing_filter("featured");
    let registry = definitions
        .build_registry(model, SearchScopesConfig::for_test())
        .unwrap();
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        vec!["forums", "live", "featured", "published_at"]
    );

    let params = SearchParams::new()
        .with("published_after", "2024-05-01")
        .with("featured", true)
        .with("forum", 3);
    let query = registry.search(&params).unwrap();
    assert_eq!(
        query.calls,
        vec![
            ("by_forums".to_string(), json!(3)),
            ("featured".to_string(), json!(true)),
            ("published_at_between".to_string(), json!({"from": "2024-05-01"})),
        ]
    );
}

#[test]
fn test_definitions_render_sql_on_concrete_model() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("post_scopes.yaml");
    fs::write(&path, "scopes:\n  - name: forums\n  - name: live\n").unwrap();

    let model = Model::new(
        "posts",
        StaticSchema::new()
            .field("forum_id", FieldType::Integer)
            .field("live", FieldType::Boolean),
    );
    let registry = ScopeDefinitions::load(&path)
        .unwrap()
        .build_registry(model, SearchScopesConfig::default())
        .unwrap();

    let relation = registry
        .search(&SearchParams::new().with("forums", json!([4, 5])).with("live", "0"))
        .unwrap();
    assert_eq!(
        relation.to_sql(),
        "SELECT * FROM posts WHERE forum_id IN (4, 5) AND live = false"
    );
}

#[test]
fn test_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("search_scopes.yaml");
    fs::write(&path, "strict_scope_kinds: true\nstrict_existing_filters: true\n").unwrap();

    let config = SearchScopesConfig::load_from_file(&path).unwrap();
    assert!(config.strict_scope_kinds);
    assert!(config.strict_existing_filters);
    assert!(config.log_unconsumed_params);
}

#[test]
fn test_malformed_definitions_are_configuration_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "scopes:\n  - existing: true\n").unwrap();

    let err = ScopeDefinitions::load(&path).unwrap_err();
    assert!(err.is_configuration_error());
}
