#![allow(dead_code)]

use proptest::prelude::*;
use search_scopes::SearchParams;
use serde_json::{json, Value};

/// Keys none of the test scopes answer to
pub fn unrelated_key_strategy() -> impl Strategy<Value = String> {
    "(page|per_page|sort|order|x_[a-z]{1,8})"
}

/// Identifiers as they arrive from a request: numbers or numeric strings
pub fn id_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        (1u32..10_000).prop_map(|id| json!(id)),
        (1u32..10_000).prop_map(|id| json!(id.to_string())),
    ]
}

pub fn id_list_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(id_strategy(), 0..6)
}

pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::String),
    ]
}

/// Parameters made only of keys no scope consumes
pub fn unrelated_params_strategy() -> impl Strategy<Value = SearchParams> {
    prop::collection::vec((unrelated_key_strategy(), scalar_strategy()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}
