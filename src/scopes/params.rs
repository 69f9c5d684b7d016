//! # Search Parameters
//!
//! [`SearchParams`] is the request-time map of parameter name to value. It is
//! never mutated by a search. A fold threads a [`ParamCursor`] through the
//! scopes instead: the cursor borrows the params and records which keys have
//! been consumed, so each key is handed to at most one scope.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Insertion-ordered request parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchParams(IndexMap<String, Value>);

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, replacing any previous value for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Start a consumption pass over these parameters
    pub fn cursor(&self) -> ParamCursor<'_> {
        ParamCursor::new(self)
    }
}

impl From<Map<String, Value>> for SearchParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl TryFrom<Value> for SearchParams {
    type Error = Value;

    /// Objects convert; any other JSON value is handed back unchanged
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into()),
            other => Err(other),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Tracks which parameters a fold has consumed
#[derive(Debug, Clone)]
pub struct ParamCursor<'a> {
    params: &'a SearchParams,
    consumed: HashSet<&'a str>,
}

impl<'a> ParamCursor<'a> {
    pub fn new(params: &'a SearchParams) -> Self {
        Self {
            params,
            consumed: HashSet::new(),
        }
    }

    /// Consume `key`, returning its value if it is present and not yet consumed
    pub fn take(&mut self, key: &str) -> Option<&'a Value> {
        let (key, value) = self.params.0.get_key_value(key)?;
        self.consumed.insert(key.as_str()).then_some(value)
    }

    /// Look at an unconsumed value without consuming it
    pub fn peek(&self, key: &str) -> Option<&'a Value> {
        if self.consumed.contains(key) {
            return None;
        }
        self.params.get(key)
    }

    pub fn is_consumed(&self, key: &str) -> bool {
        self.consumed.contains(key)
    }

    /// Consumed keys, in parameter order
    pub fn consumed_keys(&self) -> Vec<&'a str> {
        self.params
            .keys()
            .filter(|key| self.consumed.contains(key))
            .collect()
    }

    /// Parameters nobody has consumed yet, in parameter order
    pub fn remaining(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
        self.params
            .iter()
            .filter(move |(key, _)| !self.consumed.contains(key))
    }

    pub fn remaining_keys(&self) -> Vec<&'a str> {
        self.remaining().map(|(key, _)| key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_take_consumes_once() {
        let params = SearchParams::new().with("live", true).with("forum", 1);
        let mut cursor = params.cursor();

        assert_eq!(cursor.take("live"), Some(&json!(true)));
        assert_eq!(cursor.take("live"), None);
        assert_eq!(cursor.take("missing"), None);
        assert!(cursor.is_consumed("live"));
        assert!(!cursor.is_consumed("missing"));
        assert_eq!(cursor.remaining_keys(), vec!["forum"]);
        assert_eq!(cursor.consumed_keys(), vec!["live"]);

        // the snapshot itself is untouched
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let params = SearchParams::new().with("q", "rust");
        let mut cursor = params.cursor();

        assert_eq!(cursor.peek("q"), Some(&json!("rust")));
        assert_eq!(cursor.take("q"), Some(&json!("rust")));
        assert_eq!(cursor.peek("q"), None);
    }

    #[test]
    fn test_conversions_preserve_order() {
        let params = SearchParams::try_from(json!({"q": "x", "live": true, "forums": [1, 2]}))
            .unwrap();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["q", "live", "forums"]);

        let parsed: SearchParams = serde_json::from_str(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let converted = SearchParams::try_from(json!({"zeta": 1, "alpha": 2})).unwrap();
        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(converted.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);

        let collected: SearchParams = vec![("b", json!(1)), ("a", json!(2))].into_iter().collect();
        assert_eq!(collected.keys().collect::<Vec<_>>(), vec!["b", "a"]);

        assert!(SearchParams::try_from(json!([1, 2])).is_err());
    }

    #[test]
    fn test_deserializes_from_json_object() {
        let params: SearchParams = serde_json::from_str(r#"{"forum": 1, "live": false}"#).unwrap();
        assert_eq!(params.get("forum"), Some(&json!(1)));
        assert_eq!(params.get("live"), Some(&json!(false)));
    }
}
