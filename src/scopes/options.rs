use crate::model::MatchMode;
use serde::{Deserialize, Serialize};

/// Per-scope configuration recognised at registration time.
///
/// Every field is optional; unset fields fall back to the conventions of the
/// resolved scope kind. Options a kind does not use are ignored by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeOptions {
    /// Explicit kind tag (`boolean`, `reference`, ...); inferred from the schema when unset
    pub scope: Option<String>,
    /// Name the derived filter is attached under
    pub named_filter: Option<String>,
    /// Field being filtered
    pub attribute: Option<String>,
    /// Reference scopes: singular parameter alias
    pub singular: Option<String>,
    /// Boolean scopes: name of the negated filter
    pub negative: Option<String>,
    /// Pattern scopes: fields searched (ORed)
    pub attributes: Option<Vec<String>>,
    /// Pattern scopes: how the term is matched
    pub match_mode: Option<MatchMode>,
    /// Date range scopes: parameter holding the lower bound
    pub from_key: Option<String>,
    /// Date range scopes: parameter holding the upper bound
    pub to_key: Option<String>,
}

impl ScopeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, kind: impl Into<String>) -> Self {
        self.scope = Some(kind.into());
        self
    }

    pub fn with_named_filter(mut self, named_filter: impl Into<String>) -> Self {
        self.named_filter = Some(named_filter.into());
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn with_singular(mut self, singular: impl Into<String>) -> Self {
        self.singular = Some(singular.into());
        self
    }

    pub fn with_negative(mut self, negative: impl Into<String>) -> Self {
        self.negative = Some(negative.into());
        self
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = Some(match_mode);
        self
    }

    pub fn with_from_key(mut self, from_key: impl Into<String>) -> Self {
        self.from_key = Some(from_key.into());
        self
    }

    pub fn with_to_key(mut self, to_key: impl Into<String>) -> Self {
        self.to_key = Some(to_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = ScopeOptions::new()
            .with_scope("reference")
            .with_attribute("board_id")
            .with_singular("board");

        assert_eq!(options.scope.as_deref(), Some("reference"));
        assert_eq!(options.attribute.as_deref(), Some("board_id"));
        assert_eq!(options.singular.as_deref(), Some("board"));
        assert_eq!(options.named_filter, None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let options: ScopeOptions =
            serde_json::from_str(r#"{"scope": "like", "attributes": ["title", "body"], "match_mode": "starts_with"}"#)
                .unwrap();
        assert_eq!(options.match_mode, Some(MatchMode::StartsWith));
        assert_eq!(
            options.attributes,
            Some(vec!["title".to_string(), "body".to_string()])
        );

        assert!(serde_json::from_str::<ScopeOptions>(r#"{"singlar": "board"}"#).is_err());
    }
}
