//! # Inflection Helpers
//!
//! Pure string transforms used to derive scope aliases and attribute names:
//! singular forms of association names and their foreign key columns.
//!
//! The rule set covers the English plural forms that show up in table and
//! association names. It is intentionally small; anything it does not recognise
//! can be overridden per scope through `ScopeOptions`.

use heck::ToSnakeCase;

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "news",
    "metadata",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("oxen", "ox"),
    ("toes", "toe"),
    ("axes", "axis"),
    ("bases", "basis"),
];

/// Plural endings the generic rules get wrong: `(suffix, strip, append)`.
const SUFFIX_EXCEPTIONS: &[(&str, usize, &str)] = &[
    ("movies", 1, ""),
    ("shoes", 1, ""),
    ("canoes", 1, ""),
    ("quizzes", 3, ""),
    ("viruses", 2, ""),
    ("octopuses", 2, ""),
    ("alumnuses", 2, ""),
    ("crises", 2, "is"),
    ("analyses", 2, "is"),
    ("diagnoses", 2, "is"),
    ("theses", 2, "is"),
    ("testes", 2, "is"),
];

/// Singular form of `word`.
///
/// Only the last `_`-separated segment is inflected, so `user_groups` becomes
/// `user_group` and `forum_categories` becomes `forum_category`.
pub fn singularize(word: &str) -> String {
    let (prefix, last) = match word.rfind('_') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    };

    format!("{prefix}{}", singularize_segment(last))
}

fn singularize_segment(segment: &str) -> String {
    let lower = segment.to_ascii_lowercase();

    if segment.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return segment.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return restore_case(segment, singular);
    }

    let stem = |suffix_len: usize| segment[..segment.len() - suffix_len].to_string();

    if let Some((_, strip, append)) = SUFFIX_EXCEPTIONS
        .iter()
        .find(|(suffix, _, _)| lower.ends_with(suffix))
    {
        return format!("{}{append}", stem(*strip));
    }
    if lower.ends_with("ies") && lower.len() > 4 {
        return format!("{}y", stem(3));
    }
    if lower.ends_with("lves") {
        return format!("{}f", stem(3));
    }
    if lower.ends_with("sses")
        || lower.ends_with("shes")
        || lower.ends_with("ches")
        || lower.ends_with("xes")
        || lower.ends_with("zes")
        || lower.ends_with("atuses")
        || lower.ends_with("buses")
        || lower.ends_with("iases")
        || lower.ends_with("oes")
    {
        return stem(2);
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return segment.to_string();
    }
    if lower.ends_with('s') && lower.len() > 1 {
        return stem(1);
    }

    segment.to_string()
}

fn restore_case(original: &str, replacement: &str) -> String {
    let capitalized = original
        .chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false);

    if capitalized {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}

/// Foreign key column for an association named `word`: `Forum` and `forum`
/// both become `forum_id`, `admin::UserGroup` becomes `user_group_id`.
pub fn foreign_key(word: &str) -> String {
    let demodulized = word.rsplit("::").next().unwrap_or(word);
    format!("{}_id", demodulized.to_snake_case())
}
