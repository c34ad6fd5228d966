//! Human and machine readable dumps of a [`PatternStore`].

use std::fmt::Display;

use matcher::{PatternStore, Properties};

/// Serialize every registered pattern as a JSON array of
/// `{"Match": {...}, "Data": ...}` objects, in list order.
pub fn to_json<T>(store: &PatternStore<T>) -> serde_json::Result<String>
where
    T: Clone + serde::Serialize,
{
    serde_json::to_string(&store.list(None, false))
}

/// `a:1, b:2`
pub fn format_pattern(properties: &Properties) -> String {
    properties
        .iter()
        .map(|(name, value)| format!("{name}:{value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per pattern, `a:1, b:2 -> <data>`.
pub fn describe<T>(store: &PatternStore<T>) -> String
where
    T: Clone + Display,
{
    describe_with(store, |data| format!("<{data}>"))
}

/// Like [`describe`] with a caller-supplied data formatter.
pub fn describe_with<T, F>(store: &PatternStore<T>, mut format_data: F) -> String
where
    T: Clone,
    F: FnMut(&T) -> String,
{
    store
        .list(None, false)
        .iter()
        .map(|record| {
            format!(
                "{} -> {}",
                format_pattern(&record.pattern),
                format_data(&record.data)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
