use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::hooks::Modifier;

/// A flat set of property name/value pairs.
///
/// Keys iterate in lexicographic order, which is the canonical order every
/// tree operation walks in. Two sets holding the same pairs always map to the
/// same tree path regardless of how they were built.
pub type Properties = BTreeMap<String, String>;

/// A registered pattern as surfaced by [`PatternStore::list`].
///
/// Serializes as `{"Match": {...}, "Data": ...}`; the modifier is runtime-only
/// and never serialized.
///
/// [`PatternStore::list`]: crate::PatternStore::list
#[derive(Clone, Serialize)]
pub struct PatternRecord<T> {
    /// The reconstructed property set leading to the data-bearing node.
    #[serde(rename = "Match")]
    pub pattern: Properties,
    /// Data stored when the pattern was registered.
    #[serde(rename = "Data")]
    pub data: T,
    /// Modifier attached at registration time, if any.
    #[serde(skip)]
    pub modifier: Option<Arc<dyn Modifier<T>>>,
}

impl<T> PatternRecord<T> {
    /// Number of properties in the pattern.
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    /// True for the root (empty) pattern.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for PatternRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRecord")
            .field("pattern", &self.pattern)
            .field("data", &self.data)
            .field("modifier", &self.modifier.is_some())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for PatternRecord<T> {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.data == other.data
    }
}

/// Build a [`Properties`] set from borrowed pairs.
///
/// ```
/// use matcher::props;
///
/// let p = props(&[("b", "2"), ("a", "1")]);
/// assert_eq!(p.keys().collect::<Vec<_>>(), ["a", "b"]);
/// ```
pub fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_without_modifier() {
        let record = PatternRecord {
            pattern: props(&[("b", "2"), ("a", "1")]),
            data: 7u32,
            modifier: None,
        };
        assert_eq!(
            serde_json::to_string(&record).expect("serialize"),
            r#"{"Match":{"a":"1","b":"2"},"Data":7}"#
        );
        assert_eq!(record.len(), 2);
        assert!(!record.is_empty());
    }
}
