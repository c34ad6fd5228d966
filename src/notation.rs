//! Compact string notation for property sets.
//!
//! `"a:1, b:2"` is shorthand for `{a: "1", b: "2"}`. Entries are separated by
//! `,`, names from values by `:`, and surrounding whitespace is trimmed. The
//! lenient parser used by [`NotationExt`] drops any entry that does not split
//! into exactly one name and one value; [`parse_properties_strict`] reports it
//! instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use matcher::{PatternRecord, PatternStore, Properties};

/// Errors reported by the strict notation parser.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("entry {index} ({entry:?}) is not a name{separator}value pair")]
    MalformedEntry {
        index: usize,
        entry: String,
        separator: char,
    },
    #[error("entry {index} has an empty property name")]
    EmptyName { index: usize },
    #[error("invalid notation config: {0}")]
    InvalidConfig(String),
}

/// Separators used by the notation parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotationConfig {
    #[serde(default = "NotationConfig::default_pair_separator")]
    pub pair_separator: char,
    #[serde(default = "NotationConfig::default_value_separator")]
    pub value_separator: char,
}

impl NotationConfig {
    pub(crate) fn default_pair_separator() -> char {
        ','
    }

    pub(crate) fn default_value_separator() -> char {
        ':'
    }

    pub fn validate(&self) -> Result<(), NotationError> {
        if self.pair_separator == self.value_separator {
            return Err(NotationError::InvalidConfig(
                "pair_separator and value_separator must differ".into(),
            ));
        }
        if self.pair_separator.is_whitespace() || self.value_separator.is_whitespace() {
            return Err(NotationError::InvalidConfig(
                "separators must not be whitespace".into(),
            ));
        }
        Ok(())
    }

    /// Parse, skipping malformed entries.
    pub fn parse(&self, notation: &str) -> Properties {
        let mut properties = Properties::new();
        for (index, entry) in self.entries(notation) {
            match self.split_entry(index, entry) {
                Ok((name, value)) => {
                    properties.insert(name.to_string(), value.to_string());
                }
                Err(err) => warn!(error = %err, "notation_entry_skipped"),
            }
        }
        properties
    }

    /// Parse, failing on the first malformed entry.
    pub fn parse_strict(&self, notation: &str) -> Result<Properties, NotationError> {
        let mut properties = Properties::new();
        for (index, entry) in self.entries(notation) {
            let (name, value) = self.split_entry(index, entry)?;
            properties.insert(name.to_string(), value.to_string());
        }
        Ok(properties)
    }

    fn entries<'a>(&self, notation: &'a str) -> impl Iterator<Item = (usize, &'a str)> {
        notation
            .split(self.pair_separator)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .enumerate()
    }

    fn split_entry<'a>(
        &self,
        index: usize,
        entry: &'a str,
    ) -> Result<(&'a str, &'a str), NotationError> {
        let mut parts = entry.split(self.value_separator);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(value), None) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(NotationError::EmptyName { index });
                }
                Ok((name, value.trim()))
            }
            _ => Err(NotationError::MalformedEntry {
                index,
                entry: entry.to_string(),
                separator: self.value_separator,
            }),
        }
    }
}

impl Default for NotationConfig {
    fn default() -> Self {
        Self {
            pair_separator: Self::default_pair_separator(),
            value_separator: Self::default_value_separator(),
        }
    }
}

/// Lenient parse with the default separators.
///
/// ```
/// let p = propmatch::parse_properties("b:2, a : 1, junk, c:3:4");
/// assert_eq!(p, propmatch::props(&[("a", "1"), ("b", "2")]));
/// ```
pub fn parse_properties(notation: &str) -> Properties {
    NotationConfig::default().parse(notation)
}

/// Strict parse with the default separators.
pub fn parse_properties_strict(notation: &str) -> Result<Properties, NotationError> {
    NotationConfig::default().parse_strict(notation)
}

/// String-notation shorthands for [`PatternStore`] operations.
pub trait NotationExt<T> {
    fn add_str(&mut self, notation: &str, data: T) -> &mut Self;
    fn remove_str(&mut self, notation: &str);
    fn find_str(&self, notation: &str) -> Option<T>;
    fn find_exact_str(&self, notation: &str) -> Option<T>;
    fn list_str(&self, notation: &str, exact: bool) -> Vec<PatternRecord<T>>;
}

impl<T: Clone> NotationExt<T> for PatternStore<T> {
    fn add_str(&mut self, notation: &str, data: T) -> &mut Self {
        self.add(parse_properties(notation), data)
    }

    fn remove_str(&mut self, notation: &str) {
        self.remove(&parse_properties(notation));
    }

    fn find_str(&self, notation: &str) -> Option<T> {
        self.find(&parse_properties(notation))
    }

    fn find_exact_str(&self, notation: &str) -> Option<T> {
        self.find_exact(&parse_properties(notation))
    }

    fn list_str(&self, notation: &str, exact: bool) -> Vec<PatternRecord<T>> {
        self.list(Some(&parse_properties(notation)), exact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcher::props;

    #[test]
    fn parses_trimmed_pairs() {
        assert_eq!(
            parse_properties(" a:1 ,b: 2,  c :3 "),
            props(&[("a", "1"), ("b", "2"), ("c", "3")])
        );
    }

    #[test]
    fn empty_input_is_empty_set() {
        assert!(parse_properties("").is_empty());
        assert!(parse_properties(" , ,").is_empty());
        assert_eq!(parse_properties_strict("  "), Ok(Properties::new()));
    }

    #[test]
    fn lenient_parse_skips_malformed_entries() {
        assert_eq!(
            parse_properties("a:1, nocolon, b:2:3, c:3"),
            props(&[("a", "1"), ("c", "3")])
        );
    }

    #[test]
    fn empty_values_are_kept() {
        assert_eq!(parse_properties("a:"), props(&[("a", "")]));
    }

    #[test]
    fn strict_parse_reports_first_bad_entry() {
        let err = parse_properties_strict("a:1, nocolon, b:2:3").expect_err("malformed");
        assert_eq!(
            err,
            NotationError::MalformedEntry {
                index: 1,
                entry: "nocolon".to_string(),
                separator: ':',
            }
        );
        assert_eq!(
            parse_properties_strict(":1"),
            Err(NotationError::EmptyName { index: 0 })
        );
    }

    #[test]
    fn custom_separators() {
        let cfg = NotationConfig {
            pair_separator: ';',
            value_separator: '=',
        };
        cfg.validate().expect("valid config");
        assert_eq!(cfg.parse("a=1; b=x:y"), props(&[("a", "1"), ("b", "x:y")]));
    }

    #[test]
    fn clashing_separators_rejected() {
        let cfg = NotationConfig {
            pair_separator: ':',
            value_separator: ':',
        };
        assert!(matches!(
            cfg.validate(),
            Err(NotationError::InvalidConfig(msg)) if msg.contains("must differ")
        ));
    }

    #[test]
    fn store_shorthands() {
        let mut store: PatternStore<&str> = PatternStore::new();
        store.add_str("p1:v1", "r1").add_str("p1:v1, p2:v2", "r2");

        assert_eq!(store.find_str("p1:v1,p2:x"), Some("r1"));
        assert_eq!(store.find_str("p2:v2, p1:v1"), Some("r2"));
        assert_eq!(store.find_exact_str("p1:v1,p2:x"), None);
        assert_eq!(store.list_str("p1:v1, p2:*", false).len(), 1);

        store.remove_str("p1:v1,p2:v2");
        assert_eq!(store.find_str("p1:v1,p2:v2"), Some("r1"));
    }
}
