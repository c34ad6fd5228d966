//! Wildcard value patterns used by `list` constraints.
//!
//! `*` matches any run of characters (including none), `?` matches exactly one
//! character, everything else matches itself. Matching is case-sensitive and
//! anchored at both ends.
//!
//! Two adjacent wildcards are an escape rather than a combination: `**` stands
//! for a literal `*` and `*?` for a literal `?`. The translation expands every
//! wildcard first and then folds those placeholder pairs back into escaped
//! literals, scanning left to right without overlap.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use regex::Regex;
use tracing::warn;

const ANY_RUN: &str = r"[\s\S]*";
const ANY_ONE: &str = r"[\s\S]";
const REGEX_CACHE_MAX: usize = 1024;

static REGEX_CACHE: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();

/// Translate a glob into an anchored regular expression source.
///
/// ```
/// assert_eq!(matcher::glob_to_regex("a*"), r"^a[\s\S]*$");
/// assert_eq!(matcher::glob_to_regex("**"), r"^\*$");
/// ```
pub fn glob_to_regex(pattern: &str) -> String {
    let escaped = regex::escape(pattern)
        .replace(r"\*", ANY_RUN)
        .replace(r"\?", ANY_ONE);

    let folded = escaped
        .replace(&format!("{ANY_RUN}{ANY_RUN}"), r"\*")
        .replace(&format!("{ANY_RUN}{ANY_ONE}"), r"\?");

    format!("^{folded}$")
}

/// True when `value` satisfies the glob `pattern` as a whole.
pub fn glob_match(pattern: &str, value: &str) -> bool {
    if !pattern.contains(['*', '?']) {
        return pattern == value;
    }
    match cached_regex(pattern) {
        Some(re) => re.is_match(value),
        None => false,
    }
}

fn cached_regex(pattern: &str) -> Option<Regex> {
    let cache = REGEX_CACHE.get_or_init(|| RwLock::new(HashMap::new()));

    {
        let guard = cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(re) = guard.get(pattern) {
            return Some(re.clone());
        }
    }

    let source = glob_to_regex(pattern);
    let compiled = match Regex::new(&source) {
        Ok(re) => re,
        Err(err) => {
            warn!(pattern, error = %err, "glob_compile_failure");
            return None;
        }
    };

    let mut guard = cache
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if guard.len() >= REGEX_CACHE_MAX {
        guard.clear();
    }
    guard
        .entry(pattern.to_string())
        .or_insert_with(|| compiled.clone());
    Some(compiled)
}
