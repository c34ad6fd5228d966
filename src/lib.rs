//! Workspace umbrella crate for propmatch.
//!
//! Re-exports the pattern engine from the `matcher` crate and layers the
//! string notation, rendering, and YAML configuration adapters on top of it,
//! so callers can work from a single entry point:
//!
//! ```
//! use propmatch::{describe, NotationExt, PatternStore};
//!
//! let mut store: PatternStore<String> = PatternStore::new();
//! store.add_str("a:1", "A".to_string()).add_str("a:1, b:2", "B".to_string());
//!
//! assert_eq!(store.find_str("a:1, b:2, c:3"), Some("B".to_string()));
//! assert_eq!(store.find_exact_str("a:1, c:3"), None);
//! assert_eq!(describe(&store), "a:1 -> <A>\na:1, b:2 -> <B>");
//! ```

pub mod config;
pub mod notation;
pub mod render;

pub use matcher::{
    glob_match, glob_to_regex, props, set_store_metrics, Customizer, Modifier, NodeId, NodeKind,
    PatternRecord, PatternStore, PatternTree, Properties, SharedStore, StoreMetrics,
};

pub use crate::config::{ConfigLoadError, ListYamlConfig, PatternYamlEntry, PropmatchConfig};
pub use crate::notation::{
    parse_properties, parse_properties_strict, NotationConfig, NotationError, NotationExt,
};
pub use crate::render::{describe, describe_with, format_pattern, to_json};
