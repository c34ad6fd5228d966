//! # Propmatch Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` answers *query-by-example* lookups over flat string property
//! sets. Register partial patterns with data attached, then ask which pattern
//! a subject satisfies most specifically:
//!
//! ```text
//! { x:1      } -> A
//! { x:1, y:1 } -> B
//! { x:1, y:2 } -> C
//!
//! find { x:1 }       -> A
//! find { x:1, y:1 }  -> B
//! find { x:1, y:9 }  -> A    (y:9 has no branch; falls back)
//! find { x:2 }       -> none
//! ```
//!
//! ## Core Types
//!
//! - [`PatternStore`]: the engine. `add`, `find`, `find_exact`, `remove`,
//!   `list`.
//! - [`PatternTree`]: arena of alternating key/value nodes, addressed by
//!   [`NodeId`]. Paths are built in sorted key order, so insertion order of
//!   properties never matters.
//! - [`PatternRecord`]: one registered pattern as returned by `list`.
//! - [`Customizer`] / [`Modifier`]: caller hooks around add, find and remove.
//! - [`SharedStore`]: `RwLock`-guarded handle for multi-threaded use.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{props, PatternStore};
//!
//! let mut store = PatternStore::new();
//! store
//!     .add(props(&[("a", "1")]), "A")
//!     .add(props(&[("a", "1"), ("b", "2")]), "B");
//!
//! assert_eq!(store.find(&props(&[("a", "1")])), Some("A"));
//! assert_eq!(store.find(&props(&[("b", "2"), ("a", "1")])), Some("B"));
//! assert_eq!(store.find(&props(&[("a", "1"), ("b", "9")])), Some("A"));
//! assert_eq!(store.find_exact(&props(&[("a", "1"), ("b", "9")])), None);
//!
//! let listed = store.list(Some(&props(&[("b", "*")])), false);
//! assert_eq!(listed.len(), 1);
//! assert_eq!(listed[0].data, "B");
//! ```
//!
//! ## Concurrency
//!
//! A bare [`PatternStore`] has no internal locking. Mutation needs `&mut`, so
//! sharing one across threads means wrapping it; [`SharedStore`] does that
//! with a single-writer, many-reader lock.
//!
//! ## Observability
//!
//! Operations emit `tracing` events (`pattern_add`, `pattern_find`, ...).
//! Install a [`StoreMetrics`] implementation via [`set_store_metrics`] to
//! record lookup latency and hit rates.

pub mod engine;
pub mod glob;
pub mod hooks;
pub mod metrics;
pub mod shared;
pub mod tree;
pub mod types;

pub use crate::engine::PatternStore;
pub use crate::glob::{glob_match, glob_to_regex};
pub use crate::hooks::{Customizer, Modifier};
pub use crate::metrics::{set_store_metrics, StoreMetrics};
pub use crate::shared::SharedStore;
pub use crate::tree::{Node, NodeId, NodeKind, PatternTree};
pub use crate::types::{props, PatternRecord, Properties};
