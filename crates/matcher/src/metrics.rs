//! Lookup instrumentation.
//!
//! A process holds at most one [`StoreMetrics`] observer. Every
//! [`PatternStore`](crate::PatternStore) reports its `find`, `find_exact` and
//! `list` calls to it. While no observer is installed the reporting path is a
//! single uncontended read lock.
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for store lookups.
pub trait StoreMetrics: Send + Sync {
    /// Record the outcome of a `find` (`exact == false`) or `find_exact`.
    ///
    /// `hit` is whether a value was returned to the caller after the modifier,
    /// if any, ran.
    fn record_find(&self, exact: bool, latency: Duration, hit: bool);

    /// Record a `list` call and the number of records it produced.
    fn record_list(&self, latency: Duration, count: usize);
}

type ObserverSlot = RwLock<Option<Arc<dyn StoreMetrics>>>;

static OBSERVER: OnceCell<ObserverSlot> = OnceCell::new();

fn slot() -> &'static ObserverSlot {
    OBSERVER.get_or_init(|| RwLock::new(None))
}

/// The observer stores should report to, if one is installed.
pub(crate) fn installed_observer() -> Option<Arc<dyn StoreMetrics>> {
    let guard = slot().read().unwrap_or_else(PoisonError::into_inner);
    guard.clone()
}

/// Replace the process-wide observer. `None` turns reporting off.
///
/// Stores read the slot on every call, so an observer installed after a
/// store was built still sees that store's lookups.
pub fn set_store_metrics(recorder: Option<Arc<dyn StoreMetrics>>) {
    let mut guard = slot().write().unwrap_or_else(PoisonError::into_inner);
    *guard = recorder;
}
