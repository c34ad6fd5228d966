//! Caller-supplied extension points.
//!
//! A [`Customizer`] is installed once per store and sees every `add`. It may
//! rewrite the property set before it is canonicalized, and it may hand back a
//! [`Modifier`] that is stored alongside the pattern's data. The modifier is
//! consulted again at lookup time (to post-process the result) and at removal
//! time (to allow or veto the deletion).
//!
//! Hooks are plain synchronous calls. A panic inside a hook propagates to the
//! caller of the store operation unchanged.

use std::sync::Arc;

use crate::engine::PatternStore;
use crate::types::Properties;

/// Intercepts [`PatternStore::add`].
pub trait Customizer<T>: Send + Sync {
    /// Called before the pattern is inserted.
    ///
    /// `properties` may be mutated in place; the mutated set is the one that
    /// gets canonicalized and stored. The returned modifier, if any, is attached
    /// to the terminal node together with `data`.
    fn add(
        &self,
        store: &PatternStore<T>,
        properties: &mut Properties,
        data: &T,
    ) -> Option<Arc<dyn Modifier<T>>>;
}

/// Per-pattern behaviour attached at registration time.
pub trait Modifier<T>: Send + Sync {
    /// Final step of `find`/`find_exact`.
    ///
    /// `data` is the candidate result (already `None` when an exact lookup was
    /// rejected). The return value is what the caller receives.
    fn find(&self, store: &PatternStore<T>, properties: &Properties, data: Option<&T>)
        -> Option<T>;

    /// Called by `remove` with the stored data. Returning `false` keeps the
    /// pattern registered.
    fn remove(&self, store: &PatternStore<T>, properties: &Properties, data: Option<&T>) -> bool;
}

impl<T, F> Customizer<T> for F
where
    F: Fn(&PatternStore<T>, &mut Properties, &T) -> Option<Arc<dyn Modifier<T>>> + Send + Sync,
{
    fn add(
        &self,
        store: &PatternStore<T>,
        properties: &mut Properties,
        data: &T,
    ) -> Option<Arc<dyn Modifier<T>>> {
        self(store, properties, data)
    }
}
