//! Thread-safe handle around a [`PatternStore`].
//!
//! Lookups take the read side of an `RwLock`, mutations the write side, so
//! any number of readers may run together but never alongside a writer.
//! A poisoned lock (a hook panicked mid-operation) is recovered, not propagated.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::engine::PatternStore;
use crate::hooks::Customizer;
use crate::types::{PatternRecord, Properties};

/// Cloneable, lock-protected [`PatternStore`].
pub struct SharedStore<T> {
    inner: Arc<RwLock<PatternStore<T>>>,
}

impl<T> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedStore<T> {
    fn default() -> Self {
        Self::new(PatternStore::new())
    }
}

impl<T> From<PatternStore<T>> for SharedStore<T> {
    fn from(store: PatternStore<T>) -> Self {
        Self::new(store)
    }
}

impl<T> SharedStore<T> {
    pub fn new(store: PatternStore<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn with_customizer(customizer: Arc<dyn Customizer<T>>) -> Self {
        Self::new(PatternStore::with_customizer(customizer))
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, PatternStore<T>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, PatternStore<T>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` with shared access. Other readers may run concurrently.
    pub fn read<R>(&self, f: impl FnOnce(&PatternStore<T>) -> R) -> R {
        f(&self.read_guard())
    }

    /// Run `f` with exclusive access, e.g. to apply several adds atomically.
    pub fn write<R>(&self, f: impl FnOnce(&mut PatternStore<T>) -> R) -> R {
        f(&mut self.write_guard())
    }

    pub fn add(&self, properties: Properties, data: T) {
        self.write_guard().add(properties, data);
    }

    pub fn remove(&self, properties: &Properties) {
        self.write_guard().remove(properties);
    }

    pub fn list(&self, constraints: Option<&Properties>, exact: bool) -> Vec<PatternRecord<T>>
    where
        T: Clone,
    {
        self.read_guard().list(constraints, exact)
    }

    pub fn pattern_count(&self) -> usize {
        self.read_guard().pattern_count()
    }

    /// Unwrap the store if this is the last handle.
    pub fn try_into_inner(self) -> Result<PatternStore<T>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner())),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStore")
            .field("store", &*self.read_guard())
            .finish()
    }
}

impl<T: Clone> SharedStore<T> {
    pub fn find(&self, subject: &Properties) -> Option<T> {
        self.read_guard().find(subject)
    }

    pub fn find_exact(&self, subject: &Properties) -> Option<T> {
        self.read_guard().find_exact(subject)
    }
}
