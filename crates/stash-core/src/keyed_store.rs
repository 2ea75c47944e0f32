//! Get-or-create keyed store
//!
//! The store underneath both the sharing pool and the result cache. Values
//! are created lazily by a caller-supplied factory the first time a key is
//! requested and are never removed afterwards, so the number of entries only
//! ever grows.

use ahash::RandomState;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Associative store with create-if-absent semantics and no eviction
#[derive(Debug, Clone)]
pub struct KeyedStore<K, V> {
    entries: HashMap<K, V, RandomState>,
    hits: usize,
    misses: usize,
    failures: usize,
}

impl<K, V> KeyedStore<K, V>
where
    K: Hash + Eq,
{
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty store with room for `capacity` keys before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            hits: 0,
            misses: 0,
            failures: 0,
        }
    }

    /// Return the value stored under `key`, creating it with `factory` first
    /// if the key is absent.
    ///
    /// `factory` runs at most once per key for the lifetime of the store.
    pub fn get_or_create<F>(&mut self, key: K, factory: F) -> &V
    where
        F: FnOnce(&K) -> V,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                let value = factory(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Fallible form of [`get_or_create`](Self::get_or_create).
    ///
    /// A factory error is returned as-is and nothing is inserted, so the next
    /// request for the same key runs the factory again.
    pub fn try_get_or_create<F, E>(&mut self, key: K, factory: F) -> Result<&V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                match factory(entry.key()) {
                    Ok(value) => Ok(entry.insert(value)),
                    Err(err) => {
                        self.failures += 1;
                        Err(err)
                    }
                }
            }
        }
    }

    /// Look up a stored value without creating it
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Check whether a value has been stored under `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored keys in arbitrary order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Iterate over the stored entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    /// Get store statistics
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            failures: self.failures,
        }
    }
}

impl<K, V> Default for KeyedStore<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Store statistics for monitoring and reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Distinct keys currently stored
    pub entries: usize,
    /// Requests answered from the store
    pub hits: usize,
    /// Requests that ran the factory, successfully or not
    pub misses: usize,
    /// Factory runs that returned an error
    pub failures: usize,
}

impl StoreStats {
    /// Total get-or-create requests served
    pub fn requests(&self) -> usize {
        self.hits + self.misses
    }

    /// Percentage of requests answered without running the factory
    pub fn hit_rate(&self) -> f64 {
        let total = self.requests();
        if total == 0 { 0.0 } else { (self.hits as f64 / total as f64) * 100.0 }
    }
}
