//! Shared value pool
//!
//! Deduplicates immutable values by key: the first request for a key builds
//! the value through the pool's [`Constructor`], every later request for an
//! equal key gets a handle to that same allocation.

use crate::keyed_store::{KeyedStore, StoreStats};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Capability that builds the shared value for a key
pub trait Constructor<K> {
    /// The value type held by the pool
    type Value;

    /// Build the value identified by `key`
    fn construct(&self, key: &K) -> Self::Value;
}

impl<K, V, F> Constructor<K> for F
where
    F: Fn(&K) -> V,
{
    type Value = V;

    fn construct(&self, key: &K) -> V {
        self(key)
    }
}

/// Pool handing out one shared instance per distinct key
pub struct SharedValuePool<K, C>
where
    C: Constructor<K>,
{
    store: KeyedStore<K, Arc<C::Value>>,
    constructor: C,
}

impl<K, C> SharedValuePool<K, C>
where
    K: Hash + Eq + fmt::Debug,
    C: Constructor<K>,
{
    /// Create an empty pool that builds values with `constructor`
    pub fn new(constructor: C) -> Self {
        Self::with_capacity(constructor, 0)
    }

    /// Create an empty pool sized for `capacity` distinct keys
    pub fn with_capacity(constructor: C, capacity: usize) -> Self {
        debug!(capacity, "Creating shared value pool");
        Self { store: KeyedStore::with_capacity(capacity), constructor }
    }

    /// Get the shared value for `key`, building it on first request.
    ///
    /// Equal keys always yield handles to the same allocation
    /// (`Arc::ptr_eq` holds between them).
    pub fn get(&mut self, key: K) -> Arc<C::Value> {
        let constructor = &self.constructor;
        let shared = self.store.get_or_create(key, |key| {
            debug!(?key, "Constructing new shared value");
            Arc::new(constructor.construct(key))
        });
        Arc::clone(shared)
    }

    /// Get the shared value for `key` only if it was already built
    pub fn peek<Q>(&self, key: &Q) -> Option<Arc<C::Value>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.get(key).map(Arc::clone)
    }

    /// Number of distinct values built so far
    pub fn pool_size(&self) -> usize {
        self.store.len()
    }

    /// Sharing statistics; `hits` counts requests served by an existing value
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    /// Iterate over the pooled values in arbitrary order
    pub fn values(&self) -> impl Iterator<Item = &Arc<C::Value>> {
        self.store.iter().map(|(_, value)| value)
    }
}

impl<K, C> Default for SharedValuePool<K, C>
where
    K: Hash + Eq + fmt::Debug,
    C: Constructor<K> + Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<K, C> fmt::Debug for SharedValuePool<K, C>
where
    C: Constructor<K>,
    K: Hash + Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedValuePool").field("stats", &self.store.stats()).finish()
    }
}
