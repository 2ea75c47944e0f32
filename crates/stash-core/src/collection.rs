//! Tagged record collection
//!
//! Records pair a caller-chosen tag with a pooled descriptor plus fields of
//! their own. The descriptor comes from a [`SharedValuePool`] that the caller
//! owns and lends to the collection, so any number of records may point at
//! the same descriptor while the pool stays the single owner of sharing state.

use crate::shared_pool::{Constructor, SharedValuePool};
use ahash::RandomState;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// A tagged record referencing a shared descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Record<V, X> {
    tag: String,
    descriptor: Arc<V>,
    extra: X,
}

impl<V, X> Record<V, X> {
    /// The tag this record is stored under
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The shared descriptor
    pub fn descriptor(&self) -> &Arc<V> {
        &self.descriptor
    }

    /// Record-specific fields that are not part of the sharing key
    pub fn extra(&self) -> &X {
        &self.extra
    }

    /// Whether both records point at the very same descriptor instance
    pub fn shares_descriptor_with<Y>(&self, other: &Record<V, Y>) -> bool {
        Arc::ptr_eq(&self.descriptor, &other.descriptor)
    }
}

/// Collection of records whose descriptors come from a borrowed pool
pub struct Collection<'p, K, C, X>
where
    C: Constructor<K>,
{
    pool: &'p mut SharedValuePool<K, C>,
    records: HashMap<String, Record<C::Value, X>, RandomState>,
    added: usize,
}

impl<'p, K, C, X> Collection<'p, K, C, X>
where
    K: Hash + Eq + fmt::Debug,
    C: Constructor<K>,
{
    /// Create an empty collection drawing descriptors from `pool`
    pub fn new(pool: &'p mut SharedValuePool<K, C>) -> Self {
        Self { pool, records: HashMap::with_hasher(RandomState::new()), added: 0 }
    }

    /// Add a record under `tag` with the descriptor for `key`.
    ///
    /// An existing record with the same tag is replaced and returned. The
    /// pool is consulted either way, so replacing never changes which
    /// descriptors exist.
    pub fn add(&mut self, tag: impl Into<String>, key: K, extra: X) -> Option<Record<C::Value, X>> {
        let tag = tag.into();
        let descriptor = self.pool.get(key);
        self.added += 1;

        let record = Record { tag: tag.clone(), descriptor, extra };
        let replaced = self.records.insert(tag, record);
        if let Some(old) = &replaced {
            debug!(tag = old.tag(), "Replaced existing record");
        }
        replaced
    }

    /// Get the record stored under `tag`, or `None` if it was never added
    pub fn get(&self, tag: &str) -> Option<&Record<C::Value, X>> {
        self.records.get(tag)
    }

    /// Total number of `add` calls, including ones that replaced a record
    pub fn count(&self) -> usize {
        self.added
    }

    /// Number of distinct tags currently held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no record has been added
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in arbitrary order
    pub fn records(&self) -> impl Iterator<Item = &Record<C::Value, X>> {
        self.records.values()
    }

    /// The pool descriptors are drawn from
    pub fn pool(&self) -> &SharedValuePool<K, C> {
        &*self.pool
    }

    /// Distinct descriptors in the backing pool
    pub fn pool_size(&self) -> usize {
        self.pool.pool_size()
    }
}

impl<K, C, X> fmt::Debug for Collection<'_, K, C, X>
where
    K: Hash + Eq,
    C: Constructor<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("records", &self.records.len())
            .field("added", &self.added)
            .field("pool", &self.pool)
            .finish()
    }
}
