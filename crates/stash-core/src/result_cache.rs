//! Memoizing result cache
//!
//! Stands in front of an expensive [`Resolver`] and remembers every answer it
//! gives. An answer of "nothing found" is still an answer and is cached like
//! any other; a resolver *error* is not, so the next request retries.
//! Cached answers never expire.

use crate::keyed_store::{KeyedStore, StoreStats};
use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace, warn};

/// Capability that answers a lookup for a key
pub trait Resolver<K> {
    /// The answer type; use `Option<T>` when a key may have no answer
    type Output;
    /// Failure type; `Infallible` for resolvers that always answer
    type Error;

    /// Look up the answer for `key`
    fn resolve(&self, key: &K) -> Result<Self::Output, Self::Error>;
}

impl<K, V, F> Resolver<K> for F
where
    F: Fn(&K) -> V,
{
    type Output = V;
    type Error = Infallible;

    fn resolve(&self, key: &K) -> Result<V, Infallible> {
        Ok(self(key))
    }
}

/// Cache memoizing a resolver's answers by input key
pub struct ResultCache<K, R>
where
    R: Resolver<K>,
{
    store: KeyedStore<K, R::Output>,
    resolver: R,
}

impl<K, R> ResultCache<K, R>
where
    K: Hash + Eq + fmt::Debug,
    R: Resolver<K>,
{
    /// Create an empty cache in front of `resolver`
    pub fn new(resolver: R) -> Self {
        Self::with_capacity(resolver, 0)
    }

    /// Create an empty cache sized for `capacity` distinct keys
    pub fn with_capacity(resolver: R, capacity: usize) -> Self {
        debug!(capacity, "Creating result cache");
        Self { store: KeyedStore::with_capacity(capacity), resolver }
    }

    /// Answer `key` from the cache, or from the resolver on first request.
    ///
    /// Only available for resolvers that cannot fail.
    pub fn resolve(&mut self, key: K) -> &R::Output
    where
        R: Resolver<K, Error = Infallible>,
    {
        match self.try_resolve(key) {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }

    /// Answer `key` from the cache, or from a fallible resolver on first
    /// request. Errors are passed through and leave the cache untouched.
    pub fn try_resolve(&mut self, key: K) -> Result<&R::Output, R::Error> {
        if self.store.contains_key(&key) {
            trace!(?key, "Cache hit");
        }

        let resolver = &self.resolver;
        self.store.try_get_or_create(key, |key| {
            debug!(?key, "Cache miss, invoking resolver");
            let answer = resolver.resolve(key);
            if answer.is_err() {
                warn!(?key, "Resolver failed; nothing cached");
            }
            answer
        })
    }

    /// Get a cached answer without ever calling the resolver
    pub fn cached<Q>(&self, key: &Q) -> Option<&R::Output>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.get(key)
    }

    /// Number of distinct keys with a cached answer
    pub fn cache_size(&self) -> usize {
        self.store.len()
    }

    /// How many times the underlying resolver has actually been invoked
    pub fn resolver_calls(&self) -> usize {
        self.store.stats().misses
    }

    /// Cache statistics
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    /// The resolver behind this cache
    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<K, R> fmt::Debug for ResultCache<K, R>
where
    K: Hash + Eq,
    R: Resolver<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCache").field("stats", &self.store.stats()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_resolver_called_once_per_key() {
        let calls = Cell::new(0);
        let mut cache: ResultCache<u64, _> = ResultCache::new(|n: &u64| {
            calls.set(calls.get() + 1);
            n * n
        });

        assert_eq!(*cache.resolve(12), 144);
        assert_eq!(*cache.resolve(12), 144);
        assert_eq!(*cache.resolve(3), 9);

        assert_eq!(calls.get(), 2);
        assert_eq!(cache.resolver_calls(), 2);
        assert_eq!(cache.cache_size(), 2);
    }

    #[test]
    fn test_empty_answers_are_cached() {
        let calls = Cell::new(0);
        let mut cache: ResultCache<String, _> = ResultCache::new(|name: &String| {
            calls.set(calls.get() + 1);
            (name == "known").then_some(1)
        });

        assert_eq!(*cache.resolve("unknown".to_string()), None);
        assert_eq!(*cache.resolve("unknown".to_string()), None);

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.cached("unknown"), Some(&None));
    }

    #[test]
    fn test_first_answer_sticks() {
        let counter = Cell::new(0);
        let mut cache: ResultCache<&str, _> = ResultCache::new(|_: &&str| {
            counter.set(counter.get() + 1);
            counter.get()
        });

        assert_eq!(*cache.resolve("k"), 1);
        assert_eq!(*cache.resolve("k"), 1);
        assert_eq!(*cache.resolve("other"), 2);
        assert_eq!(*cache.resolve("k"), 1);
    }

    struct Flaky {
        failures_left: Cell<u32>,
    }

    impl Resolver<String> for Flaky {
        type Output = usize;
        type Error = String;

        fn resolve(&self, key: &String) -> Result<usize, String> {
            let left = self.failures_left.get();
            if left > 0 {
                self.failures_left.set(left - 1);
                Err(format!("{key} unavailable"))
            } else {
                Ok(key.len())
            }
        }
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = ResultCache::new(Flaky { failures_left: Cell::new(2) });

        assert!(cache.try_resolve("Lisbon".to_string()).is_err());
        assert!(cache.try_resolve("Lisbon".to_string()).is_err());
        assert_eq!(cache.cache_size(), 0);

        assert_eq!(cache.try_resolve("Lisbon".to_string()), Ok(&6));
        assert_eq!(cache.try_resolve("Lisbon".to_string()), Ok(&6));

        assert_eq!(cache.resolver_calls(), 3);
        assert_eq!(cache.cache_size(), 1);
        assert_eq!(cache.stats().failures, 2);
    }
}
