//! Property tests for the get-or-create store, the sharing pool and the
//! result cache.

use proptest::prelude::*;
use stash_core::*;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

fn descriptor_key() -> impl Strategy<Value = DescriptorKey> {
    (
        prop::sample::select(vec!["Dell", "HP", "Lenovo"]),
        prop::sample::select(vec!["Studio XPS", "Envy", "ThinkPad"]),
        prop::sample::select(vec!["Intel", "AMD"]),
    )
        .prop_map(|(make, model, processor)| DescriptorKey::new(make, model, processor))
}

proptest! {
    #[test]
    fn store_len_equals_distinct_keys(keys in prop::collection::vec(0u16..64, 0..200)) {
        let calls = Cell::new(0usize);
        let mut store = KeyedStore::new();
        let mut previous_len = 0;

        for key in &keys {
            store.get_or_create(*key, |k| {
                calls.set(calls.get() + 1);
                u32::from(*k) * 2
            });
            let len = store.len();
            prop_assert!(len == previous_len || len == previous_len + 1);
            previous_len = len;
        }

        let distinct: HashSet<_> = keys.iter().collect();
        prop_assert_eq!(store.len(), distinct.len());
        prop_assert_eq!(calls.get(), distinct.len());
    }

    #[test]
    fn pool_returns_same_instance_for_equal_keys(keys in prop::collection::vec(descriptor_key(), 1..100)) {
        let mut pool = DescriptorPool::default();
        let mut first_seen: HashMap<DescriptorKey, Arc<Descriptor>> = HashMap::new();

        for key in keys {
            let shared = pool.get(key.clone());
            prop_assert_eq!(shared.key(), key.clone());
            let first = first_seen.entry(key).or_insert_with(|| Arc::clone(&shared));
            prop_assert!(Arc::ptr_eq(first, &shared));
        }

        prop_assert_eq!(pool.pool_size(), first_seen.len());
    }

    #[test]
    fn cache_resolves_each_key_at_most_once(keys in prop::collection::vec("[a-e]{1,2}", 0..100)) {
        let calls = Cell::new(0usize);
        let mut cache: ResultCache<String, _> = ResultCache::new(|key: &String| {
            calls.set(calls.get() + 1);
            format!("{key}:{}", calls.get())
        });
        let mut first_answers: HashMap<String, String> = HashMap::new();

        for key in keys {
            let answer = cache.resolve(key.clone()).clone();
            let expected = first_answers.entry(key).or_insert_with(|| answer.clone());
            prop_assert_eq!(&answer, expected);
        }

        prop_assert_eq!(calls.get(), first_answers.len());
        prop_assert_eq!(cache.cache_size(), first_answers.len());
    }

    #[test]
    fn collection_count_independent_of_pool(
        entries in prop::collection::vec((0usize..10, descriptor_key()), 0..60)
    ) {
        let mut pool = DescriptorPool::default();
        let mut computers = ComputerCollection::new(&mut pool);
        let mut tags = HashSet::new();
        let mut keys = HashSet::new();

        for (tag, key) in &entries {
            computers.add(format!("T{tag}"), key.clone(), "4G".to_string());
            tags.insert(*tag);
            keys.insert(key.clone());
        }

        prop_assert_eq!(computers.count(), entries.len());
        prop_assert_eq!(computers.len(), tags.len());
        prop_assert_eq!(computers.pool_size(), keys.len());
    }
}
