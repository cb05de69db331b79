//! Compute-once memo table.
//!
//! A miss computes the value without holding any lock and inserts it under
//! the write lock only if no other thread got there first, so concurrent
//! first-time lookups agree on a single stored value. Stored values never
//! change.

use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;

#[derive(Debug)]
pub(crate) struct MemoCache<K, V> {
    entries: RwLock<FxHashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> MemoCache<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Return the stored value for `key`, computing and storing it on a miss.
    ///
    /// `compute` may itself consult the cache.
    pub(crate) fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return value.clone();
        }
        let value = compute();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(value)
            .clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<K: Eq + Hash, V: Clone> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn computes_once_per_key() {
        let cache: MemoCache<u32, u32> = MemoCache::new();
        let calls = AtomicUsize::new(0);
        let compute = |v: u32| {
            calls.fetch_add(1, Ordering::SeqCst);
            v * 2
        };
        assert_eq!(cache.get_or_compute(3, || compute(3)), 6);
        assert_eq!(cache.get_or_compute(3, || compute(3)), 6);
        assert_eq!(cache.get_or_compute(4, || compute(4)), 8);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn first_insert_wins() {
        let cache: MemoCache<u32, &str> = MemoCache::new();
        assert_eq!(cache.get_or_compute(1, || "first"), "first");
        assert_eq!(cache.get_or_compute(1, || "second"), "first");
    }

    #[test]
    fn concurrent_population_agrees() {
        let cache: MemoCache<u32, usize> = MemoCache::new();
        let results: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let cache = &cache;
                    s.spawn(move || cache.get_or_compute(7, || i))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.len(), 1);
    }
}
