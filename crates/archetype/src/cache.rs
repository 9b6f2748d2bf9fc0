use crate::config::CacheConfig;
use crate::matcher;
use crate::orders::FoldOrder;
use crate::types::TokenSequence;
use lru::LruCache;
use serde::Serialize;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Key of a whole-cluster result: the search configuration plus canonical members
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ClusterKey {
    pub(crate) fingerprint: Arc<str>,
    pub(crate) members: Vec<TokenSequence>,
}

/// Outcome of a whole-cluster search, kept so cache hits can report it too
#[derive(Debug, Clone)]
pub(crate) struct ClusterEntry {
    pub(crate) archetype: TokenSequence,
    pub(crate) score: usize,
    pub(crate) orders_tried: usize,
    pub(crate) truncated: bool,
    pub(crate) best_order: Option<FoldOrder>,
}

/// Hit/miss counters and occupancy of one memo table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub pairs: TableStats,
    pub clusters: TableStats,
}

struct Table<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, V>>,
    capacity: Option<NonZeroUsize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Hash + Eq, V: Clone> Table<K, V> {
    fn new(capacity: Option<usize>) -> Self {
        let capacity = capacity.and_then(NonZeroUsize::new);
        let entries = match capacity {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self {
            entries: Mutex::new(entries),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    // Entries are immutable values, so a panic elsewhere cannot leave one half-written.
    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get(&self, key: &K) -> Option<V> {
        let found = self.lock().get(key).cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store `value` unless a racing writer got there first; returns the stored value
    fn insert_if_absent(&self, key: K, value: V) -> V {
        let mut entries = self.lock();
        if let Some(existing) = entries.get(&key) {
            return existing.clone();
        }
        entries.put(key, value.clone());
        value
    }

    /// Look up `key`, computing and storing the value outside the lock on a miss
    fn get_or_insert_with(&self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let value = compute(&key);
        self.insert_if_absent(key, value)
    }

    fn clear(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    fn stats(&self) -> TableStats {
        TableStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: self.lock().len(),
            capacity: self.capacity.map(NonZeroUsize::get),
        }
    }
}

/// Memo tables for pairwise combines and whole clusters.
///
/// Ordered folds are not stored; each fold step is a lookup in the pair table.
/// Keys compare by value. The cache is safe to share between threads: each table
/// sits behind its own mutex and values are computed outside of it, so concurrent
/// searches at worst compute the same pure result twice and keep the first one.
pub struct MemoCache {
    pairs: Table<(TokenSequence, TokenSequence), TokenSequence>,
    clusters: Table<ClusterKey, ClusterEntry>,
}

impl MemoCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            pairs: Table::new(config.pair_capacity),
            clusters: Table::new(config.cluster_capacity),
        }
    }

    /// Cache that never evicts; suited to a one-shot batch over a bounded input
    pub fn unbounded() -> Self {
        Self::new(&CacheConfig::unbounded())
    }

    /// Memoized [`matcher::combine`]
    pub fn combine(&self, a: &TokenSequence, b: &TokenSequence) -> TokenSequence {
        self.pairs
            .get_or_insert_with((a.clone(), b.clone()), |(a, b)| matcher::combine(a, b))
    }

    /// Left fold of `ordered` with the memoized [`Self::combine`].
    ///
    /// A single sequence folds to itself; an empty slice folds to the empty sequence.
    pub fn fold(&self, ordered: &[TokenSequence]) -> TokenSequence {
        let mut rest = ordered.iter();
        let first = rest.next().cloned().unwrap_or_default();
        rest.fold(first, |acc, next| self.combine(&acc, next))
    }

    pub(crate) fn cluster(&self, key: &ClusterKey) -> Option<ClusterEntry> {
        self.clusters.get(key)
    }

    pub(crate) fn store_cluster(&self, key: ClusterKey, entry: ClusterEntry) -> ClusterEntry {
        self.clusters.insert_if_absent(key, entry)
    }

    /// Drop every entry and reset counters, starting a new batch scope
    pub fn clear(&self) {
        self.pairs.clear();
        self.clusters.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            pairs: self.pairs.stats(),
            clusters: self.clusters.stats(),
        }
    }
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn seq(text: &str) -> TokenSequence {
        TokenSequence::from_text(text)
    }

    #[test]
    fn combine_hit_returns_identical_result() {
        let cache = MemoCache::unbounded();
        let a = seq("the quick fox");
        let b = seq("the slow fox");

        let first = cache.combine(&a, &b);
        let second = cache.combine(&seq("the quick fox"), &seq("the slow fox"));

        assert!(first.ptr_eq(&second));
        let stats = cache.stats().pairs;
        assert_eq!((stats.hits, stats.misses, stats.len), (1, 1, 1));
    }

    #[test]
    fn pair_key_is_ordered() {
        let cache = MemoCache::unbounded();
        cache.combine(&seq("a b"), &seq("b a"));
        cache.combine(&seq("b a"), &seq("a b"));
        assert_eq!(cache.stats().pairs.len, 2);
    }

    #[test]
    fn fold_single_and_empty() {
        let cache = MemoCache::unbounded();
        let a = seq("only one");
        assert!(cache.fold(std::slice::from_ref(&a)).ptr_eq(&a));
        assert!(cache.fold(&[]).is_empty());
        assert_eq!(cache.stats().pairs.len, 0);
    }

    #[test]
    fn fold_reuses_pairwise_entries() {
        let cache = MemoCache::unbounded();
        let a = seq("the quick fox jumps");
        let b = seq("the slow fox jumps");
        let c = seq("the lazy fox jumps");

        assert_eq!(cache.fold(&[a.clone(), b.clone()]), seq("the fox jumps"));
        assert_eq!(cache.fold(&[a, b, c]), seq("the fox jumps"));

        let stats = cache.stats();
        // (a, b) computed once and hit by the three-way fold
        assert_eq!(stats.pairs.hits, 1);
        assert_eq!(stats.pairs.len, 2);
    }

    #[test]
    fn refolding_other_orders_only_adds_pairs() {
        let cache = MemoCache::unbounded();
        let a = seq("x1 shared tail");
        let b = seq("x2 shared tail");
        let c = seq("x3 shared tail");

        for order in [[&a, &b, &c], [&a, &c, &b], [&a, &b, &c]] {
            let ordered: Vec<TokenSequence> = order.into_iter().cloned().collect();
            assert_eq!(cache.fold(&ordered), seq("shared tail"));
        }

        // (a, b), (ab, c), (a, c), (ac, b); the repeated order is two pair hits
        let stats = cache.stats();
        assert_eq!(stats.pairs.len, 4);
        assert_eq!(stats.pairs.hits, 2);
        assert_eq!(stats.clusters.len, 0);
    }

    #[test]
    fn bounded_tables_evict_least_recently_used() {
        let cache = MemoCache::new(&CacheConfig {
            pair_capacity: Some(2),
            cluster_capacity: Some(2),
        });
        cache.combine(&seq("a"), &seq("a b"));
        cache.combine(&seq("b"), &seq("a b"));
        cache.combine(&seq("c"), &seq("a b"));

        let stats = cache.stats().pairs;
        assert_eq!(stats.len, 2);
        assert_eq!(stats.capacity, Some(2));
    }

    #[test]
    fn clear_resets_entries_and_counters() {
        let cache = MemoCache::unbounded();
        cache.combine(&seq("a"), &seq("a"));
        cache.combine(&seq("a"), &seq("a"));
        cache.clear();
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn concurrent_combines_agree() {
        let cache = Arc::new(MemoCache::unbounded());
        let a = seq("shared prefix one two three tail");
        let b = seq("shared prefix four two three tail");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let (a, b) = (a.clone(), b.clone());
                thread::spawn(move || cache.combine(&a, &b))
            })
            .collect();
        let results: Vec<TokenSequence> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for result in &results {
            assert_eq!(result, &seq("shared prefix two three tail"));
        }
        assert_eq!(cache.stats().pairs.len, 1);
    }
}
