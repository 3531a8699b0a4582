use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::search::results::SearchResults;

/// Query cache for avoiding recomputation
///
/// Entries are only valid for the index version they were computed on;
/// the owner clears the cache whenever a new version is applied.
pub struct QueryCache {
    cache: Option<Mutex<LruCache<QueryKey, SearchResults>>>,   // None when disabled
    pub hit_count: AtomicUsize,
    pub miss_count: AtomicUsize,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct QueryKey {
    pub query: String,
    pub limit: usize,
}

impl QueryKey {
    pub fn new(query: &str, limit: usize) -> Self {
        QueryKey {
            query: query.to_string(),
            limit,
        }
    }
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        QueryCache {
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            hit_count: AtomicUsize::new(0),
            miss_count: AtomicUsize::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn get(&self, key: &QueryKey) -> Option<SearchResults> {
        let cache = self.cache.as_ref()?;
        match cache.lock().get(key) {
            Some(results) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                Some(results.clone())
            }
            None => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn put(&self, key: QueryKey, results: SearchResults) {
        if let Some(cache) = &self.cache {
            cache.lock().put(key, results);
        }
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    pub fn len(&self) -> usize {
        self.cache.as_ref().map(|c| c.lock().len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            size: self.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss_accounting() {
        let cache = QueryCache::new(2);
        let key = QueryKey::new("apple", 10);
        assert!(cache.get(&key).is_none());
        cache.put(key.clone(), SearchResults::empty());
        assert_eq!(cache.get(&key), Some(SearchResults::empty()));

        let stats = cache.stats();
        assert_eq!((stats.hit_count, stats.miss_count, stats.size), (1, 1, 1));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let cache = QueryCache::new(0);
        cache.put(QueryKey::new("apple", 1), SearchResults::empty());
        assert!(!cache.is_enabled());
        assert!(cache.get(&QueryKey::new("apple", 1)).is_none());
        assert_eq!(cache.stats().miss_count, 0);
    }
}
