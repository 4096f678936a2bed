use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheInfo {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub len: usize,
}

struct Entries<K, V> {
    values: HashMap<K, (Arc<V>, u64)>,
    // last-use tick -> key, oldest first
    order: BTreeMap<u64, K>,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq + Clone, V> Entries<K, V> {
    fn new() -> Self {
        Self {
            values: HashMap::new(),
            order: BTreeMap::new(),
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn lookup(&mut self, key: &K) -> Option<Arc<V>> {
        let tick = self.next_tick();
        let (value, last_used) = self.values.get_mut(key)?;
        self.order.remove(&*last_used);
        *last_used = tick;
        self.order.insert(tick, key.clone());
        Some(value.clone())
    }

    /// Stores `value` unless another caller filled the slot first, and
    /// returns whichever value ends up cached.
    fn insert(&mut self, key: K, value: Arc<V>, capacity: usize) -> Arc<V> {
        if let Some(existing) = self.lookup(&key) {
            return existing;
        }
        while self.values.len() >= capacity {
            let Some((_, oldest)) = self.order.pop_first() else {
                break;
            };
            self.values.remove(&oldest);
            debug!(capacity, "evicted least recently used cache entry");
        }
        let tick = self.next_tick();
        self.order.insert(tick, key.clone());
        self.values.insert(key, (value.clone(), tick));
        value
    }
}

/// Bounded LRU memoizer that hands every caller its own clone of the cached
/// value, so callers can mutate results without touching the cache.
pub struct LruSafeCache<K, V> {
    func: Box<dyn Fn(&K) -> V + Send + Sync>,
    capacity: usize,
    entries: Mutex<Entries<K, V>>,
}

impl<K: Hash + Eq + Clone, V: Clone> LruSafeCache<K, V> {
    /// A `capacity` of zero disables caching; every call runs `func`.
    pub fn new(capacity: usize, func: impl Fn(&K) -> V + Send + Sync + 'static) -> Self {
        Self {
            func: Box::new(func),
            capacity,
            entries: Mutex::new(Entries::new()),
        }
    }

    pub fn get(&self, key: K) -> V {
        let shared = self.get_unsafe(key);
        (*shared).clone()
    }

    /// Returns the cached value itself. Mutating through interior mutability
    /// here changes what every later caller sees.
    pub fn get_unsafe(&self, key: K) -> Arc<V> {
        {
            let mut entries = self.entries();
            if let Some(value) = entries.lookup(&key) {
                entries.hits += 1;
                trace!("cache hit");
                return value;
            }
            entries.misses += 1;
            trace!("cache miss");
        }

        // user code runs without holding the lock
        let value = Arc::new((self.func)(&key));
        if self.capacity == 0 {
            return value;
        }
        self.entries().insert(key, value, self.capacity)
    }

    pub fn info(&self) -> CacheInfo {
        let entries = self.entries();
        CacheInfo {
            hits: entries.hits,
            misses: entries.misses,
            capacity: self.capacity,
            len: entries.values.len(),
        }
    }

    pub fn clear(&self) {
        *self.entries() = Entries::new();
    }

    fn entries(&self) -> MutexGuard<'_, Entries<K, V>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<K, V> fmt::Debug for LruSafeCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSafeCache")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

pub fn lru_safe_cache<K, V>(
    capacity: usize,
    func: impl Fn(&K) -> V + Send + Sync + 'static,
) -> LruSafeCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    LruSafeCache::new(capacity, func)
}
