//! A small TTL cache for live API responses.
//!
//! The clock is injected so expiry can be tested without sleeping.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Source of monotonic time for the cache.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Test use.
#[derive(Clone)]
pub struct ManualClock {
    offset: Arc<RwLock<Duration>>,
    origin: Instant,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            offset: Arc::new(RwLock::new(Duration::ZERO)),
            origin: Instant::now(),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.write() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.read()
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Thread-safe map with per-cache TTL eviction on read.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the cached value if it has not expired. Expired entries
    /// are dropped on the spot.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        self.entries.write().remove(key);
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.entries.write().insert(
            key,
            Entry {
                value,
                inserted_at: self.clock.now(),
            },
        );
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k".to_string(), 1u32);
        assert_eq!(cache.get(&"k".to_string()), Some(1));
    }

    #[test]
    fn test_entry_expires() {
        let clock = ManualClock::new();
        let cache =
            TtlCache::with_clock(Duration::from_secs(60), Arc::new(clock.clone()));
        cache.insert("k".to_string(), 1u32);

        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get(&"k".to_string()), Some(1));

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get(&"k".to_string()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_refreshes_age() {
        let clock = ManualClock::new();
        let cache =
            TtlCache::with_clock(Duration::from_secs(10), Arc::new(clock.clone()));
        cache.insert("k".to_string(), 1u32);
        clock.advance(Duration::from_secs(8));
        cache.insert("k".to_string(), 2u32);
        clock.advance(Duration::from_secs(8));
        assert_eq!(cache.get(&"k".to_string()), Some(2));
    }

    #[test]
    fn test_manual_clock_clones_share_the_offset() {
        let clock = ManualClock::default();
        let view = clock.clone();
        clock.advance(Duration::from_secs(5));
        assert_eq!(view.now(), clock.now());
    }

    #[test]
    fn test_missing_key() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get(&"absent".to_string()), None);
    }
}
