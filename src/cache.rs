use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;
use tokio::task;
use tokio::time::{sleep, Duration};

pub struct Config {
    pub enabled: bool,
    pub ttl: Duration,
}

/// Rendered feeds keyed by request. Entries expire after `ttl`; a write to
/// the underlying data must call [`Cache::clear`].
///
/// Every `clear` bumps a generation counter. A value rendered from data read
/// before a clear is passed to [`Cache::insert_at`] with the generation seen
/// before reading, and is then returned without being stored.
pub struct Cache<K, V> {
    enabled: bool,
    inner: RwLock<HashMap<K, Arc<V>>>,
    generation: AtomicU64,
    ttl: Duration,
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + std::fmt::Display + 'static,
    V: Send + Sync + 'static,
{
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            enabled: config.enabled,
            ttl: config.ttl,
            inner: Default::default(),
            generation: AtomicU64::new(0),
        })
    }

    /// Capture this before reading the data a value is rendered from.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub async fn insert(self: Arc<Self>, key: K, value: V) -> Arc<V> {
        let generation = self.generation();
        self.insert_at(generation, key, value).await
    }

    /// Stores `value` unless the cache was cleared since `generation` was read.
    pub async fn insert_at(self: Arc<Self>, generation: u64, key: K, value: V) -> Arc<V> {
        let arcd = Arc::new(value);
        if !self.enabled {
            return arcd;
        }

        {
            let mut inner = self.inner.write().await;
            if self.generation.load(Ordering::Acquire) != generation {
                debug!("Not caching {key}, rendered before the last clear");
                return arcd;
            }
            debug!("Caching {key} for {}s", self.ttl.as_secs());
            inner.insert(key.clone(), Arc::clone(&arcd));
        }

        let self_clone = Arc::clone(&self);
        let expected = Arc::clone(&arcd);
        task::spawn(async move {
            sleep(self_clone.ttl).await;
            let mut inner = self_clone.inner.write().await;
            // a clear() followed by a fresh insert must survive the old timer
            if inner.get(&key).is_some_and(|current| Arc::ptr_eq(current, &expected)) {
                inner.remove(&key);
            }
        });

        arcd
    }

    pub async fn get(&self, key: &K) -> Option<Arc<V>> {
        if !self.enabled {
            return None;
        }

        self.inner.read().await.get(key).map(Arc::clone)
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        inner.clear();
    }
}
