// crates/serve/src/cache.rs

//! Keyed, time-boxed cache around fetch-and-map operations.
//!
//! Keys are `[type, locale, ...identifiers]`. Every entry lives for the same
//! revalidation window. A producer error is returned to the caller and never
//! stored, so the next call runs the producer again. Concurrent misses on one
//! key both run the producer; whichever write lands last wins. Expired entries
//! are dropped when a lookup finds them stale and swept on every insert, so
//! the map never outgrows one window of distinct keys.

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use domain::{setting::DEFAULT_REVALIDATE_SECS, Locale};

use crate::Result;

pub type CacheKey = Vec<String>;

/// Build a cache key. Identifiers must be included whenever the cached value
/// depends on them.
pub fn key(kind: &str, locale: Option<Locale>, ids: &[&str]) -> CacheKey {
    let mut key = Vec::with_capacity(2 + ids.len());
    key.push(kind.to_owned());
    if let Some(locale) = locale {
        key.push(locale.code().to_owned());
    }
    key.extend(ids.iter().map(|id| (*id).to_owned()));
    key
}

struct Entry {
    stored: Instant,
    ttl: Duration,
    value: Arc<dyn Any + Send + Sync>,
}

pub struct Cache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, Entry>>,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_REVALIDATE_SECS))
    }
}

impl Cache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every entry; the next call for each key runs its producer.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Return the fresh value under `key`, or run `producer` and store its
    /// success for the cache's revalidation window.
    pub async fn cached<T, F, Fut>(&self, key: CacheKey, producer: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.cached_for(key, self.ttl, producer).await
    }

    /// Like [`cached`](Self::cached) with an explicit window.
    pub async fn cached_for<T, F, Fut>(&self, key: CacheKey, ttl: Duration, producer: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.lookup::<T>(&key, ttl) {
            debug!(?key, "cache hit");
            return Ok(hit);
        }

        debug!(?key, "cache miss");
        let value = producer().await?;

        let now = Instant::now();
        let mut entries = self.entries.write();
        entries.retain(|_, entry| now.duration_since(entry.stored) < entry.ttl);
        entries.insert(
            key,
            Entry {
                stored: now,
                ttl,
                value: Arc::new(value.clone()),
            },
        );
        Ok(value)
    }

    /// A stale entry is removed on the way out. The lock is released before
    /// returning; it is never held across an await point.
    fn lookup<T: Clone + 'static>(&self, key: &CacheKey, ttl: Duration) -> Option<T> {
        {
            let entries = self.entries.read();
            let entry = entries.get(key)?;
            if entry.stored.elapsed() < ttl {
                return match entry.value.downcast_ref::<T>() {
                    Some(value) => Some(value.clone()),
                    None => {
                        warn!(?key, "cache entry holds a different type, treating as miss");
                        None
                    }
                };
            }
        }

        // Another caller may have refreshed the entry between the two locks.
        let mut entries = self.entries.write();
        if entries
            .get(key)
            .is_some_and(|entry| entry.stored.elapsed() >= ttl)
        {
            debug!(?key, "evicting stale entry");
            entries.remove(key);
        }
        None
    }
}
