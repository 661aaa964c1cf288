use crate::types::DomainCandidate;
use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Cache key for a batch: SHA-256 over the full skeleton text.
///
/// Keying on anything less than the full content (a prefix, a partial hash)
/// produces silent incorrect hits between similar-but-different code.
pub fn cache_key(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

struct Entry {
    candidates: Vec<DomainCandidate>,
    inserted: Instant,
}

/// Bounded, TTL'd store of inference results keyed by full-content digest.
///
/// Distinct batches produce distinct keys by construction, so a same-key
/// write from a concurrent duplicate request is an idempotent overwrite.
pub struct InferenceCache {
    inner: Mutex<LruCache<String, Entry>>,
    ttl: Duration,
}

impl InferenceCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Fetch a live entry; expired entries are evicted on read
    pub fn get(&self, key: &str) -> Option<Vec<DomainCandidate>> {
        let mut cache = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let expired = cache
            .get(key)
            .is_some_and(|entry| entry.inserted.elapsed() > self.ttl);
        if expired {
            cache.pop(key);
            return None;
        }

        cache.get(key).map(|entry| entry.candidates.clone())
    }

    /// Store a result (idempotent overwrite on duplicate keys)
    pub fn put(&self, key: String, candidates: Vec<DomainCandidate>) {
        let mut cache = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        cache.put(
            key,
            Entry {
                candidates,
                inserted: Instant::now(),
            },
        );
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
