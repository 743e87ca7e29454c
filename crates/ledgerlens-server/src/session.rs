//! Bounded document session cache.
//!
//! One entry per uploaded document: the full extracted text plus the parsed
//! record, keyed by an opaque UUID handed back to the client. LRU with TTL so
//! a long-running process cannot accumulate unbounded statement text.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ledgerlens_core::ParsedStatement;
use parking_lot::Mutex;

/// Cached state for one uploaded document.
pub struct DocumentSession {
    pub text: String,
    pub record: ParsedStatement,
}

struct CacheEntry {
    session: Arc<DocumentSession>,
    inserted_at: Instant,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    order: Vec<String>,
    max_size: usize,
    ttl: Duration,
}

/// Thread-safe LRU session cache with TTL.
pub struct SessionCache {
    inner: Mutex<CacheInner>,
}

impl SessionCache {
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_size),
                order: Vec::with_capacity(max_size),
                max_size,
                ttl,
            }),
        }
    }

    /// Get a session. Returns None on miss or expired entry; a hit refreshes
    /// the entry's LRU position.
    pub fn get(&self, id: &str) -> Option<Arc<DocumentSession>> {
        let mut inner = self.inner.lock();

        let expired = inner
            .entries
            .get(id)
            .map(|e| e.inserted_at.elapsed() >= inner.ttl)?;

        if expired {
            let key = id.to_string();
            inner.entries.remove(&key);
            inner.order.retain(|k| k != &key);
            return None;
        }

        let session = inner.entries.get(id).map(|e| e.session.clone());
        if let Some(pos) = inner.order.iter().position(|k| k == id) {
            let key = inner.order.remove(pos);
            inner.order.push(key);
        }
        session
    }

    /// Insert a session, evicting the least recently used entries at capacity.
    pub fn put(&self, id: String, session: DocumentSession) {
        let mut inner = self.inner.lock();

        if inner.entries.contains_key(&id) {
            inner.order.retain(|k| k != &id);
        } else {
            while inner.entries.len() >= inner.max_size && !inner.order.is_empty() {
                let oldest = inner.order.remove(0);
                inner.entries.remove(&oldest);
            }
        }

        inner.order.push(id.clone());
        inner.entries.insert(
            id,
            CacheEntry {
                session: Arc::new(session),
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop a session explicitly. Returns whether it was present.
    pub fn evict(&self, id: &str) -> bool {
        let mut inner = self.inner.lock();
        let removed = inner.entries.remove(id).is_some();
        if removed {
            inner.order.retain(|k| k != id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::UNKNOWN_ISSUER;

    fn session(text: &str) -> DocumentSession {
        DocumentSession {
            text: text.to_string(),
            record: ParsedStatement::unmatched(UNKNOWN_ISSUER),
        }
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = SessionCache::new(10, Duration::from_secs(3600));
        assert!(cache.get("missing").is_none());

        cache.put("s1".into(), session("some text"));
        let hit = cache.get("s1").unwrap();
        assert_eq!(hit.text, "some text");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_eviction() {
        let cache = SessionCache::new(2, Duration::from_secs(3600));
        cache.put("a".into(), session("a"));
        cache.put("b".into(), session("b"));

        // Touch "a" so "b" becomes the eviction candidate.
        cache.get("a");
        cache.put("c".into(), session("c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = SessionCache::new(10, Duration::from_millis(1));
        cache.put("ephemeral".into(), session("x"));

        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("ephemeral").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_explicit_evict() {
        let cache = SessionCache::new(10, Duration::from_secs(3600));
        cache.put("s1".into(), session("x"));
        assert!(cache.evict("s1"));
        assert!(!cache.evict("s1"));
        assert!(cache.get("s1").is_none());
    }
}
