//! Memory cache: the ordered local mirror of the remote memory store.

use std::collections::HashSet;
use std::sync::Mutex;

use tracing::warn;

use mnemo_types::memory::Memory;

/// Ordered collection of memories mirroring the remote store.
///
/// A refresh replaces the whole list with the server's (replace-all, no
/// partial merge); a successful save appends the server-confirmed record.
/// Consumers only ever see snapshots.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<Vec<Memory>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the cache with a freshly fetched server list.
    ///
    /// Server order is preserved. Duplicate ids are dropped (first
    /// occurrence wins) with a warning; the server owns id uniqueness, so
    /// a duplicate here means a misbehaving backend. Returns the list as
    /// applied.
    pub fn replace_all(&self, fetched: Vec<Memory>) -> Vec<Memory> {
        let mut seen = HashSet::with_capacity(fetched.len());
        let mut list = Vec::with_capacity(fetched.len());
        for memory in fetched {
            if seen.insert(memory.id) {
                list.push(memory);
            } else {
                warn!(id = memory.id, "dropping duplicate memory id from refresh");
            }
        }

        *self.entries.lock().expect("cache lock poisoned") = list.clone();
        list
    }

    /// Append a server-confirmed record to the end of the cache.
    pub fn append(&self, memory: Memory) {
        self.entries.lock().expect("cache lock poisoned").push(memory);
    }

    /// Snapshot of the current cache, in insertion/refresh order.
    pub fn list(&self) -> Vec<Memory> {
        self.entries.lock().expect("cache lock poisoned").clone()
    }

    /// Drop all cached entries (logout/teardown).
    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(id: i64, content: &str) -> Memory {
        Memory {
            id,
            content: content.to_string(),
            timestamp: "2026-08-06 09:30:00".to_string(),
        }
    }

    #[test]
    fn test_replace_all_discards_previous_contents() {
        let cache = MemoryCache::new();
        cache.append(memory(99, "stale"));

        let applied = cache.replace_all(vec![memory(1, "buy milk"), memory(2, "call mom")]);

        assert_eq!(applied.len(), 2);
        let listed = cache.list();
        assert_eq!(listed, applied);
        assert_eq!(listed[0].id, 1);
        assert_eq!(listed[1].id, 2);
    }

    #[test]
    fn test_replace_all_keeps_first_of_duplicate_ids() {
        let cache = MemoryCache::new();
        let applied = cache.replace_all(vec![
            memory(1, "first"),
            memory(1, "second"),
            memory(2, "other"),
        ]);

        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].content, "first");
        assert_eq!(applied[1].id, 2);
    }

    #[test]
    fn test_append_preserves_order() {
        let cache = MemoryCache::new();
        cache.append(memory(1, "a"));
        cache.append(memory(2, "b"));

        let listed = cache.list();
        assert_eq!(listed[0].id, 1);
        assert_eq!(listed[1].id, 2);
    }

    #[test]
    fn test_clear_empties_the_cache() {
        let cache = MemoryCache::new();
        cache.append(memory(1, "a"));
        cache.clear();
        assert!(cache.list().is_empty());
    }
}
