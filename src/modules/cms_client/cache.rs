use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

struct CacheEntry {
    value: Value,
    fetched_at: Instant,
}

/// Response cache keyed by request path (including the query string).
///
/// Mutations call [`QueryCache::invalidate_prefix`] with the resource path so
/// every list and detail view of that resource is refetched.
pub struct QueryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.fetched_at.elapsed() >= self.ttl {
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub async fn insert<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => {
                let mut entries = self.entries.write().await;
                entries.insert(
                    key.to_string(),
                    CacheEntry {
                        value,
                        fetched_at: Instant::now(),
                    },
                );
            }
            Err(e) => tracing::warn!("Not caching {}: {}", key, e),
        }
    }

    /// Drop `prefix` itself and every key below it (`prefix/...`, `prefix?...`)
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !is_under(key, prefix));
        tracing::debug!("Invalidated {} cached queries under {}", before - entries.len(), prefix);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn is_under(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_typed_values() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("/api/templates", &vec!["landing", "service"]).await;

        let cached: Option<Vec<String>> = cache.get("/api/templates").await;
        assert_eq!(cached, Some(vec!["landing".to_string(), "service".to_string()]));
        assert!(cache.get::<Vec<String>>("/api/projects").await.is_none());
    }

    #[tokio::test]
    async fn prefix_invalidation_respects_segment_boundaries() {
        let cache = QueryCache::new(Duration::from_secs(60));
        for key in [
            "/api/pages",
            "/api/pages?status=draft",
            "/api/pages/4",
            "/api/pages-archive",
            "/api/projects",
        ] {
            cache.insert(key, &1).await;
        }

        cache.invalidate_prefix("/api/pages").await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get::<i32>("/api/pages-archive").await.is_some());
        assert!(cache.get::<i32>("/api/projects").await.is_some());
        assert!(cache.get::<i32>("/api/pages/4").await.is_none());
    }

    #[tokio::test]
    async fn expired_entries_are_misses() {
        let cache = QueryCache::new(Duration::from_millis(0));
        cache.insert("/api/projects", &3).await;
        assert!(cache.get::<i32>("/api/projects").await.is_none());
    }
}
