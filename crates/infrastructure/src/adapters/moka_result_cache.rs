//! Moka-backed write-through result cache
//!
//! Unbounded and without expiry: entries leave only through `clear`.

use application::{error::ApplicationError, ports::ResultCachePort};
use async_trait::async_trait;
use domain::{ProductId, ProductRecord};
use moka::future::Cache;
use tracing::{debug, instrument};

/// In-memory product cache on top of `moka::future::Cache`
#[derive(Clone)]
pub struct MokaResultCache {
    cache: Cache<ProductId, ProductRecord>,
}

impl std::fmt::Debug for MokaResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaResultCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl MokaResultCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    /// Number of cached records
    pub async fn entry_count(&self) -> u64 {
        // Moka counts lazily; flush pending writes first
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

impl Default for MokaResultCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultCachePort for MokaResultCache {
    #[instrument(skip(self), level = "debug")]
    async fn get(&self, id: &ProductId) -> Result<Option<ProductRecord>, ApplicationError> {
        Ok(self.cache.get(id).await)
    }

    #[instrument(skip(self, record), fields(product.id = %record.id), level = "debug")]
    async fn put(&self, record: ProductRecord) -> Result<(), ApplicationError> {
        self.cache.insert(record.id.clone(), record).await;
        debug!("Cache set");
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn clear(&self) -> Result<(), ApplicationError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        debug!("Cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &'static str, name: &str) -> ProductRecord {
        ProductRecord::new(ProductId::from_static(id), name, 10.0, "test")
    }

    #[tokio::test]
    async fn put_then_get() {
        let cache = MokaResultCache::new();
        cache.put(record("1", "Laptop")).await.unwrap();

        let hit = cache.get(&ProductId::from_static("1")).await.unwrap();
        assert_eq!(hit.unwrap().name, "Laptop");
    }

    #[tokio::test]
    async fn missing_id_is_none() {
        let cache = MokaResultCache::new();
        assert!(cache.get(&ProductId::from_static("1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_replaces_existing_entry() {
        let cache = MokaResultCache::new();
        cache.put(record("1", "Old")).await.unwrap();
        cache.put(record("1", "New")).await.unwrap();

        let hit = cache.get(&ProductId::from_static("1")).await.unwrap();
        assert_eq!(hit.unwrap().name, "New");
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let cache = MokaResultCache::new();
        cache.put(record("1", "Laptop")).await.unwrap();
        cache.put(record("2", "Monitor")).await.unwrap();
        assert_eq!(cache.entry_count().await, 2);

        cache.clear().await.unwrap();
        assert_eq!(cache.entry_count().await, 0);
        assert!(cache.get(&ProductId::from_static("2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let cache = MokaResultCache::default();
        let other = cache.clone();
        cache.put(record("4", "Mouse")).await.unwrap();
        assert!(other.get(&ProductId::from_static("4")).await.unwrap().is_some());
    }

    #[test]
    fn debug_shows_entries() {
        let debug = format!("{:?}", MokaResultCache::new());
        assert!(debug.contains("MokaResultCache"));
        assert!(debug.contains("entries"));
    }
}
