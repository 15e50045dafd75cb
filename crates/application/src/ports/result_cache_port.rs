//! Result cache port definition
//!
//! Write-through cache of successfully fetched product records. Entries never
//! expire; they disappear only when the cache is cleared.

use std::fmt;

use async_trait::async_trait;
use domain::{ProductId, ProductRecord};

use crate::error::ApplicationError;

/// Port for the write-through product cache
#[async_trait]
pub trait ResultCachePort: Send + Sync + fmt::Debug {
    /// Get a cached record
    async fn get(&self, id: &ProductId) -> Result<Option<ProductRecord>, ApplicationError>;

    /// Store a record, replacing any previous entry for its id
    async fn put(&self, record: ProductRecord) -> Result<(), ApplicationError>;

    /// Remove every entry
    async fn clear(&self) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ResultCachePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ResultCachePort>();
    }
}
