//! Product store port definition
//!
//! Read-only lookup of product records. The same port backs both the
//! source-of-truth catalog and the static emergency fallback dataset.

use async_trait::async_trait;
use domain::{ProductId, ProductRecord};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for looking up product records by id
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductStorePort: Send + Sync {
    /// Find a product by id
    ///
    /// Returns `Ok(None)` when the id is unknown. An `Err` means the store
    /// itself failed, which the pipeline treats as a dependency fault.
    async fn find(&self, id: &ProductId) -> Result<Option<ProductRecord>, ApplicationError>;
}
