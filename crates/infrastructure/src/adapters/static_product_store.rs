//! Static in-memory product stores
//!
//! Backs both the source-of-truth catalog and the emergency fallback dataset.
//! Records are fixed at construction and handed out as clones.

use std::collections::HashMap;

use application::{error::ApplicationError, ports::ProductStorePort};
use async_trait::async_trait;
use domain::{ProductId, ProductRecord};
use tracing::{debug, instrument};

/// Read-only product store backed by a hash map
pub struct StaticProductStore {
    label: &'static str,
    records: HashMap<ProductId, ProductRecord>,
}

impl std::fmt::Debug for StaticProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticProductStore")
            .field("label", &self.label)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl StaticProductStore {
    /// Create a store from a list of records
    ///
    /// A later record replaces an earlier one with the same id.
    pub fn new(label: &'static str, records: impl IntoIterator<Item = ProductRecord>) -> Self {
        Self {
            label,
            records: records
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }

    /// The seeded source-of-truth catalog (ids `1` to `4`)
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(
            "catalog",
            [
                product("1", "Gamer Laptop", 7500.0, "Powerful for gaming and work."),
                product("2", "Ultrawide Monitor", 2200.0, "Total immersion with a curved screen."),
                product("3", "Mechanical Keyboard", 450.0, "Cherry MX Red switches."),
                product("4", "Wireless Mouse", 300.0, "Ergonomic and high precision."),
            ],
        )
    }

    /// The emergency dataset served while the circuit is open
    ///
    /// Only ids `1` and `2` are covered.
    #[must_use]
    pub fn emergency_fallback() -> Self {
        Self::new(
            "emergency",
            [
                product("1", "Laptop (Emergency Cache)", 7500.0, "Static fallback info."),
                product("2", "Monitor (Emergency Cache)", 2200.0, "Static fallback info."),
            ],
        )
    }

    /// Number of records held
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn product(id: &'static str, name: &str, price: f64, description: &str) -> ProductRecord {
    ProductRecord::new(ProductId::from_static(id), name, price, description)
}

#[async_trait]
impl ProductStorePort for StaticProductStore {
    #[instrument(skip(self), fields(store = self.label), level = "debug")]
    async fn find(&self, id: &ProductId) -> Result<Option<ProductRecord>, ApplicationError> {
        let found = self.records.get(id).cloned();
        debug!(found = found.is_some(), "Static store lookup");
        Ok(found)
    }
}
