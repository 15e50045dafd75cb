//! Product record entity

use serde::{Deserialize, Serialize};

use crate::ProductId;

/// A catalog product as served to callers
///
/// Records are immutable once created; stores hand out clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Short marketing description
    pub description: String,
}

impl ProductRecord {
    /// Create a new product record
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}
