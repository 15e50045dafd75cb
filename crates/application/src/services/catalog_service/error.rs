//! Failure taxonomy of the catalog pipeline

use domain::ProductId;
use thiserror::Error;

use crate::error::ApplicationError;

/// Every way `fetch_product` can fail
///
/// Only `DownstreamFailure` and `Unclassified` count against the circuit
/// breaker. Admission rejections leave it untouched.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The result cache could not be consulted; recovered as a miss
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// The breaker refused admission and no emergency record exists
    #[error("Circuit Breaker is OPEN and no fallback available.")]
    CircuitOpen(ProductId),

    /// Every pool slot was taken
    #[error("Database Connection Pool Exhausted")]
    PoolExhausted {
        /// Slots held at rejection time
        active: usize,
        /// Pool capacity
        max_size: usize,
    },

    /// Injected downstream fault
    #[error("Downstream failure: {0}")]
    DownstreamFailure(String),

    /// The product store has no record for the id
    #[error("Product not found")]
    NotFound(ProductId),

    /// Any other failure inside the downstream step
    #[error("Unclassified failure: {0}")]
    Unclassified(#[source] ApplicationError),
}

impl CatalogError {
    /// Stable snake_case label for logs, span tags and metrics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CacheUnavailable(_) => "cache_unavailable",
            Self::CircuitOpen(_) => "circuit_open",
            Self::PoolExhausted { .. } => "pool_exhausted",
            Self::DownstreamFailure(_) => "downstream_failure",
            Self::NotFound(_) => "not_found",
            Self::Unclassified(_) => "unclassified",
        }
    }

    /// Whether this failure is a genuine dependency fault
    #[must_use]
    pub const fn counts_against_breaker(&self) -> bool {
        matches!(self, Self::DownstreamFailure(_) | Self::Unclassified(_))
    }

    /// Whether the caller should see a temporary unavailability
    #[must_use]
    pub const fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::CircuitOpen(_) | Self::PoolExhausted { .. })
    }
}
