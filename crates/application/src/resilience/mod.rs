//! Resilience primitives shared by the catalog pipeline
//!
//! Each primitive is a small critical section guarded by a `parking_lot`
//! mutex. No lock is ever held across an `.await`.

mod circuit_breaker;
mod connection_pool;
mod saturation;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitSnapshot};
pub use connection_pool::{ConnectionPool, PooledConnection};
pub use saturation::{SaturationConfig, SaturationWindow, penalty_for_load};
