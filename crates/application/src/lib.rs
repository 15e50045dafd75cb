//! Application layer - Use cases and orchestration
//!
//! Contains the resilience primitives (circuit breaker, saturation window,
//! connection pool), the catalog pipeline that composes them, and the port
//! definitions through which the pipeline reaches time, randomness, storage
//! and observability.

pub mod error;
pub mod ports;
pub mod resilience;
pub mod services;
pub mod testing;

pub use error::ApplicationError;
pub use ports::*;
pub use resilience::{
    CircuitBreaker, CircuitBreakerConfig, CircuitSnapshot, ConnectionPool, PooledConnection,
    SaturationConfig, SaturationWindow, penalty_for_load,
};
pub use services::*;
