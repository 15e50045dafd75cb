//! Port definitions for application layer
//!
//! Ports are interfaces that define how the catalog pipeline reaches the
//! outside world. Adapters in the infrastructure layer implement these ports;
//! deterministic doubles live in [`crate::testing`].

mod clock_port;
mod fault_source_port;
mod metrics_port;
mod product_store_port;
mod result_cache_port;
mod trace_port;

pub use clock_port::ClockPort;
pub use fault_source_port::FaultSourcePort;
pub use metrics_port::{MetricsPort, NoopMetrics};
#[cfg(test)]
pub use product_store_port::MockProductStorePort;
pub use product_store_port::ProductStorePort;
pub use result_cache_port::ResultCachePort;
pub use trace_port::{NoopSpan, NoopTracer, SpanPort, TracerPort};
