//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod metrics_sink;
mod moka_result_cache;
mod rand_fault_source;
mod static_product_store;
mod tokio_clock;
mod tracing_tracer;

pub use metrics_sink::MetricsFacadeSink;
pub use moka_result_cache::MokaResultCache;
pub use rand_fault_source::ThreadRngFaultSource;
pub use static_product_store::StaticProductStore;
pub use tokio_clock::TokioClock;
pub use tracing_tracer::TracingTracer;
