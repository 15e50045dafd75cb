//! Metrics port definition
//!
//! The pipeline publishes counters, gauges and histograms through this port.
//! Emission is purely observational and never changes an outcome.

use std::fmt;

/// Sink for application metrics
pub trait MetricsPort: Send + Sync + fmt::Debug {
    /// Increment a counter by one
    fn increment(&self, name: &'static str);

    /// Set a gauge to `value`
    fn gauge(&self, name: &'static str, value: f64);

    /// Record a histogram sample
    fn histogram(&self, name: &'static str, value: f64);
}

/// Metrics sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsPort for NoopMetrics {
    fn increment(&self, _name: &'static str) {}

    fn gauge(&self, _name: &'static str, _value: f64) {}

    fn histogram(&self, _name: &'static str, _value: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_accepts_all_calls() {
        let sink = NoopMetrics;
        sink.increment("catalog.cache.hit");
        sink.gauge("catalog.db.pool.active", 3.0);
        sink.histogram("catalog.db.query.duration", 0.5);
    }

    #[test]
    fn usable_as_trait_object() {
        let sink: Box<dyn MetricsPort> = Box::new(NoopMetrics);
        sink.increment("x");
    }
}
