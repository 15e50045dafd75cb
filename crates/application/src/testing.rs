//! Deterministic port implementations
//!
//! Used by the unit tests of every layer and handy for local experiments:
//! a manual clock whose sleeps advance time instantly, a scripted fault
//! source, an in-memory cache, and recorders for metrics and spans.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use domain::{ProductId, ProductRecord};
use parking_lot::Mutex;

use crate::{
    error::ApplicationError,
    ports::{
        ClockPort, FaultSourcePort, MetricsPort, ProductStorePort, ResultCachePort, SpanPort,
        TracerPort,
    },
};

// ==============================
// Clock
// ==============================

/// Clock that only moves when told to
///
/// `sleep` records the requested duration, advances the clock by it and
/// yields once, so concurrent tasks interleave at the sleep point exactly as
/// they would with a real timer.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock();
        *offset = offset.saturating_add(by);
    }

    /// Time elapsed since the clock was created
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }

    /// Every duration passed to `sleep`, in call order
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClockPort for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        self.advance(duration);
        tokio::task::yield_now().await;
    }
}

// ==============================
// Fault source
// ==============================

/// Fault source that replays a script of draws, then a constant
#[derive(Debug)]
pub struct ScriptedFaultSource {
    script: Mutex<VecDeque<f64>>,
    fallback: f64,
    draws: Mutex<u64>,
}

impl ScriptedFaultSource {
    /// Always draw `value`
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::sequence([], value)
    }

    /// Draw the values in `script` in order, then `fallback` forever
    #[must_use]
    pub fn sequence(script: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            draws: Mutex::new(0),
        }
    }

    /// Number of draws taken so far
    #[must_use]
    pub fn draws(&self) -> u64 {
        *self.draws.lock()
    }
}

impl FaultSourcePort for ScriptedFaultSource {
    fn roll(&self) -> f64 {
        *self.draws.lock() += 1;
        self.script.lock().pop_front().unwrap_or(self.fallback)
    }
}

// ==============================
// Product store
// ==============================

/// Product store backed by a fixed map, with a lookup counter
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    records: HashMap<ProductId, ProductRecord>,
    lookups: Mutex<u64>,
}

impl InMemoryProductStore {
    /// Create a store holding `records`
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
            lookups: Mutex::new(0),
        }
    }

    /// Number of `find` calls served
    #[must_use]
    pub fn lookups(&self) -> u64 {
        *self.lookups.lock()
    }
}

#[async_trait]
impl ProductStorePort for InMemoryProductStore {
    async fn find(&self, id: &ProductId) -> Result<Option<ProductRecord>, ApplicationError> {
        *self.lookups.lock() += 1;
        Ok(self.records.get(id).cloned())
    }
}

// ==============================
// Cache
// ==============================

/// `HashMap`-backed result cache
#[derive(Debug, Default)]
pub struct InMemoryResultCache {
    entries: Mutex<HashMap<ProductId, ProductRecord>>,
}

impl InMemoryResultCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry exists for `id`
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.lock().contains_key(id)
    }

    /// Number of cached records
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.lock().len()
    }
}

#[async_trait]
impl ResultCachePort for InMemoryResultCache {
    async fn get(&self, id: &ProductId) -> Result<Option<ProductRecord>, ApplicationError> {
        Ok(self.entries.lock().get(id).cloned())
    }

    async fn put(&self, record: ProductRecord) -> Result<(), ApplicationError> {
        self.entries.lock().insert(record.id.clone(), record);
        Ok(())
    }

    async fn clear(&self) -> Result<(), ApplicationError> {
        self.entries.lock().clear();
        Ok(())
    }
}

// ==============================
// Metrics
// ==============================

/// A single recorded metric call
#[derive(Debug, Clone, PartialEq)]
pub enum MetricEvent {
    /// `increment(name)`
    Increment(&'static str),
    /// `gauge(name, value)`
    Gauge(&'static str, f64),
    /// `histogram(name, value)`
    Histogram(&'static str, f64),
}

/// Metrics sink that remembers every call
#[derive(Debug, Default)]
pub struct RecordingMetrics {
    events: Mutex<Vec<MetricEvent>>,
}

impl RecordingMetrics {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events
    #[must_use]
    pub fn events(&self) -> Vec<MetricEvent> {
        self.events.lock().clone()
    }

    /// How many times counter `name` was incremented
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, MetricEvent::Increment(n) if *n == name))
            .count()
    }

    /// Most recent value of gauge `name`
    #[must_use]
    pub fn last_gauge(&self, name: &str) -> Option<f64> {
        self.events.lock().iter().rev().find_map(|e| match e {
            MetricEvent::Gauge(n, v) if *n == name => Some(*v),
            _ => None,
        })
    }

    /// Every sample recorded for histogram `name`
    #[must_use]
    pub fn histogram_samples(&self, name: &str) -> Vec<f64> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                MetricEvent::Histogram(n, v) if *n == name => Some(*v),
                _ => None,
            })
            .collect()
    }
}

impl MetricsPort for RecordingMetrics {
    fn increment(&self, name: &'static str) {
        self.events.lock().push(MetricEvent::Increment(name));
    }

    fn gauge(&self, name: &'static str, value: f64) {
        self.events.lock().push(MetricEvent::Gauge(name, value));
    }

    fn histogram(&self, name: &'static str, value: f64) {
        self.events.lock().push(MetricEvent::Histogram(name, value));
    }
}

// ==============================
// Tracing
// ==============================

/// A finished span captured by [`RecordingTracer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSpan {
    /// Span name
    pub name: &'static str,
    /// Resource the span was opened for
    pub resource: String,
    /// Tags in the order they were set
    pub tags: Vec<(&'static str, String)>,
    /// Error flag at finish time
    pub error: bool,
}

impl RecordedSpan {
    /// Last value set for `key`
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Tracer that collects finished spans
#[derive(Debug, Clone, Default)]
pub struct RecordingTracer {
    finished: Arc<Mutex<Vec<RecordedSpan>>>,
}

impl RecordingTracer {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spans finished so far, in finish order
    #[must_use]
    pub fn finished(&self) -> Vec<RecordedSpan> {
        self.finished.lock().clone()
    }

    /// Finished spans with the given name
    #[must_use]
    pub fn named(&self, name: &str) -> Vec<RecordedSpan> {
        self.finished
            .lock()
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect()
    }
}

impl TracerPort for RecordingTracer {
    fn start_span(&self, name: &'static str, resource: &str) -> Box<dyn SpanPort> {
        Box::new(RecordingSpan {
            span: RecordedSpan {
                name,
                resource: resource.to_string(),
                tags: Vec::new(),
                error: false,
            },
            sink: Arc::clone(&self.finished),
        })
    }
}

struct RecordingSpan {
    span: RecordedSpan,
    sink: Arc<Mutex<Vec<RecordedSpan>>>,
}

impl SpanPort for RecordingSpan {
    fn set_tag(&mut self, key: &'static str, value: String) {
        self.span.tags.push((key, value));
    }

    fn set_error(&mut self, error: bool) {
        self.span.error = error;
    }
}

impl Drop for RecordingSpan {
    fn drop(&mut self) {
        self.sink.lock().push(self.span.clone());
    }
}
