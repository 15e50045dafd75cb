//! Bounded connection pool with non-blocking admission
//!
//! `acquire` never waits: when every slot is taken the call fails and the
//! caller rejects the request. [`PooledConnection`] releases its slot on
//! drop, which covers early returns, errors and cancelled futures.

use std::{fmt, sync::Arc};

use parking_lot::Mutex;

use crate::ports::{MetricsPort, NoopMetrics};

const ACTIVE_GAUGE: &str = "catalog.db.pool.active";
const EXHAUSTED_COUNTER: &str = "catalog.db.pool.exhausted";

/// Counting pool of simulated database connections
pub struct ConnectionPool {
    max_size: usize,
    active: Mutex<usize>,
    metrics: Arc<dyn MetricsPort>,
}

impl fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("max_size", &self.max_size)
            .field("active", &self.active())
            .finish_non_exhaustive()
    }
}

impl ConnectionPool {
    /// Create a pool with `max_size` slots
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            active: Mutex::new(0),
            metrics: Arc::new(NoopMetrics),
        }
    }

    /// Publish pool usage to `metrics`
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsPort>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Take a slot if one is free
    pub fn acquire(&self) -> bool {
        let mut active = self.active.lock();
        if *active >= self.max_size {
            self.metrics.increment(EXHAUSTED_COUNTER);
            return false;
        }
        *active += 1;
        #[allow(clippy::cast_precision_loss)]
        self.metrics.gauge(ACTIVE_GAUGE, *active as f64);
        true
    }

    /// Return a slot; never goes below zero
    pub fn release(&self) {
        let mut active = self.active.lock();
        *active = active.saturating_sub(1);
        #[allow(clippy::cast_precision_loss)]
        self.metrics.gauge(ACTIVE_GAUGE, *active as f64);
    }

    /// Slots currently held
    #[must_use]
    pub fn active(&self) -> usize {
        *self.active.lock()
    }

    /// Pool capacity
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    /// Acquire a slot wrapped in a guard that releases it on drop
    #[must_use]
    pub fn try_checkout(self: &Arc<Self>) -> Option<PooledConnection> {
        self.acquire().then(|| PooledConnection {
            pool: Arc::clone(self),
        })
    }
}

/// A held pool slot; dropping it releases the slot exactly once
#[derive(Debug)]
pub struct PooledConnection {
    pool: Arc<ConnectionPool>,
}

impl PooledConnection {
    /// Slots held across the pool, including this one
    #[must_use]
    pub fn pool_active(&self) -> usize {
        self.pool.active()
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        self.pool.release();
    }
}
