//! Sliding-window load tracker with a latency penalty
//!
//! The window keeps the admission timestamps of the trailing `window`
//! period. Every request above `threshold` in that window adds
//! `penalty_per_request` of simulated downstream latency.

use std::{
    collections::VecDeque,
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;

use crate::ports::ClockPort;

/// Saturation model parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaturationConfig {
    /// Requests tolerated in the window before latency is added
    pub threshold: usize,
    /// Length of the trailing window
    pub window: Duration,
    /// Latency added per request above the threshold
    pub penalty_per_request: Duration,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            threshold: 10,
            window: Duration::from_secs(10),
            penalty_per_request: Duration::from_millis(500),
        }
    }
}

/// Penalty for a given load: `max(0, load - threshold) * penalty_per_request`
#[must_use]
pub fn penalty_for_load(load: usize, config: &SaturationConfig) -> Duration {
    let excess = load.saturating_sub(config.threshold);
    config
        .penalty_per_request
        .saturating_mul(u32::try_from(excess).unwrap_or(u32::MAX))
}

/// Trailing window of admitted requests
pub struct SaturationWindow {
    config: SaturationConfig,
    entries: Mutex<VecDeque<Instant>>,
    clock: Arc<dyn ClockPort>,
}

impl fmt::Debug for SaturationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaturationWindow")
            .field("config", &self.config)
            .field("load", &self.current_load())
            .finish_non_exhaustive()
    }
}

impl SaturationWindow {
    /// Create an empty window
    #[must_use]
    pub fn new(config: SaturationConfig, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            config,
            entries: Mutex::new(VecDeque::new()),
            clock,
        }
    }

    /// Model parameters
    #[must_use]
    pub const fn config(&self) -> &SaturationConfig {
        &self.config
    }

    /// Append the current instant and purge entries at least `window` old
    ///
    /// Returns the load after the purge.
    pub fn record_request(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        entries.push_back(now);
        while entries
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) >= self.config.window)
        {
            entries.pop_front();
        }
        entries.len()
    }

    /// Number of requests currently in the window
    ///
    /// Entries are only purged by `record_request`, so this can include
    /// stale entries when no request has arrived for a while.
    #[must_use]
    pub fn current_load(&self) -> usize {
        self.entries.lock().len()
    }

    /// Latency penalty for the current load
    #[must_use]
    pub fn dynamic_latency(&self) -> Duration {
        penalty_for_load(self.current_load(), &self.config)
    }
}
