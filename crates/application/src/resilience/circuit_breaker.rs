//! Circuit breaker guarding the downstream product store
//!
//! # States
//!
//! - **Closed**: Normal operation, calls pass through
//! - **Open**: Threshold reached, calls are refused until the recovery
//!   timeout has elapsed since the last recorded failure
//! - **Half-Open**: Observed lazily by the first `can_execute` after the
//!   timeout; there is no background timer
//!
//! Any success closes the circuit and resets the failure counter to zero.
//! Failures are never decayed otherwise.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use domain::CircuitState;
use parking_lot::Mutex;
use serde::Serialize;

use crate::ports::{ClockPort, MetricsPort, NoopMetrics};

const STATE_GAUGE: &str = "catalog.circuit_breaker.state";

/// Configuration for a circuit breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Number of consecutive failures before opening the circuit
    pub failure_threshold: u32,
    /// Time to wait after the last failure before letting a trial call through
    pub recovery_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(30),
        }
    }
}

/// Point-in-time view of a breaker, for status endpoints and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircuitSnapshot {
    /// Current state
    pub state: CircuitState,
    /// Consecutive failures since the last success
    pub consecutive_failures: u32,
    /// Threshold currently in force
    pub failure_threshold: u32,
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    consecutive_failures: u32,
    last_failure: Option<Instant>,
    failure_threshold: u32,
}

/// Consecutive-failure circuit breaker
///
/// All transitions happen under one mutex; the lock is never held across an
/// await point, so concurrent pipeline invocations only contend for the
/// duration of a counter update.
pub struct CircuitBreaker {
    name: String,
    recovery_timeout: Duration,
    state: Mutex<BreakerState>,
    clock: Arc<dyn ClockPort>,
    metrics: Arc<dyn MetricsPort>,
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("recovery_timeout", &self.recovery_timeout)
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl CircuitBreaker {
    /// Create a closed breaker
    ///
    /// A zero threshold is raised to one.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        config: CircuitBreakerConfig,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            name: name.into(),
            recovery_timeout: config.recovery_timeout,
            state: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                last_failure: None,
                failure_threshold: config.failure_threshold.max(1),
            }),
            clock,
            metrics: Arc::new(NoopMetrics),
        }
    }

    /// Publish state changes to `metrics`
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsPort>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Name used in log fields
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record a dependency failure
    ///
    /// Once the counter reaches the threshold the circuit is (re)opened and
    /// the failure timestamp is refreshed. Returns the state after the update.
    pub fn record_failure(&self) -> CircuitState {
        let now = self.clock.now();
        let mut state = self.state.lock();
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);

        if state.consecutive_failures >= state.failure_threshold {
            if state.state != CircuitState::Open {
                tracing::warn!(
                    breaker = %self.name,
                    failures = state.consecutive_failures,
                    threshold = state.failure_threshold,
                    from = %state.state,
                    "Circuit transitioning to Open"
                );
            }
            state.state = CircuitState::Open;
            state.last_failure = Some(now);
            self.metrics
                .gauge(STATE_GAUGE, CircuitState::Open.gauge_value());
        } else {
            tracing::debug!(
                breaker = %self.name,
                failures = state.consecutive_failures,
                threshold = state.failure_threshold,
                "Recorded failure"
            );
        }

        state.state
    }

    /// Record a successful call: reset the counter and close the circuit
    pub fn record_success(&self) {
        let mut state = self.state.lock();
        if state.state != CircuitState::Closed {
            tracing::info!(
                breaker = %self.name,
                from = %state.state,
                "Circuit transitioning to Closed"
            );
        }
        state.consecutive_failures = 0;
        state.state = CircuitState::Closed;
        self.metrics
            .gauge(STATE_GAUGE, CircuitState::Closed.gauge_value());
    }

    /// Admission check
    ///
    /// While open, returns `false` until strictly more than the recovery
    /// timeout has passed since the last failure; the first call after that
    /// flips the breaker to half-open and returns `true`.
    pub fn can_execute(&self) -> bool {
        let now = self.clock.now();
        let mut state = self.state.lock();

        if state.state != CircuitState::Open {
            self.metrics.gauge(STATE_GAUGE, state.state.gauge_value());
            return true;
        }

        let elapsed = state
            .last_failure
            .map_or(Duration::MAX, |at| now.saturating_duration_since(at));

        if elapsed > self.recovery_timeout {
            tracing::info!(
                breaker = %self.name,
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "Circuit transitioning from Open to HalfOpen"
            );
            state.state = CircuitState::HalfOpen;
            self.metrics
                .gauge(STATE_GAUGE, CircuitState::HalfOpen.gauge_value());
            true
        } else {
            self.metrics
                .gauge(STATE_GAUGE, CircuitState::Open.gauge_value());
            false
        }
    }

    /// Current state, without triggering the lazy half-open transition
    #[must_use]
    pub fn state(&self) -> CircuitState {
        self.state.lock().state
    }

    /// Consecutive failures since the last success
    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.state.lock().consecutive_failures
    }

    /// Threshold currently in force
    #[must_use]
    pub fn failure_threshold(&self) -> u32 {
        self.state.lock().failure_threshold
    }

    /// Replace the failure threshold (minimum one)
    ///
    /// The state is left untouched. An open circuit keeps its failure count
    /// at or above the new threshold, so it stays open until the recovery
    /// timeout as before.
    pub fn set_failure_threshold(&self, threshold: u32) {
        let mut state = self.state.lock();
        let threshold = threshold.max(1);
        if state.failure_threshold != threshold {
            tracing::info!(
                breaker = %self.name,
                old = state.failure_threshold,
                new = threshold,
                "Circuit breaker threshold changed"
            );
        }
        state.failure_threshold = threshold;
        if state.state == CircuitState::Open {
            state.consecutive_failures = state.consecutive_failures.max(threshold);
        }
    }

    /// Consistent view of state, counter and threshold
    #[must_use]
    pub fn snapshot(&self) -> CircuitSnapshot {
        let state = self.state.lock();
        CircuitSnapshot {
            state: state.state,
            consecutive_failures: state.consecutive_failures,
            failure_threshold: state.failure_threshold,
        }
    }
}
