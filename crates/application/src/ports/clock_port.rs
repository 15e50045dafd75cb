//! Clock port definition
//!
//! Time is read and waited on through this port so that circuit breaker
//! recovery, the saturation window and injected latency can be driven by a
//! manual clock in tests.

use std::{
    fmt,
    time::{Duration, Instant},
};

use async_trait::async_trait;

/// Source of monotonic time and of task-local suspension
#[async_trait]
pub trait ClockPort: Send + Sync + fmt::Debug {
    /// Current monotonic instant
    fn now(&self) -> Instant;

    /// Suspend the calling task for `duration`
    ///
    /// Implementations must only suspend the caller; other tasks keep running.
    async fn sleep(&self, duration: Duration);
}
