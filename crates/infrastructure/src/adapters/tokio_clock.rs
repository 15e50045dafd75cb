//! Clock adapter over tokio time

use std::time::{Duration, Instant};

use application::ports::ClockPort;
use async_trait::async_trait;

/// Monotonic clock whose sleeps suspend only the calling task
///
/// Uses `tokio::time`, so a paused runtime (`start_paused`) advances it
/// deterministically.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl ClockPort for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sleep_advances_paused_time() {
        let clock = TokioClock;
        let start = clock.now();
        clock.sleep(Duration::from_secs(5)).await;
        assert!(clock.now().duration_since(start) >= Duration::from_secs(5));
    }

    #[test]
    fn zero_sleep_completes() {
        tokio_test::block_on(TokioClock.sleep(Duration::ZERO));
    }

    #[test]
    fn now_is_monotonic() {
        let clock = TokioClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
