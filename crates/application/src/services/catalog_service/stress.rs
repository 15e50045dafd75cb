//! CPU and memory stressors

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

/// Size of one ballast buffer
pub const BALLAST_ITEM_BYTES: usize = 1024;

/// Spin a blocking-pool thread for `duration`
///
/// Runs on `spawn_blocking` so the async workers keep serving other
/// requests; the caller still waits for the burn to finish.
pub(super) async fn burn_cpu(duration: Duration) {
    let result = tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        let mut spins: u64 = 0;
        while start.elapsed() < duration {
            spins = std::hint::black_box(spins.wrapping_add(1));
        }
        spins
    })
    .await;

    match result {
        Ok(spins) => debug!(
            spins,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "CPU stress done"
        ),
        Err(e) => warn!(error = %e, "CPU stress task failed"),
    }
}

/// Process-local memory that is only ever grown
#[derive(Debug, Default)]
pub struct MemoryBallast {
    buffers: Mutex<Vec<Box<[u8]>>>,
}

impl MemoryBallast {
    /// Append `items` buffers of [`BALLAST_ITEM_BYTES`]; returns the new total
    pub fn grow(&self, items: usize) -> usize {
        let mut buffers = self.buffers.lock();
        buffers.reserve(items);
        buffers.extend((0..items).map(|_| vec![b'A'; BALLAST_ITEM_BYTES].into_boxed_slice()));
        buffers.len()
    }

    /// Buffers currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.lock().len()
    }

    /// Whether nothing has been injected yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
