//! Fault source backed by the thread-local RNG

use application::ports::FaultSourcePort;

/// Uniform draws from `rand`'s thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngFaultSource;

impl FaultSourcePort for ThreadRngFaultSource {
    fn roll(&self) -> f64 {
        rand::random::<f64>()
    }
}
