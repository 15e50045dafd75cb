//! Fault source port definition
//!
//! Every probabilistic fault decision draws from this port.

use std::fmt;

/// Source of uniform draws in `[0.0, 1.0)`
///
/// A fault with rate `r` fires when a draw is strictly below `r`, so a rate of
/// `0.0` never fires and a rate of `1.0` always fires.
pub trait FaultSourcePort: Send + Sync + fmt::Debug {
    /// Draw the next value in `[0.0, 1.0)`
    fn roll(&self) -> f64;

    /// Decide whether a fault with the given rate fires
    fn fires(&self, rate: f64) -> bool {
        self.roll() < rate
    }
}
