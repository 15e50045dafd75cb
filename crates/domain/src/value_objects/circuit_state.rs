//! Circuit breaker state

use std::fmt;

use serde::{Deserialize, Serialize};

/// State of a circuit breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitState {
    /// Normal operation, calls pass through
    #[default]
    Closed,
    /// Dependency considered down, calls are refused
    Open,
    /// Recovery timeout elapsed, trial calls are let through
    HalfOpen,
}

impl CircuitState {
    /// Numeric encoding used for the state gauge
    #[must_use]
    pub const fn gauge_value(self) -> f64 {
        match self {
            Self::Closed => 0.0,
            Self::HalfOpen => 0.5,
            Self::Open => 1.0,
        }
    }

    /// Stable upper-case label, e.g. `HALF_OPEN`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "CLOSED",
            Self::Open => "OPEN",
            Self::HalfOpen => "HALF_OPEN",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
