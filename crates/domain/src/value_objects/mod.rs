//! Value Objects - Immutable, identity-less domain primitives

mod chaos_settings;
mod circuit_state;
mod product_id;

pub use chaos_settings::ChaosSettings;
pub use circuit_state::CircuitState;
pub use product_id::ProductId;
