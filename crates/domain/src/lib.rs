//! Domain layer for the catalog resilience lab
//!
//! Contains the product records served by the catalog, the chaos settings that
//! drive fault injection, and the circuit breaker vocabulary.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
