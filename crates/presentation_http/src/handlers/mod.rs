//! HTTP request handlers

pub mod chaos;
pub mod health;
pub mod metrics;
pub mod products;
pub mod root;
