//! Domain entities - Objects with identity

mod product;

pub use product::ProductRecord;
