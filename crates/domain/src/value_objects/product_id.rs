//! Product identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Identifier of a catalog product
///
/// Identifiers are opaque strings (the seeded catalog uses `"1"`..`"4"`).
/// Surrounding whitespace is trimmed and empty identifiers are rejected.
///
/// # Examples
///
/// ```
/// use domain::value_objects::ProductId;
///
/// let id = ProductId::new(" 1 ").expect("valid id");
/// assert_eq!(id.as_str(), "1");
/// assert!(ProductId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create a validated product identifier
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProductId` if the trimmed value is empty.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = value.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidProductId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build an identifier from a compile-time literal
    ///
    /// Empty literals are a programming error, caught by a debug assertion.
    #[must_use]
    pub fn from_static(value: &'static str) -> Self {
        debug_assert!(!value.trim().is_empty(), "product id literal must not be empty");
        Self(value.trim().to_string())
    }

    /// Borrow the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
