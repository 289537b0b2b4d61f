//! Type descriptors naming decoding plans.

use std::fmt;

/// Stable identifier naming a decoding plan for one record type.
///
/// Descriptors are qualified names, e.g. `ledgerwire:SignedTransaction`.
/// Equality is structural; registry lookups are by this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor(String);

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeDescriptor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
