//! Deterministic value → key mapping used for identity-based lookup.

use std::fmt;
use std::sync::Arc;

use crate::id;

/// Derives a stable string key for a domain value.
///
/// Two values mapping to the same key are the same logical node for lookup
/// purposes, regardless of which instance is passed in.
pub struct Identifier<T> {
    key: Arc<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> Identifier<T> {
    /// Create an identifier from a key function.
    pub fn new(key: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self { key: Arc::new(key) }
    }

    /// Compute the key of a value.
    pub fn key(&self, value: &T) -> String {
        (self.key)(value)
    }
}

impl<T: fmt::Display + 'static> Identifier<T> {
    /// Key values by their normalized display text, e.g. `"My File"` → `"my-file"`.
    pub fn from_display() -> Self {
        Self::new(|value: &T| id::build(&value.to_string(), &[]))
    }
}

impl<T> Clone for Identifier<T> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
        }
    }
}

impl<T> fmt::Debug for Identifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identifier").finish_non_exhaustive()
    }
}
