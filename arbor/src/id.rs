//! Identifier service.
//!
//! Two facilities live here:
//!
//! - [`build`] / [`as_id`] derive a deterministic, normalized id from free text.
//!   Segments are split on whitespace and hyphens, stripped of everything but
//!   `[a-zA-Z0-9_]`, `_` becomes `-`, lowercased, empty segments dropped, and
//!   the rest joined with `-`.
//! - [`IdScope`] hands out ids that are unused within the scope. The process-wide
//!   scope behind [`unique`] and [`unique_with`] stands in for the session.
//!
//! ```
//! use arbor::id;
//!
//! assert_eq!(id::build("My Item", &["Extra!"]), "my-item-extra");
//! assert_ne!(id::unique().unwrap(), id::unique().unwrap());
//! ```

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex};

use regex::Regex;

use crate::error::IdError;

const UNIQUE_PREFIX: &str = "id-";
const SEPARATOR: &str = "-";

/// Counter values `0..=i32::MAX`, after which the counter wraps to zero.
const DEFAULT_CAPACITY: u64 = i32::MAX as u64 + 1;

static SEGMENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("Invalid segment pattern"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("Invalid character pattern"));

static SESSION: LazyLock<Mutex<IdScope>> = LazyLock::new(|| Mutex::new(IdScope::new()));

/// Normalize a single piece of text into an id fragment.
///
/// Returns an empty string when nothing survives normalization.
pub fn as_id(text: &str) -> String {
    SEGMENT_SPLIT
        .split(text)
        .map(|segment| {
            DISALLOWED
                .replace_all(segment, "")
                .replace('_', SEPARATOR)
                .to_lowercase()
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Join `id` and `additional` into one normalized id.
///
/// Deterministic: the same input always yields the same id.
pub fn build(id: &str, additional: &[&str]) -> String {
    std::iter::once(id)
        .chain(additional.iter().copied())
        .map(as_id)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Create an id that is unused within the session.
///
/// The session remembers every id it hands out, or that was [reserved](reserve),
/// until it is [released](release), so its memory grows with the number of
/// live ids. Long-running callers that discard ids should release them, or
/// draw from an [`IdScope`] of their own that is dropped with its owner.
pub fn unique() -> Result<String, IdError> {
    session().unique()
}

/// Create a session-unique id of the form `build(prefix, additional)-id-N`.
///
/// The unique part comes last. The unique part stays taken until it is
/// [released](release); see [`unique`].
pub fn unique_with(prefix: &str, additional: &[&str]) -> Result<String, IdError> {
    session().unique_with(prefix, additional)
}

/// Mark an externally created id as taken for the session.
pub fn reserve(id: impl Into<String>) -> bool {
    session().reserve(id)
}

/// Release a session id so it may be handed out again.
///
/// Returns false if the id was not taken. For ids from [`unique_with`], pass
/// the `id-N` suffix, which is what the session tracks.
pub fn release(id: &str) -> bool {
    session().release(id)
}

fn session() -> std::sync::MutexGuard<'static, IdScope> {
    SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A namespace of ids guaranteed not to collide with each other.
///
/// Candidates are `id-0`, `id-1`, ... from a counter that wraps at the scope's
/// capacity. Every candidate is checked against the ids already taken, so a
/// wrapped counter never reissues a live id. When the whole counter space is
/// taken, [`IdScope::unique`] fails with [`IdError::ExhaustedNamespace`].
#[derive(Debug, Clone)]
pub struct IdScope {
    counter: u64,
    capacity: u64,
    taken: HashSet<String>,
}

impl IdScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty scope whose counter wraps after `capacity` values.
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            counter: 0,
            capacity: capacity.max(1),
            taken: HashSet::new(),
        }
    }

    /// Hand out the next free id.
    pub fn unique(&mut self) -> Result<String, IdError> {
        for _ in 0..self.capacity {
            let candidate = format!("{UNIQUE_PREFIX}{}", self.counter);
            self.counter = if self.counter + 1 >= self.capacity {
                0
            } else {
                self.counter + 1
            };
            if self.taken.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        log::warn!("Identifier scope exhausted ({} candidates)", self.capacity);
        Err(IdError::ExhaustedNamespace {
            capacity: self.capacity,
        })
    }

    /// Like [`IdScope::unique`], prefixed with `build(prefix, additional)`.
    pub fn unique_with(&mut self, prefix: &str, additional: &[&str]) -> Result<String, IdError> {
        let unique = self.unique()?;
        let base = build(prefix, additional);
        if base.is_empty() {
            Ok(unique)
        } else {
            Ok(format!("{base}{SEPARATOR}{unique}"))
        }
    }

    /// Mark an id as taken. Returns false if it already was.
    pub fn reserve(&mut self, id: impl Into<String>) -> bool {
        self.taken.insert(id.into())
    }

    /// Release a taken id. Returns false if it was not taken.
    pub fn release(&mut self, id: &str) -> bool {
        self.taken.remove(id)
    }

    /// Check whether an id is taken.
    pub fn contains(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    /// Number of taken ids.
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Check if no id has been taken yet.
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

impl Default for IdScope {
    fn default() -> Self {
        Self::new()
    }
}
