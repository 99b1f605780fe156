//! Type-safe ID types for views and outputs
//!
//! Strongly-typed IDs that cannot be zero (NonZeroU64), cannot be mixed
//! up with one another, and are generated atomically.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for views
///
/// Non-zero, unique within the compositor lifetime, and type-safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ViewId(NonZeroU64);

/// Atomic counter for generating unique view IDs.
/// Starts at 1 to keep NonZeroU64 valid.
static VIEW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ViewId {
    /// Generate a new unique view ID
    pub fn next() -> Self {
        let id = VIEW_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        // Safety: we start at 1 and only increment, so this is never zero
        ViewId(NonZeroU64::new(id).expect("View ID counter overflow"))
    }

    /// Create a ViewId from a raw value, rejecting zero
    pub fn from_raw(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(ViewId)
    }

    /// Get the raw ID value
    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "View({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_id_is_unique() {
        let id1 = ViewId::next();
        let id2 = ViewId::next();
        assert_ne!(id1, id2);
    }

    #[test]
    fn view_id_never_zero() {
        for _ in 0..100 {
            let id = ViewId::next();
            assert_ne!(id.get(), 0);
        }
    }

    #[test]
    fn view_id_from_raw_rejects_zero() {
        assert!(ViewId::from_raw(0).is_none());
        assert!(ViewId::from_raw(1).is_some());
    }
}
