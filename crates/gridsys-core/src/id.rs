//! Opaque identity for grid preferences entries.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier for one [`GridPreferences`](crate::GridPreferences).
///
/// Ids are unique within a running process and never reused. They are not
/// part of the serialized snapshot: decoding the same snapshot twice yields
/// entries with distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreferencesId(NonZeroU64);

impl PreferencesId {
    /// Mint a fresh id.
    #[must_use]
    pub fn mint() -> Self {
        let raw = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1 and u64 does not wrap within a session.
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for PreferencesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_distinct_and_increasing() {
        let a = PreferencesId::mint();
        let b = PreferencesId::mint();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn display_is_prefixed() {
        let id = PreferencesId::mint();
        assert_eq!(id.to_string(), format!("#{}", id.get()));
    }
}
