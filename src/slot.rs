//! Slot: one cell of the probe array.

/// Lifecycle: `Empty -> Occupied` (add), `Occupied -> Tombstone` (remove),
/// `Tombstone -> Occupied` (add reusing the slot). A grow-rehash carries
/// only `Occupied` slots forward.
///
/// A tombstone keeps no key: it is logically absent and only holds its
/// place in probe chains so later lookups keep walking past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    Empty,
    Occupied(T),
    Tombstone,
}

// No `T: Default` bound, unlike the derive.
impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<T> Slot<T> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// The live key, if any.
    #[inline]
    pub fn key(&self) -> Option<&T> {
        match self {
            Slot::Occupied(k) => Some(k),
            _ => None,
        }
    }

    /// Demote an occupied slot to a tombstone, returning the key it held.
    /// Empty slots and tombstones are left untouched.
    pub fn bury(&mut self) -> Option<T> {
        match core::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(k) => Some(k),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Move the live key out, leaving the slot empty. Used when the old
    /// array is drained into a grown one.
    pub fn into_key(self) -> Option<T> {
        match self {
            Slot::Occupied(k) => Some(k),
            _ => None,
        }
    }
}
