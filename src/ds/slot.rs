//! Tagged slot cell.
//!
//! A slot is either empty or owns exactly one item. Occupancy and
//! ownership are the same fact: there is no separate "used" flag that could
//! disagree with the stored value, so an empty slot can never be released
//! twice and an occupied one is released exactly once (when it is taken,
//! replaced, or dropped).
//!
//! ```text
//!   Slot<T>
//!   ┌──────────────────────┐      take()       ┌──────────────────────┐
//!   │ Occupied(item)       │ ────────────────► │ Empty                │
//!   │                      │ ◄──────────────── │                      │
//!   └──────────────────────┘      fill()       └──────────────────────┘
//!          │  ▲
//!          └──┘ replace(): payload swap, occupancy unchanged
//! ```

use std::mem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    Empty,
    Occupied(T),
}

// Manual impl: a derived one would require `T: Default`.
impl<T> Default for Slot<T> {
    #[inline]
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> Slot<T> {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Occupied(item) => Some(item),
            Self::Empty => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Occupied(item) => Some(item),
            Self::Empty => None,
        }
    }

    /// Stores `item` in an empty slot.
    ///
    /// Returns the item back if the slot is already occupied.
    #[inline]
    pub fn fill(&mut self, item: T) -> Result<(), T> {
        match self {
            Self::Empty => {
                *self = Self::Occupied(item);
                Ok(())
            }
            Self::Occupied(_) => Err(item),
        }
    }

    /// Empties the slot, handing its item to the caller.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        match mem::take(self) {
            Self::Occupied(item) => Some(item),
            Self::Empty => None,
        }
    }

    /// Swaps the payload of an occupied slot.
    ///
    /// Returns `Err(item)` without touching the slot when it is empty.
    #[inline]
    pub fn replace(&mut self, item: T) -> Result<T, T> {
        match self {
            Self::Occupied(current) => Ok(mem::replace(current, item)),
            Self::Empty => Err(item),
        }
    }
}
