//! Slot array configuration.
//!
//! Collects construction parameters in one place and validates them before
//! any slot storage is allocated.
//!
//! ## Example
//!
//! ```rust
//! use uarray::builder::SlotArrayBuilder;
//!
//! let array = SlotArrayBuilder::new(8)
//!     .max_capacity_limit(1024)
//!     .label("connections")
//!     .try_build::<String>()
//!     .unwrap();
//! assert_eq!(array.max_capacity(), 8);
//! assert_eq!(array.label(), "connections");
//! ```

use crate::ds::{ConcurrentSlotArray, SlotArray};
use crate::error::{BuildError, ConfigError};

/// Builder for creating slot arrays.
#[derive(Debug, Clone)]
pub struct SlotArrayBuilder {
    capacity: usize,
    max_capacity_limit: Option<usize>,
    label: Option<String>,
}

impl SlotArrayBuilder {
    /// Create a new builder for an array with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_capacity_limit: None,
            label: None,
        }
    }

    /// Reject capacities above `limit`.
    ///
    /// Useful when the capacity comes from user input and an oversized value
    /// should fail validation rather than attempt a huge allocation.
    pub fn max_capacity_limit(mut self, limit: usize) -> Self {
        self.max_capacity_limit = Some(limit);
        self
    }

    /// Name attached to the array's log events.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks the parameters without allocating.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(limit) = self.max_capacity_limit {
            if self.capacity > limit {
                return Err(ConfigError::new(format!(
                    "capacity {} exceeds configured limit {}",
                    self.capacity, limit
                )));
            }
        }
        Ok(())
    }

    /// Build a thread-safe array.
    ///
    /// # Panics
    ///
    /// Panics if validation or allocation fails. Use
    /// [`try_build`](Self::try_build) to handle either case.
    pub fn build<T>(self) -> ConcurrentSlotArray<T> {
        match self.try_build() {
            Ok(array) => array,
            Err(err) => panic!("{err}"),
        }
    }

    /// Build a thread-safe array, reporting invalid configuration or
    /// allocation failure.
    pub fn try_build<T>(self) -> Result<ConcurrentSlotArray<T>, BuildError> {
        self.validate()?;
        let array = ConcurrentSlotArray::try_new(self.capacity)?;
        Ok(match self.label {
            Some(label) => array.with_label(label),
            None => array,
        })
    }

    /// Build the unsynchronized core for single-threaded use.
    pub fn build_unsynchronized<T>(self) -> Result<SlotArray<T>, BuildError> {
        self.validate()?;
        Ok(SlotArray::try_new(self.capacity)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SlotArrayError;

    #[test]
    fn builds_with_requested_capacity() {
        let array = SlotArrayBuilder::new(3).build::<u32>();
        assert_eq!(array.max_capacity(), 3);
        assert_eq!(array.used_count(), 0);
        assert_eq!(array.label(), "");
    }

    #[test]
    fn zero_capacity_is_valid() {
        let array = SlotArrayBuilder::new(0).try_build::<u32>().unwrap();
        assert_eq!(array.max_capacity(), 0);
        assert!(array.add(1).is_err());
    }

    #[test]
    fn limit_rejects_oversized_capacity() {
        let builder = SlotArrayBuilder::new(100).max_capacity_limit(10);
        let err = builder.clone().validate().unwrap_err();
        assert!(err.message().contains("exceeds configured limit 10"));

        let err = builder.try_build::<u8>().unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }

    #[test]
    fn limit_allows_equal_capacity() {
        let builder = SlotArrayBuilder::new(10).max_capacity_limit(10);
        assert!(builder.validate().is_ok());
        assert_eq!(builder.capacity(), 10);
    }

    #[test]
    fn allocation_failure_is_reported() {
        let err = SlotArrayBuilder::new(usize::MAX)
            .try_build::<u64>()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::SlotArray(SlotArrayError::Allocation {
                capacity: usize::MAX
            })
        );
    }

    #[test]
    #[should_panic(expected = "exceeds configured limit")]
    fn build_panics_on_invalid_config() {
        let _ = SlotArrayBuilder::new(5).max_capacity_limit(4).build::<u8>();
    }

    #[test]
    fn unsynchronized_build() {
        let mut array = SlotArrayBuilder::new(2)
            .build_unsynchronized::<&str>()
            .unwrap();
        assert_eq!(array.add("a").unwrap(), 0);
        assert_eq!(array.capacity(), 2);
    }
}
