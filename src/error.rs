//! Error types for the uarray library.
//!
//! ## Key Components
//!
//! - [`SlotArrayError`]: Failure taxonomy of slot array operations
//!   (allocation, full, not found, lock teardown).
//! - [`Rejected`]: Returned by `add`/`edit` when the item could not be
//!   stored; hands the item back to the caller together with the reason.
//! - [`ConfigError`]: Returned when builder parameters are invalid
//!   (e.g. a capacity above the configured ceiling).
//!
//! ## Example Usage
//!
//! ```
//! use uarray::ds::ConcurrentSlotArray;
//! use uarray::error::SlotArrayError;
//!
//! let array = ConcurrentSlotArray::new(1);
//! assert_eq!(array.add("first").unwrap(), 0);
//!
//! // The array is full: the caller keeps its item.
//! let rejected = array.add("second").unwrap_err();
//! assert_eq!(rejected.error(), &SlotArrayError::Full { capacity: 1 });
//! assert_eq!(rejected.into_item(), "second");
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// SlotArrayError
// ---------------------------------------------------------------------------

/// Error returned by slot array operations.
///
/// Every variant is surfaced synchronously; the array never retries
/// internally, and no operation that returns an error has mutated any slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotArrayError {
    /// Slot storage for `capacity` slots could not be obtained.
    Allocation { capacity: usize },
    /// Every slot is occupied.
    Full { capacity: usize },
    /// The index is out of range or the slot at it is empty.
    NotFound { index: usize },
    /// The lock could not be torn down cleanly. Items were still released on
    /// a best-effort basis.
    LockTeardown(TeardownBlocker),
}

/// What prevented a clean lock teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeardownBlocker {
    /// Other `Arc` handles still shared the array; its storage stays alive
    /// until the last of them drops.
    SharedHandles(usize),
    /// The lock was still held, which only happens when a guard was leaked.
    LockHeld,
}

impl SlotArrayError {
    /// Returns `true` for errors the caller can recover from by retrying
    /// later or with a different index.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Full { .. } | Self::NotFound { .. })
    }
}

impl fmt::Display for SlotArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation { capacity } => {
                write!(f, "failed to allocate storage for {capacity} slots")
            }
            Self::Full { capacity } => write!(f, "all {capacity} slots are occupied"),
            Self::NotFound { index } => write!(f, "no item stored at slot {index}"),
            Self::LockTeardown(TeardownBlocker::SharedHandles(handles)) => write!(
                f,
                "cannot tear down slot array lock: {handles} other handle(s) still alive"
            ),
            Self::LockTeardown(TeardownBlocker::LockHeld) => {
                f.write_str("cannot tear down slot array lock: lock is still held")
            }
        }
    }
}

impl std::error::Error for SlotArrayError {}

// ---------------------------------------------------------------------------
// Rejected
// ---------------------------------------------------------------------------

/// An item the array refused to take ownership of.
///
/// Produced by `add` (when full) and `edit`/`replace` (when the slot is
/// empty or out of range). Ownership never transferred, so the item is
/// returned intact.
#[derive(Clone, PartialEq, Eq)]
pub struct Rejected<T> {
    item: T,
    error: SlotArrayError,
}

impl<T> Rejected<T> {
    #[inline]
    pub(crate) fn new(item: T, error: SlotArrayError) -> Self {
        Self { item, error }
    }

    /// Returns the reason the item was rejected.
    #[inline]
    pub fn error(&self) -> &SlotArrayError {
        &self.error
    }

    /// Borrows the rejected item.
    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Recovers the rejected item.
    #[inline]
    pub fn into_item(self) -> T {
        self.item
    }

    #[inline]
    pub fn into_parts(self) -> (T, SlotArrayError) {
        (self.item, self.error)
    }
}

// Manual impl so `T` does not need `Debug` for `unwrap_err()` on results.
impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T> std::error::Error for Rejected<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<Rejected<T>> for SlotArrayError {
    #[inline]
    fn from(rejected: Rejected<T>) -> Self {
        rejected.error
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when slot array configuration parameters are invalid.
///
/// Produced by [`SlotArrayBuilder::try_build`](crate::builder::SlotArrayBuilder::try_build)
/// and carries a human-readable description of which parameter failed
/// validation.
///
/// # Example
///
/// ```
/// use uarray::builder::SlotArrayBuilder;
///
/// let err = SlotArrayBuilder::new(64)
///     .max_capacity_limit(16)
///     .validate()
///     .unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// BuildError
// ---------------------------------------------------------------------------

/// Error returned by [`SlotArrayBuilder::try_build`](crate::builder::SlotArrayBuilder::try_build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    Config(ConfigError),
    SlotArray(SlotArrayError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::SlotArray(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::SlotArray(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SlotArrayError> for BuildError {
    fn from(err: SlotArrayError) -> Self {
        Self::SlotArray(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- SlotArrayError ---------------------------------------------------

    #[test]
    fn slot_array_error_display() {
        assert_eq!(
            SlotArrayError::Full { capacity: 2 }.to_string(),
            "all 2 slots are occupied"
        );
        assert_eq!(
            SlotArrayError::NotFound { index: 7 }.to_string(),
            "no item stored at slot 7"
        );
        assert!(
            SlotArrayError::Allocation { capacity: 9 }
                .to_string()
                .contains("9 slots")
        );
        assert!(
            SlotArrayError::LockTeardown(TeardownBlocker::SharedHandles(3))
                .to_string()
                .contains("3 other handle")
        );
        assert!(
            SlotArrayError::LockTeardown(TeardownBlocker::LockHeld)
                .to_string()
                .contains("still held")
        );
    }

    #[test]
    fn slot_array_error_recoverability() {
        assert!(SlotArrayError::Full { capacity: 1 }.is_recoverable());
        assert!(SlotArrayError::NotFound { index: 0 }.is_recoverable());
        assert!(!SlotArrayError::Allocation { capacity: 1 }.is_recoverable());
        assert!(!SlotArrayError::LockTeardown(TeardownBlocker::LockHeld).is_recoverable());
    }

    #[test]
    fn slot_array_error_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<SlotArrayError>();
    }

    // -- Rejected ---------------------------------------------------------

    #[test]
    fn rejected_returns_item_and_reason() {
        let rejected = Rejected::new(String::from("payload"), SlotArrayError::Full { capacity: 4 });
        assert_eq!(rejected.item(), "payload");
        assert_eq!(rejected.to_string(), "all 4 slots are occupied");

        let (item, err) = rejected.into_parts();
        assert_eq!(item, "payload");
        assert_eq!(err, SlotArrayError::Full { capacity: 4 });
    }

    #[test]
    fn rejected_debug_does_not_require_item_debug() {
        struct Opaque;
        let rejected = Rejected::new(Opaque, SlotArrayError::NotFound { index: 1 });
        let dbg = format!("{:?}", rejected);
        assert!(dbg.contains("NotFound"));
    }

    #[test]
    fn rejected_converts_into_slot_array_error() {
        fn add_or_fail() -> Result<usize, SlotArrayError> {
            let attempt: Result<usize, Rejected<u8>> =
                Err(Rejected::new(1u8, SlotArrayError::Full { capacity: 0 }));
            let index = attempt?;
            Ok(index)
        }
        assert_eq!(add_or_fail(), Err(SlotArrayError::Full { capacity: 0 }));
    }

    #[test]
    fn rejected_source_is_slot_array_error() {
        use std::error::Error;
        let rejected = Rejected::new((), SlotArrayError::NotFound { index: 3 });
        let source = rejected.source().expect("source present");
        assert_eq!(source.to_string(), "no item stored at slot 3");
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity exceeds limit");
        assert_eq!(err.to_string(), "capacity exceeds limit");
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    // -- BuildError -------------------------------------------------------

    #[test]
    fn build_error_wraps_both_sources() {
        let config: BuildError = ConfigError::new("bad limit").into();
        assert_eq!(config.to_string(), "invalid configuration: bad limit");

        let alloc: BuildError = SlotArrayError::Allocation { capacity: 5 }.into();
        assert!(matches!(
            alloc,
            BuildError::SlotArray(SlotArrayError::Allocation { capacity: 5 })
        ));
    }
}
