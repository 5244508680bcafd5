//! uarray: fixed-capacity, thread-safe slot arrays with stable first-fit
//! indices.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use ds::{ConcurrentSlotArray, SlotArray};
pub use error::{Rejected, SlotArrayError};
