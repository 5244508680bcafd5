pub mod listing;
pub mod slot;
pub mod slot_array;

pub use listing::{IndexListing, format_indices};
pub use slot::Slot;
pub use slot_array::{ConcurrentSlotArray, SlotArray};
