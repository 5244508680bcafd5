//! Fixed-capacity slot array with first-fit allocation.
//!
//! Holds up to `capacity` owned items, each at a stable integer index. New
//! items always land in the lowest-index empty slot, so index assignment is
//! reproducible for a given sequence of adds and deletes.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                ConcurrentSlotArray<T>                                │
//!   │   capacity (immutable, read without the lock)                        │
//!   │   inner: RwLock<SlotArray<T>>  (one coarse lock, no per-slot locks)  │
//!   │                                                                      │
//!   │   ┌────────────────────────────────────────────────────────────────┐ │
//!   │   │ SlotArray<T>                                                   │ │
//!   │   │   slots: Box<[Slot<T>]>                                        │ │
//!   │   │   ┌───────┬───────┬───────┬───────┬───────┬───────┐            │ │
//!   │   │   │ 0: A  │ 1: B  │ 2: -  │ 3: C  │ 4: -  │ 5: -  │            │ │
//!   │   │   └───────┴───────┴───────┴───────┴───────┴───────┘            │ │
//!   │   │                       ▲                                        │ │
//!   │   │   first_free ─────────┘  (every index below it is occupied)    │ │
//!   │   │   len = 3                                                      │ │
//!   │   └────────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lock Discipline
//!
//! | Operation                     | Lock mode  |
//! |-------------------------------|------------|
//! | `add`, `edit`, `replace`      | exclusive  |
//! | `delete`, `take`, `clear_all` | exclusive  |
//! | `read*`, `used_*`, `contains` | shared     |
//! | `max_capacity`                | none       |
//!
//! Each call is linearizable on its own; two calls are not atomic as a pair.
//! Items released by `edit`/`delete`/`clear_all` are moved out under the
//! lock and dropped after it is released, so a slow `Drop` never stalls
//! other threads.
//!
//! ## Reads
//!
//! The lock is never exposed through a raw reference. Callers choose one of:
//! - [`ConcurrentSlotArray::read`]: clones the item (`T: Clone`). Storing
//!   `Arc<U>` makes this a cheap handle that keeps the item alive
//!   independently of the slot.
//! - [`ConcurrentSlotArray::read_with`]: runs a closure under the shared lock.
//! - [`ConcurrentSlotArray::read_guard`]: returns a mapped read guard; the
//!   reference is valid exactly as long as the guard lives.
//!
//! The lock is not reentrant. A thread holding a guard (or running a
//! `read_with` closure) must not call back into the same array: a writer
//! queued in between blocks the second shared acquisition forever.
//!
//! ## Performance Characteristics
//!
//! | Operation     | Time            | Notes                                  |
//! |---------------|-----------------|----------------------------------------|
//! | `add`         | O(1) when full, otherwise O(n - first_free) | first-fit scan |
//! | `edit`        | O(1)            |                                        |
//! | `delete`      | O(1)            | lowers `first_free`                    |
//! | `read`        | O(1)            | plus clone cost                        |
//! | `used_count`  | O(1)            | tracked count                          |
//! | `used_indices`| O(n)            |                                        |
//! | `clear_all`   | O(n)            |                                        |
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use tracing::{debug, trace, warn};

use crate::ds::listing::{IndexListing, format_indices};
use crate::ds::slot::Slot;
use crate::error::{Rejected, SlotArrayError, TeardownBlocker};
#[cfg(feature = "metrics")]
use crate::metrics::{
    MetricsSnapshotProvider, SlotArrayMetrics, SlotArrayMetricsRecorder, SlotArrayMetricsSnapshot,
};

/// Unsynchronized fixed-capacity slot array.
///
/// Mutation goes through `&mut self`; wrap it in [`ConcurrentSlotArray`] to
/// share it between threads.
///
/// # Example
///
/// ```
/// use uarray::ds::SlotArray;
///
/// let mut array = SlotArray::new(3);
/// assert_eq!(array.add("a").unwrap(), 0);
/// assert_eq!(array.add("b").unwrap(), 1);
///
/// assert_eq!(array.delete(0), 1);
/// assert_eq!(array.delete(0), 0);
///
/// // First fit: the freed slot is reused before slot 2.
/// assert_eq!(array.add("c").unwrap(), 0);
/// assert_eq!(array.used_indices(), vec![0, 1]);
/// ```
#[derive(Debug)]
pub struct SlotArray<T> {
    slots: Box<[Slot<T>]>,
    len: usize,
    first_free: usize,
    #[cfg(feature = "metrics")]
    metrics: SlotArrayMetrics,
}

impl<T> SlotArray<T> {
    /// Creates an array with `capacity` empty slots.
    ///
    /// A capacity of zero is legal: every `add` is rejected as full.
    ///
    /// # Panics
    ///
    /// Panics if the slot storage cannot be allocated. Use
    /// [`try_new`](Self::try_new) to handle that case.
    pub fn new(capacity: usize) -> Self {
        let slots = std::iter::repeat_with(Slot::default)
            .take(capacity)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self::from_slots(slots)
    }

    /// Creates an array with `capacity` empty slots, reporting allocation
    /// failure instead of aborting.
    pub fn try_new(capacity: usize) -> Result<Self, SlotArrayError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| SlotArrayError::Allocation { capacity })?;
        slots.resize_with(capacity, Slot::default);
        Ok(Self::from_slots(slots.into_boxed_slice()))
    }

    fn from_slots(slots: Box<[Slot<T>]>) -> Self {
        Self {
            slots,
            len: 0,
            first_free: 0,
            #[cfg(feature = "metrics")]
            metrics: SlotArrayMetrics::new(),
        }
    }

    /// Stores `item` in the lowest-index empty slot and returns that index.
    ///
    /// When every slot is occupied the item is handed back inside
    /// [`Rejected`] and nothing changes.
    pub fn add(&mut self, item: T) -> Result<usize, Rejected<T>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_add_call();

        let full = SlotArrayError::Full {
            capacity: self.capacity(),
        };
        if self.is_full() {
            #[cfg(feature = "metrics")]
            self.metrics.record_add_full();
            return Err(Rejected::new(item, full));
        }

        let start = self.first_free;
        let Some(offset) = self.slots[start..].iter().position(Slot::is_empty) else {
            // Unreachable while `len` is accurate: fewer than `capacity`
            // occupied slots means one at or above `first_free` is empty.
            return Err(Rejected::new(item, full));
        };
        let index = start + offset;

        self.slots[index] = Slot::Occupied(item);
        self.len += 1;
        self.first_free = index + 1;

        #[cfg(feature = "metrics")]
        self.metrics.record_scan_steps(offset as u64 + 1);

        Ok(index)
    }

    /// Replaces the item at an occupied `index`, releasing the old one.
    ///
    /// Returns `index` on success. An empty or out-of-range index rejects
    /// the new item without mutating anything.
    pub fn edit(&mut self, index: usize, item: T) -> Result<usize, Rejected<T>> {
        self.replace(index, item).map(|_old| index)
    }

    /// Like [`edit`](Self::edit), but hands the previous item back instead
    /// of releasing it.
    pub fn replace(&mut self, index: usize, item: T) -> Result<T, Rejected<T>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_edit_call();

        let result = match self.slots.get_mut(index) {
            Some(slot) => slot.replace(item),
            None => Err(item),
        };
        result.map_err(|item| {
            #[cfg(feature = "metrics")]
            self.metrics.record_edit_not_found();
            Rejected::new(item, SlotArrayError::NotFound { index })
        })
    }

    /// Releases the item at `index`.
    ///
    /// Returns how many items were removed: `1`, or `0` when the slot was
    /// already empty or out of range. Summing the results of a batch of
    /// deletes counts the ones that did work.
    pub fn delete(&mut self, index: usize) -> usize {
        usize::from(self.take(index).is_some())
    }

    /// Empties the slot at `index`, handing its item to the caller.
    pub fn take(&mut self, index: usize) -> Option<T> {
        #[cfg(feature = "metrics")]
        self.metrics.record_delete_call();

        let item = self.slots.get_mut(index)?.take()?;
        self.len -= 1;
        if index < self.first_free {
            self.first_free = index;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_delete_removed();

        Some(item)
    }

    /// Returns the item at `index`, or `None` if the slot is empty or out of
    /// range.
    pub fn get(&self, index: usize) -> Option<&T> {
        let item = self.slots.get(index).and_then(Slot::get);

        #[cfg(feature = "metrics")]
        self.record_read(item.is_some());

        item
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Slot::get_mut)
    }

    /// Runs `f` on the item at `index` in place. Counted as an edit.
    ///
    /// Returns `None` if the slot is empty or out of range.
    pub fn update_with<R>(&mut self, index: usize, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let result = self.get_mut(index).map(f);

        #[cfg(feature = "metrics")]
        self.record_edit(result.is_some());

        result
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Slot::is_occupied)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Fixed number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.slots.len() - self.len
    }

    /// Releases every item in place. Returns how many were released.
    pub fn clear(&mut self) -> usize {
        self.take_all().len()
    }

    /// Empties every slot, handing the items to the caller in ascending
    /// index order.
    pub fn take_all(&mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len);
        if self.len > 0 {
            items.extend(self.slots.iter_mut().filter_map(Slot::take));
        }
        self.len = 0;
        self.first_free = 0;

        #[cfg(feature = "metrics")]
        self.metrics.record_clear(items.len() as u64);

        items
    }

    /// Occupied indices in ascending order.
    pub fn used_indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.len);
        indices.extend(self.iter().map(|(index, _)| index));
        indices
    }

    /// Iterates `(index, &item)` over occupied slots in ascending index
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.get().map(|item| (index, item)))
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let occupied = self.slots.iter().filter(|slot| slot.is_occupied()).count();
        assert_eq!(self.len, occupied);
        assert!(self.len <= self.slots.len());
        assert!(self.first_free <= self.slots.len());
        assert!(
            self.slots[..self.first_free].iter().all(Slot::is_occupied),
            "empty slot below first_free hint {}",
            self.first_free
        );
    }
}

#[cfg(feature = "metrics")]
impl<T> SlotArray<T> {
    pub fn metrics(&self) -> &SlotArrayMetrics {
        &self.metrics
    }

    #[inline]
    fn record_edit(&self, found: bool) {
        self.metrics.record_edit_call();
        if !found {
            self.metrics.record_edit_not_found();
        }
    }

    fn record_read(&self, found: bool) {
        self.metrics.record_read_call();
        if !found {
            self.metrics.record_read_not_found();
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<SlotArrayMetricsSnapshot> for SlotArray<T> {
    fn snapshot(&self) -> SlotArrayMetricsSnapshot {
        self.metrics.snapshot_with(self.len, self.capacity())
    }
}

/// Thread-safe fixed-capacity slot array.
///
/// One [`parking_lot::RwLock`] guards the whole slot sequence: reads take it
/// shared, mutations take it exclusive. Share it with `Arc` across threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use uarray::ds::ConcurrentSlotArray;
///
/// let array = Arc::new(ConcurrentSlotArray::new(4));
/// let handles: Vec<_> = (0..4)
///     .map(|n| {
///         let array = Arc::clone(&array);
///         thread::spawn(move || array.add(n).unwrap())
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(array.used_count(), 4);
/// assert_eq!(array.used_index_string(), "0,1,2,3");
/// ConcurrentSlotArray::destroy_shared(array).unwrap();
/// ```
#[derive(Debug)]
pub struct ConcurrentSlotArray<T> {
    inner: RwLock<SlotArray<T>>,
    capacity: usize,
    label: String,
}

impl<T> ConcurrentSlotArray<T> {
    /// Creates an array with `capacity` empty slots.
    ///
    /// # Panics
    ///
    /// Panics if the slot storage cannot be allocated.
    pub fn new(capacity: usize) -> Self {
        Self::from(SlotArray::new(capacity))
    }

    /// Creates an array with `capacity` empty slots, reporting allocation
    /// failure as [`SlotArrayError::Allocation`].
    pub fn try_new(capacity: usize) -> Result<Self, SlotArrayError> {
        SlotArray::try_new(capacity).map(Self::from)
    }

    /// Attaches a name to this array's log events.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Stores `item` in the lowest-index empty slot and returns its index.
    ///
    /// Returns the item inside [`Rejected`] when the array is full.
    pub fn add(&self, item: T) -> Result<usize, Rejected<T>> {
        let result = self.inner.write().add(item);
        match &result {
            Ok(index) => trace!(label = %self.label, index, "slot occupied"),
            Err(_) => debug!(
                label = %self.label,
                capacity = self.capacity,
                "slot array full, item returned to caller"
            ),
        }
        result
    }

    /// Replaces the item at an occupied `index` and returns `index`.
    ///
    /// The previous item is released after the lock is dropped. An empty or
    /// out-of-range index returns the new item inside [`Rejected`].
    pub fn edit(&self, index: usize, item: T) -> Result<usize, Rejected<T>> {
        let old = self.replace(index, item)?;
        drop(old);
        Ok(index)
    }

    /// Like [`edit`](Self::edit), but hands the previous item back.
    pub fn replace(&self, index: usize, item: T) -> Result<T, Rejected<T>> {
        let result = self.inner.write().replace(index, item);
        if result.is_ok() {
            trace!(label = %self.label, index, "slot item replaced");
        }
        result
    }

    /// Mutates the item at `index` in place under the exclusive lock.
    ///
    /// Recorded as an edit in the `metrics` counters.
    pub fn update_with<R>(
        &self,
        index: usize,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, SlotArrayError> {
        self.inner
            .write()
            .update_with(index, f)
            .ok_or(SlotArrayError::NotFound { index })
    }

    /// Releases the item at `index`; returns `1` if one was removed, else
    /// `0`.
    pub fn delete(&self, index: usize) -> usize {
        let removed = self.take(index);
        usize::from(removed.is_some())
    }

    /// Empties the slot at `index`, handing its item to the caller.
    pub fn take(&self, index: usize) -> Option<T> {
        let item = self.inner.write().take(index);
        if item.is_some() {
            trace!(label = %self.label, index, "slot released");
        }
        item
    }

    /// Returns a clone of the item at `index`.
    ///
    /// The clone is independent of the slot: a concurrent `edit` or `delete`
    /// cannot invalidate it. Store `Arc<U>` to make this a reference-counted
    /// handle rather than a deep copy.
    pub fn read(&self, index: usize) -> Result<T, SlotArrayError>
    where
        T: Clone,
    {
        self.read_with(index, T::clone)
    }

    /// Runs `f` on the item at `index` under the shared lock.
    ///
    /// `f` must not call back into the same array; see
    /// [`read_guard`](Self::read_guard) for why.
    pub fn read_with<R>(
        &self,
        index: usize,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, SlotArrayError> {
        let array = self.inner.read();
        array.get(index).map(f).ok_or(SlotArrayError::NotFound { index })
    }

    /// Returns a read guard mapped to the item at `index`.
    ///
    /// Writers block until the guard is dropped, so keep it short-lived.
    ///
    /// # Deadlocks
    ///
    /// The lock is fair: once a writer is queued, new shared acquisitions
    /// wait behind it. While the guard is alive, the holding thread must not
    /// call any other method of the same array, including read-only ones
    /// such as [`used_count`](Self::used_count). Copy what you need out of
    /// the guard and drop it first.
    pub fn read_guard(
        &self,
        index: usize,
    ) -> Result<MappedRwLockReadGuard<'_, T>, SlotArrayError> {
        RwLockReadGuard::try_map(self.inner.read(), |array| array.get(index))
            .map_err(|_| SlotArrayError::NotFound { index })
    }

    pub fn contains(&self, index: usize) -> bool {
        self.inner.read().contains(index)
    }

    /// Releases every item. Capacity is unchanged; returns how many items
    /// were released.
    pub fn clear_all(&self) -> usize {
        let items = self.inner.write().take_all();
        let released = items.len();
        drop(items);
        debug!(label = %self.label, released, "slot array cleared");
        released
    }

    /// Number of occupied slots, read under the shared lock.
    pub fn used_count(&self) -> usize {
        self.inner.read().len()
    }

    /// Fixed number of slots. Never takes the lock.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.read().is_full()
    }

    pub fn free_count(&self) -> usize {
        self.inner.read().free_count()
    }

    /// Occupied indices, strictly ascending.
    pub fn used_indices(&self) -> Vec<usize> {
        self.inner.read().used_indices()
    }

    /// Occupied indices joined with commas (`"0,2,5"`), without a trailing
    /// separator. Empty when no slot is occupied.
    pub fn used_index_string(&self) -> String {
        let indices = self.used_indices();
        format_indices(&indices)
    }

    /// Clones of every stored item, in ascending index order.
    pub fn used_items(&self) -> Vec<T>
    where
        T: Clone,
    {
        let array = self.inner.read();
        let mut items = Vec::with_capacity(array.len());
        items.extend(array.iter().map(|(_, item)| item.clone()));
        items
    }

    /// `(index, item)` pairs for every occupied slot, ascending.
    pub fn used_entries(&self) -> Vec<(usize, T)>
    where
        T: Clone,
    {
        let array = self.inner.read();
        let mut entries = Vec::with_capacity(array.len());
        entries.extend(array.iter().map(|(index, item)| (index, item.clone())));
        entries
    }

    /// Tears the array down, releasing every item still stored.
    ///
    /// Fails with [`SlotArrayError::LockTeardown`] only if a guard was
    /// leaked (e.g. with `mem::forget`); the items are released regardless.
    pub fn destroy(self) -> Result<(), SlotArrayError> {
        let locked = self.inner.is_locked();
        let array = self.inner.into_inner();
        let released = array.len();
        let occupied = array.used_indices();
        drop(array);

        let slots = IndexListing(&occupied);
        if locked {
            warn!(
                label = %self.label,
                released,
                %slots,
                "slot array destroyed while its lock was held"
            );
            return Err(SlotArrayError::LockTeardown(TeardownBlocker::LockHeld));
        }
        debug!(label = %self.label, released, %slots, "slot array destroyed");
        Ok(())
    }

    /// Tears down an array shared through `Arc`.
    ///
    /// Succeeds when `this` is the last handle. Otherwise every item is still
    /// released and [`SlotArrayError::LockTeardown`] reports how many other
    /// handles keep the (now empty) storage alive.
    pub fn destroy_shared(this: Arc<Self>) -> Result<(), SlotArrayError> {
        match Arc::try_unwrap(this) {
            Ok(array) => array.destroy(),
            Err(shared) => {
                let released = shared.clear_all();
                let handles = Arc::strong_count(&shared).saturating_sub(1);
                warn!(
                    label = %shared.label,
                    released,
                    handles,
                    "slot array still shared at teardown, items released"
                );
                Err(SlotArrayError::LockTeardown(TeardownBlocker::SharedHandles(handles)))
            }
        }
    }

    /// Unwraps the lock, returning the unsynchronized array.
    pub fn into_inner(self) -> SlotArray<T> {
        self.inner.into_inner()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let array = self.inner.read();
        assert_eq!(array.capacity(), self.capacity);
        array.debug_validate_invariants();
    }
}

impl<T> From<SlotArray<T>> for ConcurrentSlotArray<T> {
    fn from(array: SlotArray<T>) -> Self {
        let capacity = array.capacity();
        debug!(capacity, "slot array created");
        Self {
            inner: RwLock::new(array),
            capacity,
            label: String::new(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<SlotArrayMetricsSnapshot> for ConcurrentSlotArray<T> {
    fn snapshot(&self) -> SlotArrayMetricsSnapshot {
        self.inner.read().snapshot()
    }
}


#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(u16),
        Edit(usize, u16),
        Delete(usize),
        Clear,
    }

    fn op_strategy(capacity: usize) -> impl Strategy<Value = Op> {
        let index = 0..capacity + 2;
        prop_oneof![
            4 => any::<u16>().prop_map(Op::Add),
            2 => (index.clone(), any::<u16>()).prop_map(|(i, v)| Op::Edit(i, v)),
            3 => index.prop_map(Op::Delete),
            1 => Just(Op::Clear),
        ]
    }

    /// Naive reference: scan from zero every time.
    fn model_add(model: &mut [Option<u16>], value: u16) -> Option<usize> {
        let index = model.iter().position(Option::is_none)?;
        model[index] = Some(value);
        Some(index)
    }

    proptest! {
        /// Property: results match a scan-from-zero reference model
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(
            capacity in 0usize..12,
            ops in prop::collection::vec(op_strategy(12), 0..120)
        ) {
            let mut array = SlotArray::new(capacity);
            let mut model: Vec<Option<u16>> = vec![None; capacity];

            for op in ops {
                match op {
                    Op::Add(value) => {
                        let expected = model_add(&mut model, value);
                        prop_assert_eq!(array.add(value).ok(), expected);
                    }
                    Op::Edit(index, value) => {
                        let expected = match model.get_mut(index) {
                            Some(slot) if slot.is_some() => {
                                *slot = Some(value);
                                Some(index)
                            }
                            _ => None,
                        };
                        prop_assert_eq!(array.edit(index, value).ok(), expected);
                    }
                    Op::Delete(index) => {
                        let expected = model
                            .get_mut(index)
                            .map_or(0, |slot| usize::from(slot.take().is_some()));
                        prop_assert_eq!(array.delete(index), expected);
                    }
                    Op::Clear => {
                        let expected = model.iter_mut().filter_map(Option::take).count();
                        prop_assert_eq!(array.clear(), expected);
                    }
                }
                array.debug_validate_invariants();
            }

            for (index, expected) in model.iter().enumerate() {
                prop_assert_eq!(array.get(index), expected.as_ref());
            }
        }

        /// Property: listing is strictly ascending and its length is len()
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_listing_ascending_and_counted(
            ops in prop::collection::vec(op_strategy(16), 0..80)
        ) {
            let mut array = SlotArray::new(16);
            for op in ops {
                match op {
                    Op::Add(value) => { let _ = array.add(value); }
                    Op::Edit(index, value) => { let _ = array.edit(index, value); }
                    Op::Delete(index) => { array.delete(index); }
                    Op::Clear => { array.clear(); }
                }
                let indices = array.used_indices();
                prop_assert_eq!(indices.len(), array.len());
                prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(array.len() <= array.capacity());
            }
        }

        /// Property: exactly `capacity` adds succeed on a fresh array
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_capacity_bounds_adds(capacity in 0usize..64, extra in 1usize..8) {
            let mut array = SlotArray::new(capacity);
            for expected in 0..capacity {
                prop_assert_eq!(array.add(expected).ok(), Some(expected));
            }
            for _ in 0..extra {
                prop_assert!(array.add(0).is_err());
                prop_assert_eq!(array.len(), capacity);
            }
        }
    }
}
