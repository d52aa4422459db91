// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The [`CircularBuffer`] struct, its constructors, and every read only operation.
//!
//! The mutating algorithms live in sibling modules which extend [`CircularBuffer`] with
//! more inherent `impl` blocks:
//! - [`push_back`], [`push_front`], [`pop_front`], [`pop_back`] in `cb_push_pop_ops`.
//! - [`insert`], [`remove`] in `cb_insert_remove_ops`.
//! - [`resize`] in `cb_resize_ops`.
//! - [`linearize`] in `cb_linearize_ops`.
//!
//! # Index arithmetic
//!
//! `head` is the physical slot of the logical front. `tail` is one past the physical slot
//! of the logical back, or [`SENTINEL`] when the buffer is full. There is no separate
//! length field: `head == tail` always means empty, and full is encoded by the sentinel.
//!
//! ```text
//! partial, not wrapped      partial, wrapped          full
//! ┌───┬───┬───┬───┬───┐     ┌───┬───┬───┬───┬───┐     ┌───┬───┬───┬───┬───┐
//! │   │ a │ b │ c │   │     │ c │   │   │ a │ b │     │ d │ e │ a │ b │ c │
//! └───┴───┴───┴───┴───┘     └───┴───┴───┴───┴───┘     └───┴───┴───┴───┴───┘
//!       ↑head       ↑tail         ↑tail   ↑head               ↑head   tail = SENTINEL
//! ```
//!
//! - `len = capacity` when `tail == SENTINEL`, else `(tail + capacity - head) % capacity`.
//! - The slots of the logical range `[head, tail)` (wrapping) are constructed in the
//!   storage arena, every other slot is not.
//! - A zero capacity buffer keeps `head == 0` and `tail == SENTINEL`.
//!
//! [`push_back`]: CircularBuffer::push_back
//! [`push_front`]: CircularBuffer::push_front
//! [`pop_front`]: CircularBuffer::pop_front
//! [`pop_back`]: CircularBuffer::pop_back
//! [`insert`]: CircularBuffer::insert
//! [`remove`]: CircularBuffer::remove
//! [`resize`]: CircularBuffer::resize
//! [`linearize`]: CircularBuffer::linearize

use std::{fmt::{Debug, Formatter},
          ops::Range};

use super::{BufferStorePolicy, Cursor};
use crate::{CircBufError, CircBufResult, raw_storage::RawStorage};

/// Reserved index value. As a `tail` it means "full", as a [`Cursor`] position it means
/// "exhausted".
pub(crate) const SENTINEL: usize = usize::MAX;

/// A ring buffer over an arena of explicitly constructed slots.
///
/// # Example
///
/// ```
/// use r3bl_circbuf::{BufferStorePolicy, CircBufError, CircularBuffer};
///
/// let mut buffer = CircularBuffer::new(3, BufferStorePolicy::ThrowOnFull);
/// buffer.push_back("b").unwrap();
/// buffer.push_back("c").unwrap();
/// buffer.push_front("a").unwrap();
///
/// assert!(buffer.is_full());
/// assert_eq!(buffer.push_back("d"), Err(CircBufError::BufferFull { capacity: 3 }));
/// assert_eq!(buffer.pop_front(), Ok("a"));
/// assert_eq!(buffer.back(), Ok(&"c"));
/// ```
///
/// # Moving out
///
/// [`Default`] is an empty zero capacity buffer, so [`std::mem::take`] moves the storage
/// out in O(1) and leaves a buffer behind that rejects every push with
/// [`CircBufError::ZeroCapacity`] and every pop with [`CircBufError::BufferEmpty`].
///
/// # Copying
///
/// [`Clone`] always yields a linearized copy with the same capacity and policy, no matter
/// how the source is laid out.
pub struct CircularBuffer<T> {
    pub(super) storage: RawStorage<T>,
    pub(super) head: usize,
    pub(super) tail: usize,
    pub(super) policy: BufferStorePolicy,
}

impl<T> Default for CircularBuffer<T> {
    fn default() -> Self { Self::new(0, BufferStorePolicy::default()) }
}

impl<T> CircularBuffer<T> {
    /// Allocate a buffer with room for `capacity` elements. A capacity of 0 is allowed;
    /// such a buffer rejects every push until it is [resized](Self::resize).
    #[must_use]
    pub fn new(capacity: usize, policy: BufferStorePolicy) -> Self {
        Self {
            storage: RawStorage::new(capacity),
            head: 0,
            tail: if capacity == 0 { SENTINEL } else { 0 },
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> BufferStorePolicy { self.policy }

    /// Change what happens on the next push or insert into a full buffer. Does not touch
    /// any element.
    pub fn set_policy(&mut self, policy: BufferStorePolicy) { self.policy = policy; }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.tail == SENTINEL {
            self.capacity()
        } else {
            (self.tail + self.capacity() - self.head) % self.capacity()
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize { self.storage.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// A zero capacity buffer is both empty and full.
    #[must_use]
    pub fn is_full(&self) -> bool { self.len() == self.capacity() }

    /// `true` when the logical front sits in physical slot 0, so the logical order and
    /// the physical order coincide.
    #[must_use]
    pub fn is_linearized(&self) -> bool { self.head == 0 }

    /// Element at logical position `pos`.
    ///
    /// # Errors
    ///
    /// [`CircBufError::OutOfRange`] if `pos >= len()`.
    pub fn at(&self, pos: usize) -> CircBufResult<&T> {
        let slot = self.checked_slot(pos, "can't access element outside of the range")?;
        Ok(self.storage.at(slot))
    }

    /// Mutable counterpart of [`Self::at`].
    ///
    /// # Errors
    ///
    /// [`CircBufError::OutOfRange`] if `pos >= len()`.
    pub fn at_mut(&mut self, pos: usize) -> CircBufResult<&mut T> {
        let slot = self.checked_slot(pos, "can't access element outside of the range")?;
        Ok(self.storage.at_mut(slot))
    }

    /// The oldest element.
    ///
    /// # Errors
    ///
    /// [`CircBufError::BufferEmpty`] if there are no elements.
    pub fn front(&self) -> CircBufResult<&T> {
        self.ensure_not_empty()?;
        Ok(self.storage.at(self.head))
    }

    /// # Errors
    ///
    /// [`CircBufError::BufferEmpty`] if there are no elements.
    pub fn front_mut(&mut self) -> CircBufResult<&mut T> {
        self.ensure_not_empty()?;
        Ok(self.storage.at_mut(self.head))
    }

    /// The newest element.
    ///
    /// # Errors
    ///
    /// [`CircBufError::BufferEmpty`] if there are no elements.
    pub fn back(&self) -> CircBufResult<&T> {
        self.ensure_not_empty()?;
        Ok(self.storage.at(self.last_slot()))
    }

    /// # Errors
    ///
    /// [`CircBufError::BufferEmpty`] if there are no elements.
    pub fn back_mut(&mut self) -> CircBufResult<&mut T> {
        self.ensure_not_empty()?;
        let slot = self.last_slot();
        Ok(self.storage.at_mut(slot))
    }

    /// The first `len()` physical slots as one slice.
    ///
    /// This is only meaningful when the buffer is linearized (the slice is in logical
    /// order) or full (every slot is live, the slice is in physical order starting at slot
    /// 0). Use [`Self::as_slices`] for a view that works in every state.
    ///
    /// # Errors
    ///
    /// [`CircBufError::NotLinearizedNotFull`] if neither holds, since the live elements
    /// are then split by unconstructed slots.
    pub fn data(&self) -> CircBufResult<&[T]> {
        self.ensure_flat()?;
        Ok(self.storage.slice(0..self.len()))
    }

    /// Mutable counterpart of [`Self::data`].
    ///
    /// # Errors
    ///
    /// [`CircBufError::NotLinearizedNotFull`] if the buffer is neither linearized nor
    /// full.
    pub fn data_mut(&mut self) -> CircBufResult<&mut [T]> {
        self.ensure_flat()?;
        let len = self.len();
        Ok(self.storage.slice_mut(0..len))
    }

    /// The logical contents as two physical runs: the first run starts at the front, the
    /// second (possibly empty) run continues from slot 0 after wrapping.
    #[must_use]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (first, second_end) = self.physical_runs();
        (self.storage.slice(first), self.storage.slice(0..second_end))
    }

    /// Mutable counterpart of [`Self::as_slices`].
    #[must_use]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (first, second_end) = self.physical_runs();
        self.storage.split_slices_mut(first, second_end)
    }

    /// Drop every live element. The capacity does not change.
    ///
    /// The buffer is empty before the first destructor runs. If a destructor panics, the
    /// remaining elements are still dropped and the buffer stays empty and usable.
    pub fn clear(&mut self) {
        let (first, second_end) = self.physical_runs();
        self.head = 0;
        self.tail = if self.capacity() == 0 { SENTINEL } else { 0 };
        self.storage.destroy_runs(first, second_end);
    }

    /// Cursor at the logical front.
    #[must_use]
    pub fn iter(&self) -> Cursor<'_, T> { Cursor::new(self, 0) }

    /// Cursor at the logical front (same as [`Self::iter`]).
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T> { Cursor::new(self, 0) }

    /// Exhausted cursor, one past the logical back.
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T> { Cursor::new(self, SENTINEL) }
}

/// Helpers for the index arithmetic shared by every operation.
impl<T> CircularBuffer<T> {
    /// Physical slot of logical position `pos`. Requires `capacity() > 0`.
    pub(super) fn slot_of(&self, pos: usize) -> usize { (self.head + pos) % self.capacity() }

    pub(super) fn next_slot(&self, slot: usize) -> usize {
        if slot + 1 == self.capacity() { 0 } else { slot + 1 }
    }

    pub(super) fn prev_slot(&self, slot: usize) -> usize {
        if slot == 0 { self.capacity() - 1 } else { slot - 1 }
    }

    /// Physical slot of the logical back. Requires a non empty buffer.
    pub(super) fn last_slot(&self) -> usize {
        let end = if self.tail == SENTINEL { self.head } else { self.tail };
        self.prev_slot(end)
    }

    fn checked_slot(&self, pos: usize, context: &'static str) -> CircBufResult<usize> {
        let len = self.len();
        if pos >= len {
            return Err(CircBufError::out_of_range(pos, len, context));
        }
        Ok(self.slot_of(pos))
    }

    pub(super) fn ensure_not_empty(&self) -> CircBufResult<()> {
        if self.is_empty() {
            return Err(CircBufError::buffer_empty(self.capacity()));
        }
        Ok(())
    }

    fn ensure_flat(&self) -> CircBufResult<()> {
        if !self.is_linearized() && !self.is_full() {
            return Err(CircBufError::not_linearized_not_full(
                self.head,
                self.len(),
                self.capacity(),
            ));
        }
        Ok(())
    }

    /// `(first run, end of second run)` of the live range, see [`Self::as_slices`].
    fn physical_runs(&self) -> (Range<usize>, usize) { self.physical_runs_of(0..self.len()) }

    /// `(first run, end of second run)` of the logical positions in `positions`. The
    /// second run starts at slot 0 and is empty unless the range wraps.
    pub(super) fn physical_runs_of(&self, positions: Range<usize>) -> (Range<usize>, usize) {
        if positions.is_empty() {
            return (0..0, 0);
        }
        let start = self.slot_of(positions.start);
        let end = start + positions.len();
        if end <= self.capacity() {
            (start..end, 0)
        } else {
            (start..self.capacity(), end - self.capacity())
        }
    }
}

impl<T: Clone> CircularBuffer<T> {
    /// A linearized copy with the same capacity and logical contents, and the given store
    /// policy. The receiver is not touched.
    #[must_use]
    pub fn linearize_copy(&self, policy: BufferStorePolicy) -> Self {
        let mut copy = Self::new(self.capacity(), policy);
        for (slot, value) in self.iter().enumerate() {
            copy.storage.construct(slot, value.clone());
        }
        copy.tail = if self.is_full() { SENTINEL } else { self.len() };
        copy
    }
}

impl<T> Drop for CircularBuffer<T> {
    fn drop(&mut self) { self.clear(); }
}

impl<T: Clone> Clone for CircularBuffer<T> {
    fn clone(&self) -> Self { self.linearize_copy(self.policy) }
}

/// Two buffers are equal when their logical contents are equal. Capacity, policy, and
/// physical layout are ignored.
impl<T: PartialEq> PartialEq for CircularBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularBuffer<T> {}

impl<T: Debug> Debug for CircularBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircularBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("head", &self.head)
            .field("tail", &(self.tail != SENTINEL).then_some(self.tail))
            .field("policy", &self.policy)
            .field("elements", &DebugElements(self))
            .finish()
    }
}

struct DebugElements<'a, T>(&'a CircularBuffer<T>);

impl<T: Debug> Debug for DebugElements<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
