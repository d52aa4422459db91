// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`Cursor`] is a random access position over the logical order of a
//! [`CircularBuffer`]. It is also the buffer's shared [`Iterator`].
//!
//! A cursor holds a shared borrow of its buffer, so any mutation of the buffer while a
//! cursor is alive is rejected at compile time:
//!
//! ```compile_fail
//! use r3bl_circbuf::{BufferStorePolicy, CircularBuffer};
//!
//! let mut buffer = CircularBuffer::new(2, BufferStorePolicy::ReplaceOnFull);
//! buffer.push_back(1).unwrap();
//! let cursor = buffer.begin();
//! buffer.push_back(2).unwrap();
//! let _ = cursor.get();
//! ```
//!
//! # Positions
//!
//! Valid positions are `[0, len)`. Every position outside of that, in either direction,
//! collapses to one exhausted position which compares equal to [`CircularBuffer::end`].
//! Moving backward from the exhausted position counts from `len`, so `end()` retreated by
//! 1 is the last element.

use std::{cmp::Ordering,
          fmt::{Debug, Formatter},
          iter::FusedIterator};

use super::{CircularBuffer, SENTINEL};
use crate::{CircBufError, CircBufResult};

pub struct Cursor<'a, T> {
    buffer: &'a CircularBuffer<T>,
    /// Logical position, or [`SENTINEL`] when exhausted.
    index: usize,
    /// Length of the buffer when the cursor was created.
    size: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(buffer: &'a CircularBuffer<T>, index: usize) -> Self {
        let size = buffer.len();
        let index = if index < size { index } else { SENTINEL };
        Self {
            buffer,
            index,
            size,
        }
    }

    /// Logical position, `None` when exhausted.
    #[must_use]
    pub fn position(&self) -> Option<usize> { (self.index != SENTINEL).then_some(self.index) }

    #[must_use]
    pub fn is_exhausted(&self) -> bool { self.index == SENTINEL }

    /// A copy of this cursor moved by `offset` positions (negative moves toward the
    /// front).
    #[must_use]
    pub fn offset_by(&self, offset: isize) -> Self {
        let index = self
            .base()
            .checked_add_signed(offset)
            .filter(|&it| it < self.size)
            .unwrap_or(SENTINEL);
        Self { index, ..*self }
    }

    /// Move forward by `count` positions.
    pub fn advance(&mut self, count: usize) -> &mut Self {
        *self = self.offset_by(isize::try_from(count).unwrap_or(isize::MAX));
        self
    }

    /// Move backward by `count` positions.
    pub fn retreat(&mut self, count: usize) -> &mut Self {
        *self = self.offset_by(isize::try_from(count).map_or(isize::MIN, |it| -it));
        self
    }

    /// The element under the cursor.
    ///
    /// # Errors
    ///
    /// [`CircBufError::OutOfRange`] if the cursor is exhausted.
    pub fn get(&self) -> CircBufResult<&'a T> {
        if self.index == SENTINEL {
            return Err(CircBufError::out_of_range(
                self.size,
                self.size,
                "can't dereference an exhausted cursor",
            ));
        }
        self.buffer.at(self.index)
    }

    /// The element `offset` positions away from the cursor, without moving it.
    ///
    /// # Errors
    ///
    /// [`CircBufError::OutOfRange`] if that position is outside of `[0, len)`.
    pub fn peek_at(&self, offset: isize) -> CircBufResult<&'a T> {
        self.offset_by(offset).get()
    }

    /// Number of positions from `other` to `self`. The exhausted position counts as
    /// `len`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn distance_from(&self, other: &Self) -> isize {
        self.base() as isize - other.base() as isize
    }

    fn base(&self) -> usize { if self.index == SENTINEL { self.size } else { self.index } }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Cursor<'_, T> {}

/// Equal when both point into the same buffer (by address) at the same position.
impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.buffer, other.buffer) && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

/// Cursors into the same buffer are ordered by position, with the exhausted position
/// after every element. Cursors into different buffers are unordered.
///
/// Use the comparison operators (or call `PartialOrd::partial_cmp` explicitly): the
/// method call syntax `a.partial_cmp(b)` resolves to [`Iterator::partial_cmp`], which
/// compares the remaining elements instead.
impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        std::ptr::eq(self.buffer, other.buffer).then(|| self.base().cmp(&other.base()))
    }
}

impl<T> Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position())
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.get().ok()?;
        self.advance(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size - self.base();
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.advance(n);
        self.next()
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{BufferStorePolicy, assert_eq2};

    /// `[10, 20, 30, 40]` wrapped around the end of a capacity 5 block.
    fn buffer() -> CircularBuffer<i32> {
        let mut buffer = CircularBuffer::new(5, BufferStorePolicy::ReplaceOnFull);
        for it in [0, 0, 0, 10, 20, 30, 40] {
            buffer.push_back(it).unwrap();
        }
        buffer.pop_front().unwrap();
        buffer
    }

    #[test]
    fn test_iterate_in_logical_order() {
        let buffer = buffer();
        assert!(!buffer.is_linearized());
        let cursor = buffer.iter();
        assert_eq2!(cursor.len(), 4);
        assert_eq2!(cursor.copied().collect::<Vec<_>>(), vec![10, 20, 30, 40]);
    }

    #[test_case(0, 2, Some(2) ; "forward")]
    #[test_case(3, -3, Some(0) ; "backward to front")]
    #[test_case(3, 1, None ; "forward past back")]
    #[test_case(0, -1, None ; "backward past front")]
    #[test_case(1, isize::MAX, None ; "huge forward")]
    #[test_case(1, isize::MIN, None ; "huge backward")]
    fn test_offset_by(start: usize, offset: isize, expected: Option<usize>) {
        let buffer = buffer();
        let cursor = buffer.begin().offset_by(isize::try_from(start).unwrap());
        assert_eq2!(cursor.offset_by(offset).position(), expected);
    }

    #[test]
    fn test_retreat_from_end_counts_from_size() {
        let buffer = buffer();
        let mut cursor = buffer.end();
        assert!(cursor.is_exhausted());
        assert_eq2!(cursor.retreat(1).get(), Ok(&40));
        assert_eq2!(cursor.retreat(3).get(), Ok(&10));
        assert_eq2!(Cursor::position(cursor.retreat(1)), None);
        assert_eq2!(cursor, buffer.end());
    }

    #[test]
    fn test_advance_overshoot_lands_on_end() {
        let buffer = buffer();
        let mut cursor = buffer.begin();
        cursor.advance(2);
        assert_eq2!(cursor.get(), Ok(&30));
        cursor.advance(100);
        assert_eq2!(cursor, buffer.end());
        assert_eq2!(
            cursor.get(),
            Err(CircBufError::out_of_range(
                4,
                4,
                "can't dereference an exhausted cursor"
            ))
        );
        assert_eq2!(cursor.next(), None);
        assert_eq2!(cursor.next(), None);
    }

    #[test]
    fn test_peek_and_distance() {
        let buffer = buffer();
        let begin = buffer.begin();
        let third = begin.offset_by(2);
        assert_eq2!(third.peek_at(-1), Ok(&20));
        assert_eq2!(third.peek_at(1), Ok(&40));
        assert!(third.peek_at(2).is_err());
        assert_eq2!(third.distance_from(&begin), 2);
        assert_eq2!(begin.distance_from(&third), -2);
        assert_eq2!(buffer.end().distance_from(&begin), 4);
    }

    #[test]
    fn test_equality_requires_same_buffer() {
        let first = buffer();
        let second = first.clone();
        assert_eq2!(first, second);
        assert_eq2!(first.begin(), first.begin());
        assert!(first.begin() != second.begin());
        assert!(first.begin() != first.end());
    }

    #[test]
    fn test_ordering_by_position() {
        let buffer = buffer();
        let begin = buffer.begin();
        let second = begin.offset_by(1);
        assert!(begin < second);
        assert!(second <= second.offset_by(0));
        assert!(buffer.end() > second.offset_by(2));
        assert_eq2!(
            PartialOrd::partial_cmp(&second, &begin),
            Some(Ordering::Greater)
        );
        assert_eq2!(
            PartialOrd::partial_cmp(&buffer.end(), &buffer.begin().offset_by(-1)),
            Some(Ordering::Equal)
        );

        let other = buffer.clone();
        assert_eq2!(PartialOrd::partial_cmp(&begin, &other.begin()), None);
        assert_eq2!(PartialOrd::partial_cmp(&begin, &other.end()), None);
        assert!(!PartialOrd::ge(&begin, &other.begin()));
    }

    #[test]
    fn test_empty_buffer_begin_is_end() {
        let buffer = CircularBuffer::<i32>::new(3, BufferStorePolicy::ThrowOnFull);
        assert_eq2!(buffer.begin(), buffer.end());
        assert_eq2!(buffer.iter().len(), 0);
        let zero = CircularBuffer::<i32>::default();
        assert_eq2!(zero.begin(), zero.end());
    }

    #[test]
    fn test_nth_and_size_hint() {
        let buffer = buffer();
        let mut cursor = buffer.iter();
        assert_eq2!(cursor.nth(1), Some(&20));
        assert_eq2!(cursor.size_hint(), (2, Some(2)));
        assert_eq2!(cursor.nth(5), None);
        assert_eq2!(cursor.size_hint(), (0, Some(0)));
    }
}
