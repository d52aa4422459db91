// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Insert and remove at an arbitrary logical position.
//!
//! Both shift elements toward the tail (insert) or toward the head (remove), one storage
//! relocate per shifted element, so the cost is proportional to the distance from
//! `pos` to the logical back. A relocated element is moved bitwise; it is never dropped or
//! cloned.
//!
//! ```text
//! insert(1, x)                        remove(1)
//! ┌───┬───┬───┬───┬───┐               ┌───┬───┬───┬───┬───┐
//! │ a │ b │ c │   │   │               │ a │ x │ b │ c │   │
//! └───┴───┴───┴───┴───┘               └───┴───┴───┴───┴───┘
//!           ╰─→ ╰─→                         ←─╯ ←─╯
//! ┌───┬───┬───┬───┬───┐               ┌───┬───┬───┬───┬───┐
//! │ a │ x │ b │ c │   │               │ a │ b │ c │   │   │
//! └───┴───┴───┴───┴───┘               └───┴───┴───┴───┴───┘
//! ```

use super::{BufferInsertPolicy, BufferStorePolicy, CircularBuffer, DEBUG_CIRCBUF, SENTINEL,
            cb_push_pop_ops::log_rejected};
use crate::{CircBufError, CircBufResult};

impl<T> CircularBuffer<T> {
    /// Insert `value` so that it ends up at logical position `pos`, which may be anywhere
    /// in `[0, len()]`. Every element from `pos` onward moves one position toward the back.
    ///
    /// If the buffer is full and the store policy is
    /// [`ReplaceOnFull`](BufferStorePolicy::ReplaceOnFull), `evict` first drops one
    /// element to make room: [`DiscardHead`](BufferInsertPolicy::DiscardHead) drops the
    /// oldest, [`DiscardTail`](BufferInsertPolicy::DiscardTail) the newest. After the
    /// eviction `pos` is clamped to the new length, so `insert(len(), ..)` on a full buffer
    /// still appends.
    ///
    /// # Errors
    ///
    /// Checked in this order, before anything is mutated:
    /// - [`CircBufError::ZeroCapacity`] if the capacity is 0.
    /// - [`CircBufError::OutOfRange`] if `pos > len()`.
    /// - [`CircBufError::BufferFull`] if the buffer is full and the policy is
    ///   [`ThrowOnFull`](BufferStorePolicy::ThrowOnFull).
    pub fn insert(
        &mut self,
        pos: usize,
        value: T,
        evict: BufferInsertPolicy,
    ) -> CircBufResult<&mut T> {
        self.check_insert(pos).inspect_err(log_rejected)?;

        let mut pos = pos;
        if self.tail == SENTINEL {
            DEBUG_CIRCBUF.then(|| {
                // % is Display, ? is Debug.
                tracing::trace!(
                    message = "♻️ Evicting element to insert on full buffer",
                    pos = %pos,
                    capacity = %self.capacity(),
                    evict = %evict
                );
            });
            // The buffer is full so neither pop can fail.
            let evicted = match evict {
                BufferInsertPolicy::DiscardHead => self.pop_front(),
                BufferInsertPolicy::DiscardTail => self.pop_back(),
            };
            drop(evicted);
            pos = pos.min(self.len());
        }

        // Shift [pos, len) one slot toward the tail, starting from the back.
        let target = self.slot_of(pos);
        let mut current = self.tail;
        while current != target {
            let prev = self.prev_slot(current);
            self.storage.relocate(prev, current);
            current = prev;
        }

        self.tail = self.next_slot(self.tail);
        if self.tail == self.head {
            self.tail = SENTINEL;
        }
        Ok(self.storage.construct(target, value))
    }

    /// Remove and return the element at logical position `pos`. Every element after it
    /// moves one position toward the front.
    ///
    /// # Errors
    ///
    /// - [`CircBufError::BufferEmpty`] if there are no elements.
    /// - [`CircBufError::OutOfRange`] if `pos >= len()`.
    pub fn remove(&mut self, pos: usize) -> CircBufResult<T> {
        self.ensure_not_empty().inspect_err(log_rejected)?;
        let len = self.len();
        if pos >= len {
            let error =
                CircBufError::out_of_range(pos, len, "can't remove outside of the range");
            log_rejected(&error);
            return Err(error);
        }

        let target = self.slot_of(pos);
        let value = self.storage.take(target);

        // Close the gap, starting from the front.
        let mut current = target;
        for _ in 0..(len - pos - 1) {
            let next = self.next_slot(current);
            self.storage.relocate(next, current);
            current = next;
        }

        if self.tail == SENTINEL {
            self.tail = self.head;
        }
        self.tail = self.prev_slot(self.tail);
        Ok(value)
    }

    fn check_insert(&self, pos: usize) -> CircBufResult<()> {
        if self.capacity() == 0 {
            return Err(CircBufError::zero_capacity("insert"));
        }
        let len = self.len();
        if pos > len {
            return Err(CircBufError::out_of_range(
                pos,
                len + 1,
                "can't insert outside of the range",
            ));
        }
        if self.tail == SENTINEL && self.policy == BufferStorePolicy::ThrowOnFull {
            return Err(CircBufError::buffer_full(self.capacity()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{assert_eq2, logical_vec,
                test_fixtures::{DropCounter, MoveOnly}};

    /// Capacity 6 holding `[0, 1, 2, 3]` with head at slot 4, so the live range wraps.
    fn wrapped(policy: BufferStorePolicy) -> CircularBuffer<i32> {
        let mut buffer = CircularBuffer::new(6, policy);
        for it in [0, 0, 0, 0] {
            buffer.push_back(it).unwrap();
        }
        for _ in 0..4 {
            buffer.pop_front().unwrap();
        }
        for it in 0..4 {
            buffer.push_back(it).unwrap();
        }
        buffer
    }

    #[test]
    fn test_wrapped_fixture_layout() {
        let buffer = wrapped(BufferStorePolicy::ThrowOnFull);
        assert_eq2!((buffer.head, buffer.tail), (4, 2));
        assert_eq2!(logical_vec!(buffer), vec![0, 1, 2, 3]);
    }

    #[test_case(0, vec![9, 0, 1, 2, 3] ; "front")]
    #[test_case(1, vec![0, 9, 1, 2, 3] ; "before the wrap")]
    #[test_case(2, vec![0, 1, 9, 2, 3] ; "at the wrap")]
    #[test_case(4, vec![0, 1, 2, 3, 9] ; "back")]
    fn test_insert_into_wrapped(pos: usize, expected: Vec<i32>) {
        let mut buffer = wrapped(BufferStorePolicy::ThrowOnFull);
        assert_eq2!(
            buffer.insert(pos, 9, BufferInsertPolicy::default()).copied(),
            Ok(9)
        );
        assert_eq2!(logical_vec!(buffer), expected);
        assert_eq2!(buffer.at(pos), Ok(&9));
    }

    #[test]
    fn test_insert_fills_to_full() {
        let mut buffer = wrapped(BufferStorePolicy::ThrowOnFull);
        buffer.insert(1, 10, BufferInsertPolicy::default()).unwrap();
        buffer.insert(3, 20, BufferInsertPolicy::default()).unwrap();
        assert!(buffer.is_full());
        assert_eq2!(buffer.tail, SENTINEL);
        assert_eq2!(logical_vec!(buffer), vec![0, 10, 1, 20, 2, 3]);

        assert_eq2!(
            buffer.insert(0, 30, BufferInsertPolicy::default()),
            Err(CircBufError::buffer_full(6))
        );
        assert_eq2!(logical_vec!(buffer), vec![0, 10, 1, 20, 2, 3]);
    }

    #[test_case(BufferInsertPolicy::DiscardHead, 2, vec![2, 3, 9, 4] ; "discard head, pos is after eviction")]
    #[test_case(BufferInsertPolicy::DiscardTail, 2, vec![1, 2, 9, 3] ; "discard tail")]
    #[test_case(BufferInsertPolicy::DiscardHead, 4, vec![2, 3, 4, 9] ; "discard head, append clamps")]
    #[test_case(BufferInsertPolicy::DiscardTail, 4, vec![1, 2, 3, 9] ; "discard tail, append")]
    fn test_insert_evicts_on_full(evict: BufferInsertPolicy, pos: usize, expected: Vec<i32>) {
        let mut buffer = CircularBuffer::new(4, BufferStorePolicy::ReplaceOnFull);
        for it in 0..5 {
            buffer.push_back(it).unwrap();
        }
        assert_eq2!(logical_vec!(buffer), vec![1, 2, 3, 4]);

        buffer.insert(pos, 9, evict).unwrap();
        assert_eq2!(logical_vec!(buffer), expected);
        assert!(buffer.is_full());
    }

    #[test]
    fn test_insert_rejections_do_not_mutate() {
        let mut buffer = wrapped(BufferStorePolicy::ReplaceOnFull);
        assert_eq2!(
            buffer.insert(5, 9, BufferInsertPolicy::default()),
            Err(CircBufError::out_of_range(
                5,
                5,
                "can't insert outside of the range"
            ))
        );
        assert_eq2!(logical_vec!(buffer), vec![0, 1, 2, 3]);

        let mut zero = CircularBuffer::new(0, BufferStorePolicy::ReplaceOnFull);
        assert_eq2!(
            zero.insert(0, 9, BufferInsertPolicy::DiscardTail),
            Err(CircBufError::zero_capacity("insert"))
        );
    }

    #[test_case(0, 0, vec![1, 2, 3] ; "front")]
    #[test_case(1, 1, vec![0, 2, 3] ; "before the wrap")]
    #[test_case(2, 2, vec![0, 1, 3] ; "after the wrap")]
    #[test_case(3, 3, vec![0, 1, 2] ; "back")]
    fn test_remove_from_wrapped(pos: usize, removed: i32, expected: Vec<i32>) {
        let mut buffer = wrapped(BufferStorePolicy::ThrowOnFull);
        assert_eq2!(buffer.remove(pos), Ok(removed));
        assert_eq2!(logical_vec!(buffer), expected);
        assert_eq2!(buffer.len(), 3);
    }

    #[test]
    fn test_remove_from_full_leaves_full_state() {
        let mut buffer = CircularBuffer::new(3, BufferStorePolicy::ReplaceOnFull);
        for it in 0..4 {
            buffer.push_back(it).unwrap();
        }
        assert_eq2!(buffer.remove(1), Ok(2));
        assert!(!buffer.is_full());
        assert_eq2!(logical_vec!(buffer), vec![1, 3]);
        buffer.push_back(4).unwrap();
        assert_eq2!(logical_vec!(buffer), vec![1, 3, 4]);
    }

    #[test]
    fn test_remove_errors() {
        let mut buffer = CircularBuffer::<i32>::new(3, BufferStorePolicy::ThrowOnFull);
        assert_eq2!(buffer.remove(0), Err(CircBufError::buffer_empty(3)));
        buffer.push_back(1).unwrap();
        assert_eq2!(
            buffer.remove(1),
            Err(CircBufError::out_of_range(
                1,
                1,
                "can't remove outside of the range"
            ))
        );
        assert_eq2!(buffer.len(), 1);
    }

    #[test]
    fn test_insert_then_remove_restores_contents() {
        for pos in 0..=4 {
            let mut buffer = CircularBuffer::new(6, BufferStorePolicy::ThrowOnFull);
            buffer.push_back(MoveOnly::from(1)).unwrap();
            buffer.push_back(MoveOnly::from(2)).unwrap();
            buffer.push_front(MoveOnly::from(0)).unwrap();
            buffer.push_back(MoveOnly::from(3)).unwrap();

            buffer
                .insert(pos, MoveOnly::from(9), BufferInsertPolicy::default())
                .unwrap();
            assert_eq2!(buffer.remove(pos), Ok(MoveOnly::from(9)));
            assert_eq2!(
                buffer.iter().map(|it| it.0.as_str()).collect::<Vec<_>>(),
                vec!["0", "1", "2", "3"]
            );
        }
    }

    #[test]
    fn test_shifting_never_drops_or_clones() {
        let counter = DropCounter::default();
        let mut buffer = CircularBuffer::new(5, BufferStorePolicy::ReplaceOnFull);
        for it in 0..5 {
            buffer.push_back(counter.track(it)).unwrap();
        }
        // Evicts one.
        buffer
            .insert(2, counter.track(9), BufferInsertPolicy::DiscardTail)
            .unwrap();
        assert_eq2!(counter.created(), 6);
        assert_eq2!(counter.dropped(), 1);

        let removed = buffer.remove(0).unwrap();
        assert_eq2!(removed.value, 0);
        assert_eq2!(counter.dropped(), 1);
        drop(removed);

        drop(buffer);
        assert_eq2!(counter.created(), counter.dropped());
    }
}
