// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Push and pop at both ends. All four are O(1).
//!
//! When the buffer is full and the store policy is
//! [`ReplaceOnFull`](super::BufferStorePolicy::ReplaceOnFull), a push assigns over the
//! element at the opposite end instead of constructing a new one:
//!
//! ```text
//! push_back(f) on a full buffer      push_front(z) on a full buffer
//! ┌───┬───┬───┬───┬───┐              ┌───┬───┬───┬───┬───┐
//! │ a │ b │ c │ d │ e │              │ a │ b │ c │ d │ e │
//! └───┴───┴───┴───┴───┘              └───┴───┴───┴───┴───┘
//!   ↑head                              ↑head           ↑newest
//! ┌───┬───┬───┬───┬───┐              ┌───┬───┬───┬───┬───┐
//! │ f │ b │ c │ d │ e │              │ a │ b │ c │ d │ z │
//! └───┴───┴───┴───┴───┘              └───┴───┴───┴───┴───┘
//!       ↑head                                          ↑head
//! ```

use super::{BufferStorePolicy, CircularBuffer, DEBUG_CIRCBUF, SENTINEL};
use crate::{CircBufError, CircBufResult};

impl<T> CircularBuffer<T> {
    /// Append `value` after the logical back.
    ///
    /// On a full [`ReplaceOnFull`](BufferStorePolicy::ReplaceOnFull) buffer the oldest
    /// element is dropped and `value` becomes the newest; the length stays the same.
    ///
    /// # Errors
    ///
    /// - [`CircBufError::ZeroCapacity`] if the capacity is 0.
    /// - [`CircBufError::BufferFull`] if the buffer is full and the policy is
    ///   [`ThrowOnFull`](BufferStorePolicy::ThrowOnFull). `value` is dropped.
    pub fn push_back(&mut self, value: T) -> CircBufResult<&mut T> {
        let slot = self.prepare_push("push_back")?;

        if self.tail == SENTINEL {
            // Overwrite the oldest. It was at head, now it is the newest.
            let slot = self.head;
            self.head = self.next_slot(slot);
            *self.storage.at_mut(slot) = value;
            return Ok(self.storage.at_mut(slot));
        }

        self.tail = self.next_slot(slot);
        if self.tail == self.head {
            self.tail = SENTINEL;
        }
        Ok(self.storage.construct(slot, value))
    }

    /// Prepend `value` before the logical front.
    ///
    /// On a full [`ReplaceOnFull`](BufferStorePolicy::ReplaceOnFull) buffer the newest
    /// element is dropped and `value` becomes the oldest; the length stays the same.
    ///
    /// # Errors
    ///
    /// - [`CircBufError::ZeroCapacity`] if the capacity is 0.
    /// - [`CircBufError::BufferFull`] if the buffer is full and the policy is
    ///   [`ThrowOnFull`](BufferStorePolicy::ThrowOnFull). `value` is dropped.
    pub fn push_front(&mut self, value: T) -> CircBufResult<&mut T> {
        self.prepare_push("push_front")?;

        let slot = self.prev_slot(self.head);
        self.head = slot;

        if self.tail == SENTINEL {
            // The slot before head is the newest element when full.
            *self.storage.at_mut(slot) = value;
            return Ok(self.storage.at_mut(slot));
        }

        if slot == self.tail {
            self.tail = SENTINEL;
        }
        Ok(self.storage.construct(slot, value))
    }

    /// Remove and return the oldest element.
    ///
    /// # Errors
    ///
    /// [`CircBufError::BufferEmpty`] if there are no elements.
    pub fn pop_front(&mut self) -> CircBufResult<T> {
        self.ensure_not_empty().inspect_err(log_rejected)?;

        let slot = self.head;
        if self.tail == SENTINEL {
            self.tail = slot;
        }
        self.head = self.next_slot(slot);
        Ok(self.storage.take(slot))
    }

    /// Remove and return the newest element.
    ///
    /// # Errors
    ///
    /// [`CircBufError::BufferEmpty`] if there are no elements.
    pub fn pop_back(&mut self) -> CircBufResult<T> {
        self.ensure_not_empty().inspect_err(log_rejected)?;

        let slot = self.last_slot();
        self.tail = slot;
        Ok(self.storage.take(slot))
    }

    /// Check the capacity and store policy for a push. Returns the current `tail`, which
    /// is only a usable slot when the buffer is not full.
    fn prepare_push(&self, operation: &'static str) -> CircBufResult<usize> {
        if self.capacity() == 0 {
            return Err(CircBufError::zero_capacity(operation)).inspect_err(log_rejected);
        }

        if self.tail == SENTINEL {
            if self.policy == BufferStorePolicy::ThrowOnFull {
                return Err(CircBufError::buffer_full(self.capacity()))
                    .inspect_err(log_rejected);
            }
            DEBUG_CIRCBUF.then(|| {
                // % is Display, ? is Debug.
                tracing::trace!(
                    message = "♻️ Overwriting element on full buffer",
                    operation = %operation,
                    capacity = %self.capacity(),
                    policy = %self.policy
                );
            });
        }

        Ok(self.tail)
    }
}

pub(super) fn log_rejected(error: &CircBufError) {
    DEBUG_CIRCBUF.then(|| {
        // % is Display, ? is Debug.
        tracing::trace!(message = "🚫 Rejected", error = %error);
    });
}
