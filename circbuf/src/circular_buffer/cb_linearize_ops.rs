// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In place linearization: move the live elements so that the logical front sits in
//! physical slot 0. Afterwards `head == 0`, `tail == len()` (or the full sentinel), and
//! [`data()`](super::CircularBuffer::data) returns the elements in logical order.
//!
//! A partial buffer that isn't linearized is in one of two layouts, and each gets its
//! own relocation:
//!
//! ```text
//! (a) live range contiguous, gap split      (b) live range wraps, gap contiguous
//! ┌───┬───┬───┬───┬───┬───┐                 ┌───┬───┬───┬───┬───┬───┐
//! │   │   │ a │ b │ c │   │                 │ c │ d │   │   │ a │ b │
//! └───┴───┴───┴───┴───┴───┘                 └───┴───┴───┴───┴───┴───┘
//!           ↑head       ↑tail                       ↑tail   ↑head
//!
//! slide [head, tail) down to 0              1. slide [head, cap) down onto the gap
//! ┌───┬───┬───┬───┬───┬───┐                 ┌───┬───┬───┬───┬───┬───┐
//! │ a │ b │ c │   │   │   │                 │ c │ d │ a │ b │   │   │
//! └───┴───┴───┴───┴───┴───┘                 └───┴───┴───┴───┴───┴───┘
//!                                           2. rotate [0, len) left by tail
//!                                           ┌───┬───┬───┬───┬───┬───┐
//!                                           │ a │ b │ c │ d │   │   │
//!                                           └───┴───┴───┴───┴───┴───┘
//! ```
//!
//! A full buffer has no gap; one rotation of the whole block is enough.

use super::{CircularBuffer, DEBUG_CIRCBUF, SENTINEL};

impl<T> CircularBuffer<T> {
    /// Rearrange the storage so that logical and physical order coincide. Returns `self`
    /// so that a flat view can be taken right away:
    /// `buffer.linearize().data()`.
    ///
    /// An empty buffer just resets its indices to 0. An already linearized buffer is not
    /// touched.
    pub fn linearize(&mut self) -> &mut Self {
        if self.is_linearized() {
            return self;
        }

        let len = self.len();
        let old_head = self.head;

        if len == 0 {
            self.head = 0;
            self.tail = 0;
        } else if self.tail == SENTINEL {
            self.storage.rotate_left(self.capacity(), self.head);
            self.head = 0;
        } else if self.head < self.tail || self.tail == 0 {
            // (a) Each destination is either in the gap below head or already vacated.
            let end = if self.tail == 0 { self.capacity() } else { self.tail };
            for (dest, src) in (self.head..end).enumerate() {
                self.storage.relocate(src, dest);
            }
            self.head = 0;
            self.tail = len;
        } else {
            // (b) Slide the front run down by the gap width, then rotate it into place.
            let gap = self.head - self.tail;
            for src in self.head..self.capacity() {
                self.storage.relocate(src, src - gap);
            }
            self.storage.rotate_left(len, self.tail);
            self.head = 0;
            self.tail = len;
        }

        DEBUG_CIRCBUF.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📏 Linearized buffer",
                old_head = %old_head,
                len = %len,
                capacity = %self.capacity()
            );
        });

        self
    }
}
