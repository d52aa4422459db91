// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{BufferResizePolicy, CircularBuffer, DEBUG_CIRCBUF, SENTINEL};
use crate::raw_storage::RawStorage;

impl<T> CircularBuffer<T> {
    /// Change the capacity to `new_capacity`.
    ///
    /// - `0`: drops every element and leaves a zero capacity buffer behind.
    /// - Same as the current capacity: no-op, the layout is not touched.
    /// - Otherwise a new storage block is allocated and the kept elements are moved into
    ///   it in logical order, so the result is always linearized. When `len()` exceeds
    ///   `new_capacity`, `policy` picks which `new_capacity` elements survive:
    ///   [`DiscardOld`](BufferResizePolicy::DiscardOld) keeps the newest,
    ///   [`DiscardNew`](BufferResizePolicy::DiscardNew) keeps the oldest.
    ///
    /// The buffer is full afterwards exactly when the kept count equals `new_capacity`.
    /// Discarded elements are dropped last, so a panicking destructor leaves the resized
    /// buffer behind.
    pub fn resize(&mut self, new_capacity: usize, policy: BufferResizePolicy) {
        let old_capacity = self.capacity();
        if new_capacity == old_capacity {
            return;
        }

        let len = self.len();
        let keep = len.min(new_capacity);

        if new_capacity == 0 {
            self.clear();
            self.storage = RawStorage::new(0);
            self.head = 0;
            self.tail = SENTINEL;
        } else if len == 0 {
            self.storage = RawStorage::new(new_capacity);
            self.head = 0;
            self.tail = 0;
        } else {
            let first_kept = match policy {
                BufferResizePolicy::DiscardOld => len - keep,
                BufferResizePolicy::DiscardNew => 0,
            };
            let discarded = match policy {
                BufferResizePolicy::DiscardOld => 0..first_kept,
                BufferResizePolicy::DiscardNew => keep..len,
            };
            let (first_run, second_end) = self.physical_runs_of(discarded);

            // Moving never runs a destructor.
            let mut new_storage = RawStorage::new(new_capacity);
            for (new_slot, pos) in (first_kept..first_kept + keep).enumerate() {
                let slot = self.slot_of(pos);
                new_storage.construct(new_slot, self.storage.take(slot));
            }

            // The buffer must be consistent before the first discarded value is dropped.
            let mut old_storage = std::mem::replace(&mut self.storage, new_storage);
            self.head = 0;
            self.tail = if keep == new_capacity { SENTINEL } else { keep };
            old_storage.destroy_runs(first_run, second_end);
        }

        DEBUG_CIRCBUF.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📐 Resized buffer",
                old_capacity = %old_capacity,
                new_capacity = %new_capacity,
                kept = %keep,
                discarded = %(len - keep),
                policy = %policy
            );
        });
    }
}
