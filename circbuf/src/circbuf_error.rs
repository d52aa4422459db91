// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error types for [`CircularBuffer`] and [`Cursor`].
//!
//! Every fallible operation returns [`CircBufResult`]. A rejected call never mutates the
//! buffer. Evictions that are part of a successful call (overwrite on full, or the
//! [`BufferInsertPolicy`] drop during [`CircularBuffer::insert`]) are not errors.
//!
//! Construct / destroy imbalance inside the storage arena is not represented here. That
//! is a bug in this crate, and it panics (see the `occupancy_check` cargo feature).
//!
//! [`CircularBuffer`]: crate::CircularBuffer
//! [`CircularBuffer::insert`]: crate::CircularBuffer::insert
//! [`Cursor`]: crate::Cursor
//! [`BufferInsertPolicy`]: crate::BufferInsertPolicy

/// Convenience alias used by every fallible operation in this crate.
pub type CircBufResult<T> = Result<T, CircBufError>;

/// Failure kinds surfaced to the immediate caller.
///
/// Each variant carries the capacity, size, or index that caused it. Use
/// [`miette::Report`] (via `?` in a function that returns [`miette::Result`]) to get a
/// rendered diagnostic with the code and help text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum CircBufError {
    /// A push or insert was attempted on a buffer with capacity 0.
    #[error("Capacity must be greater than zero: can't {operation} on a buffer with zero capacity")]
    #[diagnostic(
        code(r3bl_circbuf::zero_capacity),
        help("Call `resize()` with a non zero capacity before adding elements.")
    )]
    ZeroCapacity {
        /// The rejected operation, eg: `"push_back"`.
        operation: &'static str,
    },

    /// A push or insert was attempted on a full buffer whose store policy is
    /// [`ThrowOnFull`](crate::BufferStorePolicy::ThrowOnFull).
    #[error("Buffer is full with capacity {capacity}")]
    #[diagnostic(
        code(r3bl_circbuf::buffer_full),
        help("Pop an element first, or switch the store policy to `ReplaceOnFull`.")
    )]
    BufferFull { capacity: usize },

    /// A pop, front, back, or remove was attempted on an empty buffer.
    #[error("Buffer is empty with capacity {capacity}")]
    #[diagnostic(code(r3bl_circbuf::buffer_empty))]
    BufferEmpty { capacity: usize },

    /// A logical index was outside of `[0, size)` (or `[0, size]` for insert), or an
    /// exhausted [`Cursor`](crate::Cursor) was dereferenced.
    #[error("Index {index} out of range [0, {size}): {context}")]
    #[diagnostic(code(r3bl_circbuf::out_of_range))]
    OutOfRange {
        index: usize,
        size: usize,
        context: &'static str,
    },

    /// A flat view of the storage was requested while the live elements are wrapped
    /// around the end of the block with unconstructed slots in between.
    #[error(
        "Buffer is not linearized and not full: head {head}, size {size}, capacity {capacity}"
    )]
    #[diagnostic(
        code(r3bl_circbuf::not_linearized_not_full),
        help("Call `linearize()` first, or use `as_slices()` which works in any state.")
    )]
    NotLinearizedNotFull {
        head: usize,
        size: usize,
        capacity: usize,
    },
}

impl CircBufError {
    #[must_use]
    pub fn zero_capacity(operation: &'static str) -> Self { Self::ZeroCapacity { operation } }

    #[must_use]
    pub fn buffer_full(capacity: usize) -> Self { Self::BufferFull { capacity } }

    #[must_use]
    pub fn buffer_empty(capacity: usize) -> Self { Self::BufferEmpty { capacity } }

    #[must_use]
    pub fn out_of_range(index: usize, size: usize, context: &'static str) -> Self {
        Self::OutOfRange {
            index,
            size,
            context,
        }
    }

    #[must_use]
    pub fn not_linearized_not_full(head: usize, size: usize, capacity: usize) -> Self {
        Self::NotLinearizedNotFull {
            head,
            size,
            capacity,
        }
    }
}
