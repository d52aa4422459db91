// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_circbuf
//!
//! A circular buffer (ring buffer) whose capacity is fixed at construction but can be
//! changed later with [`CircularBuffer::resize`]. It is meant for bounded or elastic
//! sliding windows: event queues, undo history, overwrite-on-full telemetry. Unlike
//! [`Vec`] there is no amortized doubling on push; the storage block is allocated once
//! per capacity and slots are constructed and destroyed one at a time.
//!
//! # Features
//!
//! - Push and pop at both ends ([`push_back`], [`push_front`], [`pop_front`],
//!   [`pop_back`]).
//! - Insert and remove at any logical position ([`insert`], [`remove`]).
//! - Two store policies for a full buffer ([`BufferStorePolicy`]): overwrite the element
//!   at the opposite end, or reject the push with [`CircBufError::BufferFull`].
//! - Resize with a choice of which end to drop ([`BufferResizePolicy`]).
//! - In place [`linearize`] so the logical order and physical slot order coincide, plus
//!   [`linearize_copy`] which leaves the receiver alone.
//! - Random access [`Cursor`] over the logical order.
//!
//! # Example
//!
//! ```
//! use r3bl_circbuf::{BufferStorePolicy, CircularBuffer};
//!
//! let mut buffer = CircularBuffer::new(5, BufferStorePolicy::ReplaceOnFull);
//! for it in 1..=7 {
//!     buffer.push_back(it).unwrap();
//! }
//!
//! // 1 and 2 were overwritten.
//! assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5, 6, 7]);
//!
//! // The storage is physically wrapped, so `data()` is not available until it is
//! // linearized.
//! assert!(!buffer.is_linearized());
//! assert_eq!(buffer.linearize().data().unwrap(), &[3, 4, 5, 6, 7]);
//! ```
//!
//! # Layout
//!
//! - `RawStorage` is a crate private arena of uninitialized slots with an
//!   explicit construct / destroy pair per slot. It knows nothing about head or tail.
//! - [`CircularBuffer`] owns exactly one arena and is the only thing that decides which
//!   slots are live.
//! - [`Cursor`] borrows a buffer, so the borrow checker rejects any mutation of the
//!   buffer while a cursor is alive.
//!
//! [`push_back`]: CircularBuffer::push_back
//! [`push_front`]: CircularBuffer::push_front
//! [`pop_front`]: CircularBuffer::pop_front
//! [`pop_back`]: CircularBuffer::pop_back
//! [`insert`]: CircularBuffer::insert
//! [`remove`]: CircularBuffer::remove
//! [`linearize`]: CircularBuffer::linearize
//! [`linearize_copy`]: CircularBuffer::linearize_copy

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod circbuf_error;
pub mod circular_buffer;
pub mod decl_macros;

#[cfg(any(test, feature = "test_fixtures"))]
pub mod test_fixtures;

mod raw_storage;

// Re-export.
pub use circbuf_error::*;
pub use circular_buffer::*;
