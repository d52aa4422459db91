// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Logs the evictions, resizes, and linearizations that the mutating operations perform.
/// Rejected calls (full or empty buffer) are logged at `trace` level.
pub const DEBUG_CIRCBUF: bool = true;

// Attach.
pub mod cb_cursor;
pub mod cb_iter;
pub mod cb_policy;

mod cb_core;

// These modules extend CircularBuffer through `impl` blocks.
mod cb_insert_remove_ops;
mod cb_linearize_ops;
mod cb_push_pop_ops;
mod cb_resize_ops;

// Re-export.
pub(crate) use cb_core::SENTINEL;
pub use cb_core::CircularBuffer;
pub use cb_cursor::*;
pub use cb_iter::*;
pub use cb_policy::*;
