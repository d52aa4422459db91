// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// A wrapper for `pretty_assertions::assert_eq!` macro.
///
/// Prints a colored diff of the left and right hand sides when the assertion fails, which
/// makes mismatched buffer contents (long `Vec`s) easy to read.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}

/// Collect the logical contents of a [`CircularBuffer`](crate::CircularBuffer) into a
/// [`Vec`] of cloned elements, front to back.
///
/// ```
/// use r3bl_circbuf::{BufferStorePolicy, CircularBuffer, logical_vec};
///
/// let mut buffer = CircularBuffer::new(3, BufferStorePolicy::ReplaceOnFull);
/// buffer.push_back(1).unwrap();
/// buffer.push_front(0).unwrap();
/// assert_eq!(logical_vec!(buffer), vec![0, 1]);
/// ```
#[macro_export]
macro_rules! logical_vec {
    ($buffer:expr) => {
        $buffer.iter().cloned().collect::<Vec<_>>()
    };
}
