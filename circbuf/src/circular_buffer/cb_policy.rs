// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The three independent policy axes of a [`CircularBuffer`]. They are kept as separate
//! enums since each one is chosen at a different time:
//!
//! | Policy                 | Chosen at                      | Applies to                |
//! | :--------------------- | :----------------------------- | :------------------------ |
//! | [`BufferStorePolicy`]  | construction, [`set_policy`]   | push and insert when full |
//! | [`BufferResizePolicy`] | each [`resize`] call           | shrinking below `len()`   |
//! | [`BufferInsertPolicy`] | each [`insert`] call           | insert when full          |
//!
//! [`CircularBuffer`]: super::CircularBuffer
//! [`set_policy`]: super::CircularBuffer::set_policy
//! [`resize`]: super::CircularBuffer::resize
//! [`insert`]: super::CircularBuffer::insert

/// What push and insert do when the buffer is full.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum BufferStorePolicy {
    /// Evict one element to make room. [`push_back`] overwrites the oldest element,
    /// [`push_front`] overwrites the newest one, and [`insert`] drops whichever end the
    /// [`BufferInsertPolicy`] says.
    ///
    /// [`push_back`]: super::CircularBuffer::push_back
    /// [`push_front`]: super::CircularBuffer::push_front
    /// [`insert`]: super::CircularBuffer::insert
    #[default]
    ReplaceOnFull,
    /// Reject the call with [`CircBufError::BufferFull`](crate::CircBufError::BufferFull)
    /// and leave the buffer untouched.
    ThrowOnFull,
}

/// Which elements survive when [`resize`](super::CircularBuffer::resize) shrinks the
/// buffer below its current length.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum BufferResizePolicy {
    /// Drop from the front, keep the newest elements.
    #[default]
    DiscardOld,
    /// Drop from the back, keep the oldest elements.
    DiscardNew,
}

/// Which end [`insert`](super::CircularBuffer::insert) drops when the buffer is full and
/// the store policy is [`BufferStorePolicy::ReplaceOnFull`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum BufferInsertPolicy {
    /// Drop the oldest element (same as one `pop_front()`).
    #[default]
    DiscardHead,
    /// Drop the newest element (same as one `pop_back()`).
    DiscardTail,
}
