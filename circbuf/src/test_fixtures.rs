// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Element types for tests that need to prove every constructed value is dropped exactly
//! once, including when a destructor panics partway through an operation.

use std::{cell::Cell, rc::Rc};

/// Shared drop tally. Hand out tracked values with [`DropCounter::track`] and check
/// [`DropCounter::dropped`] after the operation under test.
#[derive(Debug, Clone, Default)]
pub struct DropCounter {
    created: Rc<Cell<usize>>,
    dropped: Rc<Cell<usize>>,
}

impl DropCounter {
    #[must_use]
    pub fn track(&self, value: i32) -> Tracked {
        self.created.set(self.created.get() + 1);
        Tracked {
            value,
            panic_on_drop: false,
            dropped: Rc::clone(&self.dropped),
            created: Rc::clone(&self.created),
        }
    }

    /// Like [`Self::track`], but the value panics in `drop()` after it is counted.
    #[must_use]
    pub fn track_panicking(&self, value: i32) -> Tracked {
        let mut tracked = self.track(value);
        tracked.panic_on_drop = true;
        tracked
    }

    #[must_use]
    pub fn created(&self) -> usize { self.created.get() }

    #[must_use]
    pub fn dropped(&self) -> usize { self.dropped.get() }

    #[must_use]
    pub fn live(&self) -> usize { self.created() - self.dropped() }
}

/// A value that bumps its [`DropCounter`] when dropped. Clones count as new values.
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    panic_on_drop: bool,
    created: Rc<Cell<usize>>,
    dropped: Rc<Cell<usize>>,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.created.set(self.created.get() + 1);
        Self {
            value: self.value,
            panic_on_drop: false,
            created: Rc::clone(&self.created),
            dropped: Rc::clone(&self.dropped),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool { self.value == other.value }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.dropped.set(self.dropped.get() + 1);
        // A second panic while unwinding would abort the test binary.
        if self.panic_on_drop && !std::thread::panicking() {
            panic!("Tracked({}) panicked in drop", self.value);
        }
    }
}

/// A move only element (no [`Clone`]).
#[derive(Debug, PartialEq, Eq)]
pub struct MoveOnly(pub String);

impl From<i32> for MoveOnly {
    fn from(value: i32) -> Self { Self(value.to_string()) }
}
