// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A fixed size block of uninitialized slots with an explicit per slot lifecycle.
//!
//! [`RawStorage`] is the only place in this crate that touches [`MaybeUninit`]. It has no
//! idea which slots are live; the owner ([`crate::CircularBuffer`]) tracks that with its
//! head and tail indices and must call [`RawStorage::construct`] /
//! [`RawStorage::destroy_runs`] (or [`RawStorage::take`]) in balanced pairs.
//!
//! # Occupancy check
//!
//! When `debug_assertions` are on, or the `occupancy_check` cargo feature is enabled, an
//! auxiliary `Vec<bool>` records which slots are constructed. Every slot operation
//! asserts against it:
//! - constructing an already constructed slot,
//! - destroying, taking, or reading an unconstructed slot,
//! - dropping the block while any slot is still constructed.
//!
//! These are bugs in the owner, so they panic instead of returning an error. Without the
//! check the same mistakes are undefined behavior (or a leak, in the drop case).
//!
//! ```text
//! slot:      0     1     2     3     4
//!         ┌─────┬─────┬─────┬─────┬─────┐
//! slots   │  ?  │  b  │  c  │  ?  │  a  │
//!         └─────┴─────┴─────┴─────┴─────┘
//! occupied   F     T     T     F     T
//! ```

use std::{mem::MaybeUninit, ops::Range, ptr};

#[cfg(any(debug_assertions, feature = "occupancy_check"))]
macro_rules! occupancy {
    ($($body:tt)*) => { $($body)* };
}

#[cfg(not(any(debug_assertions, feature = "occupancy_check")))]
macro_rules! occupancy {
    ($($body:tt)*) => {};
}

pub struct RawStorage<T> {
    slots: Box<[MaybeUninit<T>]>,
    #[cfg(any(debug_assertions, feature = "occupancy_check"))]
    occupied: Vec<bool>,
}

impl<T> RawStorage<T> {
    /// Allocate `slot_count` unconstructed slots.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(MaybeUninit::uninit)
                .take(slot_count)
                .collect(),
            #[cfg(any(debug_assertions, feature = "occupancy_check"))]
            occupied: vec![false; slot_count],
        }
    }

    /// Number of slots, not the number of live elements.
    pub fn len(&self) -> usize { self.slots.len() }

    /// Write `value` into an unconstructed `slot`.
    pub fn construct(&mut self, slot: usize, value: T) -> &mut T {
        occupancy! {
            assert!(!self.occupied[slot], "slot {slot} is already constructed");
            self.occupied[slot] = true;
        }
        self.slots[slot].write(value)
    }

    /// Move the value out of a constructed `slot`, leaving it unconstructed.
    pub fn take(&mut self, slot: usize) -> T {
        occupancy! {
            assert!(self.occupied[slot], "slot {slot} is not constructed, can't take");
            self.occupied[slot] = false;
        }
        // SAFETY: the slot is constructed (see above). Reading it bitwise moves the value
        // out, and the slot is never read again until it is constructed again.
        unsafe { self.slots[slot].assume_init_read() }
    }

    /// Move the value in constructed slot `from` into unconstructed slot `to`.
    pub fn relocate(&mut self, from: usize, to: usize) {
        let value = self.take(from);
        self.construct(to, value);
    }

    pub fn at(&self, slot: usize) -> &T {
        occupancy! {
            assert!(self.occupied[slot], "slot {slot} is not constructed, can't read");
        }
        // SAFETY: the owner only reads slots inside its live range.
        unsafe { self.slots[slot].assume_init_ref() }
    }

    pub fn at_mut(&mut self, slot: usize) -> &mut T {
        occupancy! {
            assert!(self.occupied[slot], "slot {slot} is not constructed, can't write");
        }
        // SAFETY: the owner only writes slots inside its live range.
        unsafe { self.slots[slot].assume_init_mut() }
    }

    /// Rotate the prefix `[0, len)` left by `mid` slots. Every slot in the prefix must be
    /// constructed, so the occupancy record of the prefix does not change.
    pub fn rotate_left(&mut self, len: usize, mid: usize) {
        occupancy! {
            self.assert_all_constructed(0..len);
        }
        self.slots[..len].rotate_left(mid);
    }

    /// View the constructed slots in `range` as a slice.
    pub fn slice(&self, range: Range<usize>) -> &[T] {
        occupancy! {
            self.assert_all_constructed(range.clone());
        }
        let run = &self.slots[range];
        // SAFETY: `MaybeUninit<T>` has the same layout as `T`, and every slot in the run
        // is constructed.
        unsafe { &*(ptr::from_ref(run) as *const [T]) }
    }

    /// Mutable counterpart of [`Self::slice`].
    pub fn slice_mut(&mut self, range: Range<usize>) -> &mut [T] {
        occupancy! {
            self.assert_all_constructed(range.clone());
        }
        let run = &mut self.slots[range];
        // SAFETY: same as `slice()`.
        unsafe { &mut *(ptr::from_mut(run) as *mut [T]) }
    }

    /// Two disjoint mutable runs: `first` and `[0, second_end)`. Requires
    /// `second_end <= first.start`.
    pub fn split_slices_mut(
        &mut self,
        first: Range<usize>,
        second_end: usize,
    ) -> (&mut [T], &mut [T]) {
        occupancy! {
            self.assert_all_constructed(first.clone());
            self.assert_all_constructed(0..second_end);
        }
        let (first_run, second_run) = self.split_runs(first, second_end);
        // SAFETY: same as `slice()`, and the runs do not overlap.
        unsafe {
            (
                &mut *(ptr::from_mut(first_run) as *mut [T]),
                &mut *(ptr::from_mut(second_run) as *mut [T]),
            )
        }
    }

    /// Run the destructors of every value in the runs `first` and `[0, second_end)`,
    /// with the same layout requirement as [`Self::split_slices_mut`].
    ///
    /// Every slot of both runs is marked unconstructed before any destructor runs. If one
    /// destructor panics, the rest of its run and the other run are still dropped while
    /// unwinding, so no value is dropped twice and none is leaked.
    pub fn destroy_runs(&mut self, first: Range<usize>, second_end: usize) {
        /// Drops every value of the run when it goes out of scope, also during unwinding.
        struct Dropper<'a, T>(&'a mut [MaybeUninit<T>]);

        impl<T> Drop for Dropper<'_, T> {
            fn drop(&mut self) {
                // SAFETY: `destroy_runs()` only wraps constructed runs, and their slots are
                // already marked unconstructed, so nothing reads or drops them again.
                unsafe { ptr::drop_in_place(ptr::from_mut(self.0) as *mut [T]) }
            }
        }

        occupancy! {
            self.assert_all_constructed(first.clone());
            self.assert_all_constructed(0..second_end);
            self.occupied[first.clone()].fill(false);
            self.occupied[..second_end].fill(false);
        }
        let (first_run, second_run) = self.split_runs(first, second_end);
        // Locals drop in reverse order: the first run goes first.
        let _second = Dropper(second_run);
        let _first = Dropper(first_run);
    }

    fn split_runs(
        &mut self,
        first: Range<usize>,
        second_end: usize,
    ) -> (&mut [MaybeUninit<T>], &mut [MaybeUninit<T>]) {
        debug_assert!(second_end <= first.start);
        let (low, high) = self.slots.split_at_mut(first.start);
        (&mut high[..first.end - first.start], &mut low[..second_end])
    }

    #[cfg(any(debug_assertions, feature = "occupancy_check"))]
    fn assert_all_constructed(&self, range: Range<usize>) {
        if let Some(slot) = range.clone().find(|&it| !self.occupied[it]) {
            panic!("slot {slot} in {range:?} is not constructed");
        }
    }

    #[cfg(any(debug_assertions, feature = "occupancy_check"))]
    pub fn constructed_count(&self) -> usize {
        self.occupied.iter().filter(|&&it| it).count()
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        occupancy! {
            // Don't turn an unrelated panic into an abort.
            if !std::thread::panicking() {
                let live = self.constructed_count();
                assert!(
                    live == 0,
                    "RawStorage dropped with {live} constructed slot(s) still alive"
                );
            }
        }
    }
}

impl<T> std::fmt::Debug for RawStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut it = f.debug_struct("RawStorage");
        it.field("len", &self.slots.len());
        occupancy! {
            it.field("constructed", &self.constructed_count());
        }
        it.finish_non_exhaustive()
    }
}
