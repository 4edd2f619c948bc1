// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Raw slot storage.
//!
//! `RawBuf` only deals in slots: it obtains, relocates and releases them. It never
//! constructs or drops a `T`; tracking which slots are live is the owner's job.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

use allocator_api2::alloc::Allocator;

use crate::error::MiniVecError;

pub(crate) struct RawBuf<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: `RawBuf` owns its slots exclusively, like `Box<[MaybeUninit<T>]>`.
unsafe impl<T: Send, A: Allocator + Send> Send for RawBuf<T, A> {}
// SAFETY: shared access never mutates the slots.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuf<T, A> {}

fn slot_layout<T>(capacity: usize) -> Result<Layout, MiniVecError> {
    Layout::array::<T>(capacity).map_err(|_| MiniVecError::CapacityOverflow {
        requested: capacity,
    })
}

impl<T, A: Allocator> RawBuf<T, A> {
    /// Storage with zero slots. Never touches the allocator.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Storage with exactly `capacity` uninitialized slots.
    pub(crate) fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, MiniVecError> {
        let ptr = Self::allocate(&alloc, capacity)?;

        Ok(Self {
            ptr,
            cap: capacity,
            alloc,
            _marker: PhantomData,
        })
    }

    fn allocate(alloc: &A, capacity: usize) -> Result<NonNull<T>, MiniVecError> {
        let layout = slot_layout::<T>(capacity)?;

        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        alloc
            .allocate(layout)
            .map(|block| block.cast::<T>())
            .map_err(|_| MiniVecError::AllocFailed { capacity })
    }

    #[inline(always)]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Moves the first `len` slots into a fresh block of exactly `new_cap` slots and
    /// releases the old block.
    ///
    /// On error nothing has changed: the old block and its contents are still owned.
    /// `new_cap == 0` releases the storage without allocating.
    pub(crate) fn relocate(&mut self, len: usize, new_cap: usize) -> Result<(), MiniVecError> {
        debug_assert!(len <= self.cap && len <= new_cap);

        let new_ptr = if new_cap == 0 {
            NonNull::dangling()
        } else {
            Self::allocate(&self.alloc, new_cap)?
        };

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): the first `len` slots are initialized, the new
            // block holds at least `len` slots and the two blocks are distinct allocations.
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len);
        }

        self.release();
        self.ptr = new_ptr;
        self.cap = new_cap;

        Ok(())
    }

    /// Returns the slots to the allocator. Values still living in them are forgotten,
    /// so callers drop or move them out first.
    fn release(&mut self) {
        let cap = mem::replace(&mut self.cap, 0);
        let ptr = mem::replace(&mut self.ptr, NonNull::dangling());

        if cap == 0 || mem::size_of::<T>() == 0 {
            return;
        }

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `ptr` was obtained from `self.alloc` with the
            // layout of `cap` slots, which was valid when it was allocated.
            let layout =
                Layout::from_size_align_unchecked(mem::size_of::<T>() * cap, mem::align_of::<T>());
            self.alloc.deallocate(ptr.cast(), layout);
        }
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}
