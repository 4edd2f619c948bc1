// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Scoped rollback for bulk construction.

use core::mem;
use core::ptr;

/// Tracks the prefix of slots built by an in-progress bulk operation.
///
/// Values are written one by one starting at `base`. If the guard is dropped before
/// [`PrefixGuard::commit`] (an early `?` return or an unwinding panic), exactly the
/// values written so far are dropped, last one first. The slots themselves are left
/// to whoever owns the storage.
pub(crate) struct PrefixGuard<T> {
    base: *mut T,
    built: usize,
}

impl<T> PrefixGuard<T> {
    pub(crate) fn new(base: *mut T) -> Self {
        Self { base, built: 0 }
    }

    /// Writes `value` into the next slot.
    ///
    /// # Safety
    ///
    /// Slot `base + built` must lie inside allocated storage and must not hold a live value.
    #[inline]
    pub(crate) unsafe fn push(&mut self, value: T) {
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): guaranteed by the caller.
            self.base.add(self.built).write(value);
        }
        self.built += 1;
    }

    pub(crate) fn built(&self) -> usize {
        self.built
    }

    /// Hands the built prefix over to the caller and returns its length.
    pub(crate) fn commit(self) -> usize {
        let built = self.built;
        mem::forget(self);
        built
    }
}

impl<T> Drop for PrefixGuard<T> {
    fn drop(&mut self) {
        if self.built == 0 {
            return;
        }

        tracing::trace!(built = self.built, "rolling back partially built elements");

        while self.built > 0 {
            self.built -= 1;
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): every slot below the old `built` was
                // written by `push` and has not been handed over.
                ptr::drop_in_place(self.base.add(self.built));
            }
        }
    }
}
