// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use allocator_api2::alloc::{AllocError, Allocator, Global};

#[derive(Debug, Default)]
struct Stats {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    live_bytes: Cell<usize>,
    fail_all: Cell<bool>,
    fail_countdown: Cell<usize>,
}

/// Allocator strategy backed by [`Global`] that records every request.
///
/// Clones share the same counters, so a test can keep one handle while the vector
/// under test owns another.
///
/// # Example
///
/// ```rust
/// use allocator_api2::alloc::Allocator;
/// use core::alloc::Layout;
/// use minivec_test_utils::CountingAlloc;
///
/// let alloc = CountingAlloc::new();
/// let layout = Layout::array::<u64>(4).unwrap();
///
/// let block = alloc.allocate(layout).unwrap();
/// assert_eq!(alloc.live_bytes(), 32);
///
/// unsafe { alloc.deallocate(block.cast(), layout) };
/// assert!(alloc.is_balanced());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingAlloc {
    stats: Rc<Stats>,
}

impl CountingAlloc {
    /// Creates a fresh allocator with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful allocations.
    pub fn allocations(&self) -> usize {
        self.stats.allocations.get()
    }

    /// Number of deallocations.
    pub fn deallocations(&self) -> usize {
        self.stats.deallocations.get()
    }

    /// Blocks handed out and not yet returned.
    pub fn live_blocks(&self) -> usize {
        self.allocations() - self.deallocations()
    }

    /// Bytes handed out and not yet returned.
    pub fn live_bytes(&self) -> usize {
        self.stats.live_bytes.get()
    }

    /// Returns `true` when every block handed out has been returned.
    pub fn is_balanced(&self) -> bool {
        self.live_blocks() == 0 && self.live_bytes() == 0
    }

    /// Makes every request fail (or succeed again) until changed.
    pub fn fail_all(&self, fail: bool) {
        self.stats.fail_all.set(fail);
    }

    /// Makes the n-th request from now fail (1-based). `0` disarms.
    pub fn fail_on_nth(&self, n: usize) {
        self.stats.fail_countdown.set(n);
    }

    fn should_fail(&self) -> bool {
        if self.stats.fail_all.get() {
            return true;
        }

        match self.stats.fail_countdown.get() {
            0 => false,
            1 => {
                self.stats.fail_countdown.set(0);
                true
            }
            n => {
                self.stats.fail_countdown.set(n - 1);
                false
            }
        }
    }
}

unsafe impl Allocator for CountingAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        if self.should_fail() {
            return Err(AllocError);
        }

        let block = Global.allocate(layout)?;
        self.stats.allocations.set(self.allocations() + 1);
        self.stats.live_bytes.set(self.live_bytes() + layout.size());

        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.stats.deallocations.set(self.deallocations() + 1);
        self.stats.live_bytes.set(self.live_bytes() - layout.size());

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `ptr` was handed out by `Global` through
            // `allocate` with this `layout`.
            Global.deallocate(ptr, layout);
        }
    }
}
