// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

use allocator_api2::alloc::{Allocator, Global};

use crate::mini_vec::MiniVec;
use crate::raw::RawBuf;

/// Owning iterator over the elements of a `MiniVec`.
///
/// Created by `MiniVec::into_iter`. Elements not yielded are dropped together with the
/// iterator, after which the buffer is released.
pub struct IntoIter<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
    start: usize,
    end: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// Returns the elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `[start, end)` is live.
            slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start)
        }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        let value = unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `start < end`, slot `start` is live and leaves
            // the live range right after this read.
            self.buf.ptr().add(self.start).read()
        };
        self.start += 1;

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;
        Some(unsafe {
            // SAFETY (PRECONDITIONS ARE MET): slot `end` was live and is now outside the
            // live range.
            self.buf.ptr().add(self.end).read()
        })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `[start, end)` is still live; the buffer is
            // released afterwards by `RawBuf`.
            let remaining =
                ptr::slice_from_raw_parts_mut(self.buf.ptr().add(self.start), self.end - self.start);
            ptr::drop_in_place(remaining);
        }
    }
}

impl<T, A: Allocator> IntoIterator for MiniVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let (buf, len) = self.into_raw_parts();

        IntoIter {
            buf,
            start: 0,
            end: len,
        }
    }
}
