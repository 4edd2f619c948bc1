// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::handle_alloc_error;
use core::alloc::Layout;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Bound, Deref, DerefMut, RangeBounds};
use core::ptr;
use core::slice;

use allocator_api2::alloc::{Allocator, Global};

use crate::cursor::{Cursor, CursorMut, Rev};
use crate::error::MiniVecError;
use crate::guard::PrefixGuard;
use crate::raw::RawBuf;

#[cfg(any(test, feature = "test_utils"))]
use crate::behaviour::MiniVecBehaviour;

/// Contiguous growable array with explicit storage phases.
///
/// Slots `[0, len)` of the buffer hold live values, slots `[len, capacity)` are
/// allocated but uninitialized. Growth triggered by appends doubles the capacity
/// (exactly 1 when growing from 0); explicit requests such as [`MiniVec::reserve`]
/// allocate exactly what was asked for.
///
/// # Type Parameters
///
/// - `T`: The element type.
/// - `A`: The allocator strategy. Only raw slots are requested from it; building and
///   dropping values is done by the vector itself.
///
/// # Example
///
/// ```rust
/// use minivec::{MiniVec, MiniVecError};
///
/// fn example() -> Result<(), MiniVecError> {
///     let mut vec = MiniVec::new();
///     vec.push_back(1u8)?;
///     vec.push_back(2u8)?;
///     vec.push_back(3u8)?;
///
///     assert_eq!(vec.len(), 3);
///     assert_eq!(vec.capacity(), 4);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct MiniVec<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
    len: usize,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: MiniVecBehaviour,
}

/// Unwraps results on the infallible trait surfaces (`Clone`, `Extend`, ...) the same
/// way `Vec` does: allocation failure goes to `handle_alloc_error`, overflow panics.
fn infallible<T, R>(result: Result<R, MiniVecError>) -> R {
    match result {
        Ok(value) => value,
        Err(MiniVecError::AllocFailed { capacity }) => match Layout::array::<T>(capacity) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
        Err(err) => panic!("{err}"),
    }
}

fn range_to_bounds<R: RangeBounds<usize>>(range: R, len: usize) -> (usize, usize) {
    let first = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => match start.checked_add(1) {
            Some(start) => start,
            None => panic!("attempted to erase from after usize::MAX"),
        },
        Bound::Unbounded => 0,
    };

    let last = match range.end_bound() {
        Bound::Included(&end) => match end.checked_add(1) {
            Some(end) => end,
            None => panic!("attempted to erase up to usize::MAX inclusive"),
        },
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    assert!(
        first <= last,
        "erase range starts at {first} but ends at {last}"
    );
    assert!(
        last <= len,
        "erase range end (is {last}) should be <= len (is {len})"
    );

    (first, last)
}

impl<T> MiniVec<T> {
    /// Creates a new empty `MiniVec` with zero capacity. Does not allocate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use minivec::MiniVec;
    ///
    /// let vec: MiniVec<u8> = MiniVec::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty `MiniVec` owning exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`MiniVecError::AllocFailed`] or [`MiniVecError::CapacityOverflow`] if the
    /// storage cannot be obtained.
    pub fn with_capacity(capacity: usize) -> Result<Self, MiniVecError> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a `MiniVec` holding `len` default-constructed elements.
    ///
    /// Capacity equals `len`. If `T::default()` panics, the elements already built are
    /// dropped in reverse order and the storage is released before the panic continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained.
    pub fn with_len(len: usize) -> Result<Self, MiniVecError>
    where
        T: Default,
    {
        Self::with_len_in(len, Global)
    }

    /// Creates a `MiniVec` holding `len` clones of `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained.
    ///
    /// # Example
    ///
    /// ```rust
    /// use minivec::{MiniVec, MiniVecError};
    ///
    /// fn example() -> Result<(), MiniVecError> {
    ///     let vec = MiniVec::from_elem(3, &7u32)?;
    ///     assert_eq!(vec.as_slice(), &[7, 7, 7]);
    ///     assert_eq!(vec.capacity(), 3);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn from_elem(len: usize, value: &T) -> Result<Self, MiniVecError>
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, Global)
    }

    /// Creates a `MiniVec` from a range of known length.
    ///
    /// The distance of the range is taken first and exactly that many slots are
    /// allocated. To copy from borrowed data pass e.g. `slice.iter().cloned()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained.
    pub fn from_range<I>(range: I) -> Result<Self, MiniVecError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Self::from_range_in(range, Global)
    }

    /// Creates a `MiniVec` of `len` elements built by a fallible constructor.
    ///
    /// `build` receives the index of the element it constructs. On the first `Err`, the
    /// elements built so far are dropped in reverse order, the storage is released and
    /// the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the constructor's error, or an allocation error converted into `E`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use minivec::{MiniVec, MiniVecError};
    ///
    /// let squares = MiniVec::try_from_fn(4, |i| Ok::<_, MiniVecError>(i * i)).unwrap();
    /// assert_eq!(squares.as_slice(), &[0, 1, 4, 9]);
    ///
    /// let failed = MiniVec::try_from_fn(4, |i| {
    ///     if i == 2 {
    ///         Err(MiniVecError::OutOfRange { index: i, length: 2 })
    ///     } else {
    ///         Ok(i)
    ///     }
    /// });
    /// assert!(failed.is_err());
    /// ```
    pub fn try_from_fn<E, F>(len: usize, build: F) -> Result<Self, E>
    where
        E: From<MiniVecError>,
        F: FnMut(usize) -> Result<T, E>,
    {
        Self::try_from_fn_in(len, build, Global)
    }
}

impl<T, A: Allocator> MiniVec<T, A> {
    /// Creates a new empty `MiniVec` using `alloc` for its storage. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buf: RawBuf::new_in(alloc),
            len: 0,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: MiniVecBehaviour::None,
        }
    }

    fn from_parts(buf: RawBuf<T, A>, len: usize) -> Self {
        debug_assert!(len <= buf.capacity());

        Self {
            buf,
            len,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: MiniVecBehaviour::None,
        }
    }

    /// Creates an empty `MiniVec` owning exactly `capacity` slots from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, MiniVecError> {
        let buf = RawBuf::with_capacity_in(capacity, alloc)?;
        Ok(Self::from_parts(buf, 0))
    }

    /// Allocator-aware form of [`MiniVec::with_len`].
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained.
    pub fn with_len_in(len: usize, alloc: A) -> Result<Self, MiniVecError>
    where
        T: Default,
    {
        Self::try_from_fn_in(len, |_| Ok(T::default()), alloc)
    }

    /// Allocator-aware form of [`MiniVec::from_elem`].
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained.
    pub fn from_elem_in(len: usize, value: &T, alloc: A) -> Result<Self, MiniVecError>
    where
        T: Clone,
    {
        Self::try_from_fn_in(len, |_| Ok(value.clone()), alloc)
    }

    /// Allocator-aware form of [`MiniVec::from_range`].
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained.
    pub fn from_range_in<I>(range: I, alloc: A) -> Result<Self, MiniVecError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut range = range.into_iter();
        let len = range.len();

        Self::try_from_fn_in(
            len,
            |index| match range.next() {
                Some(value) => Ok(value),
                None => panic!("range reported length {len} but ended after {index} elements"),
            },
            alloc,
        )
    }

    /// Allocator-aware form of [`MiniVec::try_from_fn`].
    ///
    /// # Errors
    ///
    /// Returns the constructor's error, or an allocation error converted into `E`.
    pub fn try_from_fn_in<E, F>(len: usize, mut build: F, alloc: A) -> Result<Self, E>
    where
        E: From<MiniVecError>,
        F: FnMut(usize) -> Result<T, E>,
    {
        // `guard` is declared after `buf`, so it rolls back before the slots are released.
        let buf = RawBuf::with_capacity_in(len, alloc)?;
        let mut guard = PrefixGuard::new(buf.ptr());

        for index in 0..len {
            let value = build(index)?;
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): `index < len == capacity` and slot `index`
                // has not been written yet.
                guard.push(value);
            }
        }

        debug_assert_eq!(guard.built(), len);
        let built = guard.commit();

        Ok(Self::from_parts(buf, built))
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots owned, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the allocator strategy.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Returns a slice over the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): slots `[0, len)` are initialized and the
            // pointer is non-null and aligned even when capacity is 0.
            slice::from_raw_parts(self.buf.ptr(), self.len)
        }
    }

    /// Returns a mutable slice over the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): as in `as_slice`, and `&mut self` guarantees
            // exclusive access.
            slice::from_raw_parts_mut(self.buf.ptr(), self.len)
        }
    }

    /// Returns a raw pointer to the buffer. Dangling when capacity is 0.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Returns a mutable raw pointer to the buffer. Dangling when capacity is 0.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// Single choke point for every buffer replacement.
    fn reallocate(&mut self, new_cap: usize) -> Result<(), MiniVecError> {
        #[cfg(any(test, feature = "test_utils"))]
        {
            if new_cap > 0 && self.behaviour.should_fail() {
                tracing::debug!(new_cap, "injected allocation failure");
                return Err(MiniVecError::AllocFailed { capacity: new_cap });
            }
        }

        let old_cap = self.capacity();

        if let Err(err) = self.buf.relocate(self.len, new_cap) {
            tracing::debug!(%err, old_cap, new_cap, "buffer relocation failed");
            return Err(err);
        }

        tracing::trace!(old_cap, new_cap, len = self.len, "relocated buffer");
        Ok(())
    }

    /// Ensures room for one more element, doubling the capacity if needed.
    #[inline]
    fn grow_for_one(&mut self) -> Result<(), MiniVecError> {
        if self.len < self.capacity() {
            return Ok(());
        }

        self.grow_one()
    }

    #[cold]
    #[inline(never)]
    fn grow_one(&mut self) -> Result<(), MiniVecError> {
        let cap = self.capacity();
        let new_cap = match cap {
            0 => 1,
            _ => cap
                .checked_mul(2)
                .ok_or(MiniVecError::CapacityOverflow { requested: cap })?,
        };

        self.reallocate(new_cap)
    }

    /// Ensures the vector owns at least `capacity` slots.
    ///
    /// If `capacity` is not above the current capacity this is a no-op. Otherwise exactly
    /// `capacity` slots are allocated, the live elements are moved across and the old
    /// buffer is released. The length does not change. Invalidates every cursor and
    /// reference into the vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained, in which case the vector is
    /// left exactly as it was.
    ///
    /// # Example
    ///
    /// ```rust
    /// use minivec::{MiniVec, MiniVecError};
    ///
    /// fn example() -> Result<(), MiniVecError> {
    ///     let mut vec = MiniVec::<u8>::new();
    ///     vec.reserve(10)?;
    ///     assert_eq!(vec.capacity(), 10);
    ///
    ///     // Smaller requests do nothing
    ///     vec.reserve(5)?;
    ///     assert_eq!(vec.capacity(), 10);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<(), MiniVecError> {
        if capacity <= self.capacity() {
            return Ok(());
        }

        self.reallocate(capacity)
    }

    /// Shrinks the capacity to exactly the length.
    ///
    /// No-op when `len == capacity`. An empty vector releases its buffer entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the smaller buffer cannot be obtained, in which case the vector
    /// is left exactly as it was.
    pub fn shrink_to_fit(&mut self) -> Result<(), MiniVecError> {
        if self.len == self.capacity() {
            return Ok(());
        }

        self.reallocate(self.len)
    }

    /// Checked access to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MiniVecError::OutOfRange`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, MiniVecError> {
        let length = self.len;
        self.as_slice()
            .get(index)
            .ok_or(MiniVecError::OutOfRange { index, length })
    }

    /// Checked mutable access to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MiniVecError::OutOfRange`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, MiniVecError> {
        let length = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(MiniVecError::OutOfRange { index, length })
    }

    /// Returns the first element, or `None` if the vector is empty.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the first element mutably, or `None` if the vector is empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element, or `None` if the vector is empty.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the last element mutably, or `None` if the vector is empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Appends `value`, growing the buffer if it is full.
    ///
    /// Growth invalidates every cursor and reference into the vector. To append a copy,
    /// pass `value.clone()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is full and a larger buffer cannot be obtained.
    /// `value` is dropped and the vector is unchanged.
    pub fn push_back(&mut self, value: T) -> Result<(), MiniVecError> {
        self.emplace_back(|| value).map(|_| ())
    }

    /// Constructs an element directly into the slot after the last one.
    ///
    /// The buffer is grown first, then `build` runs. If `build` panics, the length is
    /// unchanged (the buffer may already have grown).
    ///
    /// # Errors
    ///
    /// Returns an error if a larger buffer cannot be obtained; `build` is not called.
    pub fn emplace_back<F>(&mut self, build: F) -> Result<&mut T, MiniVecError>
    where
        F: FnOnce() -> T,
    {
        self.grow_for_one()?;

        let len = self.len;
        let slot = unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `len < capacity` after `grow_for_one`.
            self.buf.ptr().add(len)
        };

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): the slot is allocated and not live.
            slot.write(build());
        }
        self.len = len + 1;

        Ok(unsafe {
            // SAFETY (PRECONDITIONS ARE MET): the slot was just initialized and is borrowed
            // through `&mut self`.
            &mut *slot
        })
    }

    /// Fallible form of [`MiniVec::emplace_back`].
    ///
    /// # Errors
    ///
    /// Returns the constructor's error or an allocation error converted into `E`. In both
    /// cases the length is unchanged.
    pub fn try_emplace_back<E, F>(&mut self, build: F) -> Result<&mut T, E>
    where
        E: From<MiniVecError>,
        F: FnOnce() -> Result<T, E>,
    {
        self.grow_for_one()?;
        let value = build()?;

        Ok(self.emplace_back(|| value)?)
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        Some(unsafe {
            // SAFETY (PRECONDITIONS ARE MET): slot `len` was live and is now outside the
            // live range, so it is read exactly once.
            self.buf.ptr().add(self.len).read()
        })
    }

    /// Inserts `value` at `index`, shifting every element at or after it one slot toward
    /// the end.
    ///
    /// Returns a cursor at the inserted element. Linear in `len - index`. If the buffer is
    /// full it grows first, which invalidates every cursor and reference; otherwise only
    /// positions at or after `index` are affected. To insert a copy pass `value.clone()`;
    /// the clone is made before anything is modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is full and a larger buffer cannot be obtained.
    /// `value` is dropped and the vector is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<CursorMut<'_, T, A>, MiniVecError> {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );

        self.grow_for_one()?;

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `len < capacity`, so shifting `[index, len)`
            // up by one stays inside the buffer; the vacated slot is then overwritten
            // without dropping.
            let slot = self.buf.ptr().add(index);
            ptr::copy(slot, slot.add(1), len - index);
            slot.write(value);
        }
        self.len = len + 1;

        Ok(CursorMut::new(self, index))
    }

    /// Removes the element at `index`, shifting the tail one slot toward the front.
    ///
    /// Exactly the removed value is dropped. Returns a cursor at `index`, which now refers
    /// to the element that followed the removed one (or is `end()`).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> CursorMut<'_, T, A> {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );

        let removed = unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `index < len`; the value is read out once and
            // its slot is overwritten by the shift below.
            let slot = self.buf.ptr().add(index);
            let removed = slot.read();
            ptr::copy(slot.add(1), slot, len - index - 1);
            removed
        };
        self.len = len - 1;
        debug_assert!(self.len < self.capacity());
        drop(removed);

        CursorMut::new(self, index)
    }

    /// Removes the elements in `range`, moving the tail down to close the gap.
    ///
    /// An empty range is a no-op. Exactly `last - first` values are dropped and the length
    /// decreases by that count. Returns a cursor at `first`.
    ///
    /// # Panics
    ///
    /// Panics if the range starts after it ends or ends past `len`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use minivec::{MiniVec, MiniVecError};
    ///
    /// fn example() -> Result<(), MiniVecError> {
    ///     let mut vec = MiniVec::from_range([0, 10, 99, 30, 40])?;
    ///     let cursor = vec.erase_range(1..3);
    ///     assert_eq!(*cursor, 30);
    ///     assert_eq!(vec.as_slice(), &[0, 30, 40]);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn erase_range<R>(&mut self, range: R) -> CursorMut<'_, T, A>
    where
        R: RangeBounds<usize>,
    {
        let (first, last) = range_to_bounds(range, self.len);

        if first == last {
            return CursorMut::new(self, first);
        }

        // Closes the gap even if dropping a removed value panics.
        struct TailShift<'a, T, A: Allocator> {
            vec: &'a mut MiniVec<T, A>,
            first: usize,
            last: usize,
            len: usize,
        }

        impl<T, A: Allocator> Drop for TailShift<'_, T, A> {
            fn drop(&mut self) {
                unsafe {
                    // SAFETY (PRECONDITIONS ARE MET): `[last, len)` is live and
                    // `[first, last)` has been dropped, so moving the tail down leaves
                    // `[0, len - (last - first))` live.
                    let base = self.vec.buf.ptr();
                    ptr::copy(base.add(self.last), base.add(self.first), self.len - self.last);
                }
                self.vec.len = self.len - (self.last - self.first);
            }
        }

        let len = self.len;
        self.len = first;

        let shift = TailShift {
            vec: self,
            first,
            last,
            len,
        };

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `[first, last)` is live and no longer counted
            // by `len`, so each value is dropped exactly once.
            let removed = ptr::slice_from_raw_parts_mut(shift.vec.buf.ptr().add(first), last - first);
            ptr::drop_in_place(removed);
        }

        drop(shift);
        CursorMut::new(self, first)
    }

    /// Drops every element past `len`, keeping the capacity.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail_len = self.len - len;
        self.len = len;

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `[len, len + tail_len)` was live and is no
            // longer counted, so each value is dropped exactly once.
            let tail = ptr::slice_from_raw_parts_mut(self.buf.ptr().add(len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element in index order. The capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Fills `[len, new_len)` from `build`, reserving exactly `new_len` slots first.
    fn extend_to_with<E, F>(&mut self, new_len: usize, mut build: F) -> Result<(), E>
    where
        E: From<MiniVecError>,
        F: FnMut() -> Result<T, E>,
    {
        debug_assert!(new_len > self.len);
        self.reserve(new_len)?;

        let mut guard = PrefixGuard::new(unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `len <= capacity`.
            self.buf.ptr().add(self.len)
        });

        for _ in self.len..new_len {
            let value = build()?;
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): `new_len <= capacity` after `reserve`, and
                // the guard only writes slots past the live range.
                guard.push(value);
            }
        }

        self.len += guard.commit();
        Ok(())
    }

    /// Resizes to `new_len`, filling new slots with clones of `value`.
    ///
    /// Shrinking drops `[new_len, len)`. Growing reserves exactly `new_len` slots and
    /// constructs the new elements. If a clone panics, the new elements built so far are
    /// dropped and the length is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained; the vector is unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use minivec::{MiniVec, MiniVecError};
    ///
    /// fn example() -> Result<(), MiniVecError> {
    ///     let mut vec = MiniVec::from_range([0, 30, 40])?;
    ///     vec.resize(5, -1)?;
    ///     assert_eq!(vec.as_slice(), &[0, 30, 40, -1, -1]);
    ///
    ///     vec.resize(3, -1)?;
    ///     assert_eq!(vec.as_slice(), &[0, 30, 40]);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), MiniVecError>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.extend_to_with(new_len, || Ok(value.clone()))
    }

    /// Resizes to `new_len`, filling new slots with `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained; the vector is unchanged.
    pub fn resize_default(&mut self, new_len: usize) -> Result<(), MiniVecError>
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.extend_to_with(new_len, || Ok(T::default()))
    }

    /// Resizes to `new_len`, filling new slots from a fallible constructor.
    ///
    /// # Errors
    ///
    /// Returns the constructor's error or an allocation error converted into `E`. The new
    /// elements built so far are dropped in reverse order and the length is unchanged.
    pub fn try_resize_with<E, F>(&mut self, new_len: usize, build: F) -> Result<(), E>
    where
        E: From<MiniVecError>,
        F: FnMut() -> Result<T, E>,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.extend_to_with(new_len, build)
    }

    /// Deep copy with independent storage of the same capacity.
    ///
    /// If a clone panics, the copies made so far are dropped in reverse order and the new
    /// storage is released; `self` is never touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be obtained.
    pub fn try_clone(&self) -> Result<Self, MiniVecError>
    where
        T: Clone,
        A: Clone,
    {
        let buf = RawBuf::with_capacity_in(self.capacity(), self.allocator().clone())?;
        let mut guard = PrefixGuard::new(buf.ptr());

        for value in self.as_slice() {
            let copy = value.clone();
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): the new buffer has as many slots as
                // `self`, which is at least `len`.
                guard.push(copy);
            }
        }

        let built = guard.commit();
        Ok(Self::from_parts(buf, built))
    }

    /// Copy assignment with the strong guarantee.
    ///
    /// A complete copy of `source` is built first and then move-assigned into `self`. If
    /// building the copy fails (error or panic), `self` is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage for the copy cannot be obtained.
    pub fn try_assign_from(&mut self, source: &Self) -> Result<(), MiniVecError>
    where
        T: Clone,
        A: Clone,
    {
        let mut copy = source.try_clone()?;
        self.move_assign(&mut copy);

        Ok(())
    }

    /// Move assignment: drops the elements of `self`, releases its buffer, adopts the
    /// buffer, length, capacity and allocator of `source` and leaves `source` empty with
    /// a clone of its allocator.
    pub fn move_assign(&mut self, source: &mut Self)
    where
        A: Clone,
    {
        self.clear();

        let emptied = RawBuf::new_in(source.allocator().clone());
        self.buf = mem::replace(&mut source.buf, emptied);
        self.len = mem::replace(&mut source.len, 0);
    }

    /// Moves the contents out, leaving `self` empty-but-valid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use minivec::{MiniVec, MiniVecError};
    ///
    /// fn example() -> Result<(), MiniVecError> {
    ///     let mut source = MiniVec::from_range([1, 2, 3])?;
    ///     let moved = source.take();
    ///
    ///     assert_eq!(moved.as_slice(), &[1, 2, 3]);
    ///     assert_eq!(source.len(), 0);
    ///     assert_eq!(source.capacity(), 0);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let mut moved = Self::new_in(self.allocator().clone());
        moved.move_assign(self);
        moved
    }

    /// Replaces the contents with clones of `items`.
    ///
    /// The current elements are dropped. The buffer is replaced only when `items` does not
    /// fit in the current capacity, and then by one of exactly `items.len()` slots.
    ///
    /// # Errors
    ///
    /// Returns an error if a larger buffer cannot be obtained. The vector is then empty
    /// and still owns its previous buffer.
    pub fn assign(&mut self, items: &[T]) -> Result<(), MiniVecError>
    where
        T: Clone,
    {
        self.clear();
        self.reserve(items.len())?;

        let mut guard = PrefixGuard::new(self.buf.ptr());
        for item in items {
            let copy = item.clone();
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): the vector is empty and owns at least
                // `items.len()` slots.
                guard.push(copy);
            }
        }

        self.len = guard.commit();
        Ok(())
    }

    /// Read-only cursor at the first element.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Read-only cursor one past the last element.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    /// Mutable cursor at the first element.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut::new(self, 0)
    }

    /// Mutable cursor one past the last element.
    pub fn end_mut(&mut self) -> CursorMut<'_, T, A> {
        let len = self.len;
        CursorMut::new(self, len)
    }

    /// Reverse cursor at the last element.
    pub fn rbegin(&self) -> Rev<Cursor<'_, T>> {
        Rev::new(self.end())
    }

    /// Reverse cursor one before the first element.
    pub fn rend(&self) -> Rev<Cursor<'_, T>> {
        Rev::new(self.begin())
    }

    /// Mutable reverse cursor at the last element.
    pub fn rbegin_mut(&mut self) -> Rev<CursorMut<'_, T, A>> {
        Rev::new(self.end_mut())
    }

    /// Mutable reverse cursor one before the first element.
    pub fn rend_mut(&mut self) -> Rev<CursorMut<'_, T, A>> {
        Rev::new(self.begin_mut())
    }

    /// Changes the test behaviour for this vector.
    ///
    /// This is only available with the `test_utils` feature and allows injecting
    /// allocation failures for testing error handling paths.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: MiniVecBehaviour) {
        self.behaviour = behaviour;
    }
}

impl<T, A: Allocator> Drop for MiniVec<T, A> {
    fn drop(&mut self) {
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `[0, len)` is live; dropping the slice runs
            // the destructors in index order. The buffer is released by `RawBuf`.
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T> Default for MiniVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Deref for MiniVec<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for MiniVec<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for MiniVec<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for MiniVec<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for MiniVec<T, A> {
    fn clone(&self) -> Self {
        infallible::<T, _>(self.try_clone())
    }

    fn clone_from(&mut self, source: &Self) {
        infallible::<T, _>(self.try_assign_from(source));
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for MiniVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq, A: Allocator, B: Allocator> PartialEq<MiniVec<T, B>> for MiniVec<T, A> {
    fn eq(&self, other: &MiniVec<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for MiniVec<T, A> {}

impl<T: PartialEq, A: Allocator> PartialEq<[T]> for MiniVec<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, A: Allocator, const N: usize> PartialEq<[T; N]> for MiniVec<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd, A: Allocator> PartialOrd for MiniVec<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: Allocator> Ord for MiniVec<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: Allocator> Hash for MiniVec<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state);
    }
}

impl<T, A: Allocator> Extend<T> for MiniVec<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        infallible::<T, _>(self.reserve(self.len.saturating_add(lower)));

        for value in iter {
            infallible::<T, _>(self.push_back(value));
        }
    }
}

impl<T> FromIterator<T> for MiniVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a MiniVec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut MiniVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T, A: Allocator> MiniVec<T, A> {
    /// Splits into raw storage and length without running `Drop`.
    pub(crate) fn into_raw_parts(self) -> (RawBuf<T, A>, usize) {
        let this = mem::ManuallyDrop::new(self);
        let buf = unsafe {
            // SAFETY (PRECONDITIONS ARE MET): `this` is never dropped, so the buffer is
            // moved out exactly once.
            ptr::read(&this.buf)
        };
        (buf, this.len)
    }
}
