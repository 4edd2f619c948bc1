// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Random-access positions into a `MiniVec`.
//!
//! A cursor is an index paired with a borrow of the vector it points into. Because the
//! borrow is held for as long as the cursor lives, every operation that could move or
//! drop elements ends the cursor's life first. What survives a mutation is the plain
//! index, from which a fresh cursor can be derived.
//!
//! Valid positions are `0..=len`; `len` is the past-the-end position. Moving outside that
//! range panics. Dereferencing the past-the-end position panics too, while `get()`
//! returns `None`.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Add, AddAssign, Deref, DerefMut, Index, Sub, SubAssign};
use core::ptr;

use allocator_api2::alloc::{Allocator, Global};

use crate::error::MiniVecError;
use crate::mini_vec::MiniVec;

/// Capabilities shared by every cursor flavour.
pub trait Position {
    /// Index of the position, counted from the start of the traversal.
    fn index(&self) -> usize;

    /// Index of the past-the-end position, i.e. the number of positions before it.
    ///
    /// Unlike [`ExactSizeIterator::len`], this does not depend on where the cursor is.
    fn end_index(&self) -> usize;

    /// Moves the position by `delta` elements.
    ///
    /// # Panics
    ///
    /// Panics if the resulting position leaves `0..=len`.
    fn step(&mut self, delta: isize);

    /// Returns `true` at the past-the-end position.
    fn is_end(&self) -> bool {
        self.index() == self.end_index()
    }

    /// Returns the position `delta` elements away.
    ///
    /// # Panics
    ///
    /// Panics if the resulting position leaves `0..=len`.
    fn offset(mut self, delta: isize) -> Self
    where
        Self: Sized,
    {
        self.step(delta);
        self
    }
}

#[inline]
fn shifted(index: usize, delta: isize, len: usize) -> usize {
    match index.checked_add_signed(delta) {
        Some(moved) if moved <= len => moved,
        _ => panic!("cursor moved out of bounds: {index} {delta:+} is outside 0..={len}"),
    }
}

#[inline]
fn element_index(index: usize, delta: isize, len: usize) -> usize {
    match index.checked_add_signed(delta) {
        Some(target) if target < len => target,
        _ => panic!("cursor access out of bounds: {index} {delta:+} is outside 0..{len}"),
    }
}

#[cold]
#[track_caller]
fn past_the_end(len: usize) -> ! {
    panic!("dereferenced the past-the-end position (len is {len})")
}

// =============================================================================
// Cursor
// =============================================================================

/// Read-only position into a `MiniVec`.
///
/// `Cursor` is `Copy`. Two cursors compare and subtract by position; comparing cursors
/// into different vectors yields `None`, subtracting them panics.
///
/// A cursor is also an [`Iterator`] over the elements from its position to the end, so
/// `vec.begin().copied().collect()` works. Since it is `Copy`, `for x in cursor` walks a
/// copy and leaves `cursor` where it was; bind a `mut` copy and call `next` to advance
/// the cursor itself. [`ExactSizeIterator::len`] counts the elements left, while
/// [`Position::end_index`] is the past-the-end index.
///
/// # Example
///
/// ```rust
/// use minivec::{MiniVec, MiniVecError};
///
/// fn example() -> Result<(), MiniVecError> {
///     let vec = MiniVec::from_range([10, 20, 30, 40])?;
///
///     let mut cursor = vec.begin();
///     cursor += 2;
///     assert_eq!(*cursor, 30);
///     assert_eq!(cursor[-1], 20);
///     assert_eq!(cursor - vec.begin(), 2);
///     assert!(cursor < vec.end());
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct Cursor<'a, T> {
    slice: &'a [T],
    index: usize,
}

impl<'a, T> Cursor<'a, T> {
    /// Creates a cursor at `index` in `slice`.
    ///
    /// # Panics
    ///
    /// Panics if `index > slice.len()`.
    pub fn new(slice: &'a [T], index: usize) -> Self {
        assert!(
            index <= slice.len(),
            "cursor index (is {index}) should be <= len (is {})",
            slice.len()
        );

        Self { slice, index }
    }

    /// Returns the index of this position.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.slice.len()
    }

    /// Returns the element at this position, or `None` past the end.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.slice.get(self.index)
    }

    /// Returns the element `delta` positions away.
    ///
    /// # Panics
    ///
    /// Panics if the target is not a live element.
    #[inline]
    pub fn at(&self, delta: isize) -> &'a T {
        &self.slice[element_index(self.index, delta, self.slice.len())]
    }

    /// Advances one position.
    ///
    /// # Panics
    ///
    /// Panics when already past the end.
    #[inline]
    pub fn move_next(&mut self) {
        self.index = shifted(self.index, 1, self.slice.len());
    }

    /// Steps back one position.
    ///
    /// # Panics
    ///
    /// Panics when already at the first position.
    #[inline]
    pub fn move_prev(&mut self) {
        self.index = shifted(self.index, -1, self.slice.len());
    }

    /// Returns the elements from this position to the end.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        &self.slice[self.index..]
    }

    #[inline]
    fn same_vector(&self, other: &Self) -> bool {
        ptr::eq(self.slice.as_ptr(), other.slice.as_ptr())
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.slice.len())
            .finish()
    }
}

impl<T> Position for Cursor<'_, T> {
    fn index(&self) -> usize {
        self.index
    }

    fn end_index(&self) -> usize {
        self.slice.len()
    }

    fn step(&mut self, delta: isize) {
        self.index = shifted(self.index, delta, self.slice.len());
    }
}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        match self.get() {
            Some(value) => value,
            None => past_the_end(self.slice.len()),
        }
    }
}

impl<T> Index<isize> for Cursor<'_, T> {
    type Output = T;

    fn index(&self, delta: isize) -> &T {
        self.at(delta)
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;

    fn add(self, delta: isize) -> Self {
        self.offset(delta)
    }
}

impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;

    fn sub(self, delta: isize) -> Self {
        self.offset(-delta)
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, delta: isize) {
        self.step(delta);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, delta: isize) {
        self.step(-delta);
    }
}

impl<T> Sub for Cursor<'_, T> {
    type Output = isize;

    /// Element-count difference between two positions of the same vector.
    fn sub(self, other: Self) -> isize {
        assert!(
            self.same_vector(&other),
            "subtracted cursors into different vectors"
        );
        self.index as isize - other.index as isize
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_vector(other) && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_vector(other)
            .then(|| self.index.cmp(&other.index))
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.slice.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slice.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

// =============================================================================
// CursorMut
// =============================================================================

/// Mutable position into a `MiniVec`.
///
/// Holds the vector exclusively, so at most one `CursorMut` exists per vector and no
/// `Cursor` can be alive next to it. Structural edits (`insert`, `erase`, `erase_to`)
/// consume the cursor and hand back a new one at the affected index.
///
/// # Example
///
/// ```rust
/// use minivec::{MiniVec, MiniVecError};
///
/// fn example() -> Result<(), MiniVecError> {
///     let mut vec = MiniVec::from_range([1, 2, 4])?;
///
///     let mut cursor = vec.begin_mut() + 2;
///     *cursor *= 10;
///
///     let cursor = cursor.insert(3)?;
///     assert_eq!(cursor.index(), 2);
///     assert_eq!(vec.as_slice(), &[1, 2, 3, 40]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct CursorMut<'a, T, A: Allocator = Global> {
    vec: &'a mut MiniVec<T, A>,
    index: usize,
}

impl<'a, T, A: Allocator> CursorMut<'a, T, A> {
    /// Creates a cursor at `index` in `vec`.
    ///
    /// # Panics
    ///
    /// Panics if `index > vec.len()`.
    pub fn new(vec: &'a mut MiniVec<T, A>, index: usize) -> Self {
        assert!(
            index <= vec.len(),
            "cursor index (is {index}) should be <= len (is {})",
            vec.len()
        );

        Self { vec, index }
    }

    /// Returns the index of this position.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.vec.len()
    }

    /// Returns the element at this position, or `None` past the end.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.vec.as_slice().get(self.index)
    }

    /// Returns the element at this position mutably, or `None` past the end.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.vec.as_mut_slice().get_mut(self.index)
    }

    /// Returns the element `delta` positions away.
    ///
    /// # Panics
    ///
    /// Panics if the target is not a live element.
    pub fn at(&self, delta: isize) -> &T {
        let target = element_index(self.index, delta, self.vec.len());
        &self.vec.as_slice()[target]
    }

    /// Returns the element `delta` positions away mutably.
    ///
    /// # Panics
    ///
    /// Panics if the target is not a live element.
    pub fn at_mut(&mut self, delta: isize) -> &mut T {
        let target = element_index(self.index, delta, self.vec.len());
        &mut self.vec.as_mut_slice()[target]
    }

    /// Advances one position.
    ///
    /// # Panics
    ///
    /// Panics when already past the end.
    pub fn move_next(&mut self) {
        self.step(1);
    }

    /// Steps back one position.
    ///
    /// # Panics
    ///
    /// Panics when already at the first position.
    pub fn move_prev(&mut self) {
        self.step(-1);
    }

    /// Lends a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.vec.as_slice(), self.index)
    }

    /// Inserts `value` before this position. See [`MiniVec::insert`].
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is full and a larger buffer cannot be obtained.
    pub fn insert(self, value: T) -> Result<CursorMut<'a, T, A>, MiniVecError> {
        let Self { vec, index } = self;
        vec.insert(index, value)
    }

    /// Removes the element at this position. See [`MiniVec::erase`].
    ///
    /// # Panics
    ///
    /// Panics at the past-the-end position.
    pub fn erase(self) -> CursorMut<'a, T, A> {
        let Self { vec, index } = self;
        vec.erase(index)
    }

    /// Removes the elements from this position up to (not including) `last`.
    /// See [`MiniVec::erase_range`].
    ///
    /// # Panics
    ///
    /// Panics if `last` is before this position or past the end.
    pub fn erase_to(self, last: usize) -> CursorMut<'a, T, A> {
        let Self { vec, index } = self;
        vec.erase_range(index..last)
    }
}

impl<T, A: Allocator> fmt::Debug for CursorMut<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("len", &self.vec.len())
            .finish()
    }
}

impl<T, A: Allocator> Position for CursorMut<'_, T, A> {
    fn index(&self) -> usize {
        self.index
    }

    fn end_index(&self) -> usize {
        self.vec.len()
    }

    fn step(&mut self, delta: isize) {
        self.index = shifted(self.index, delta, self.vec.len());
    }
}

impl<T, A: Allocator> Deref for CursorMut<'_, T, A> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        match self.get() {
            Some(value) => value,
            None => past_the_end(self.vec.len()),
        }
    }
}

impl<T, A: Allocator> DerefMut for CursorMut<'_, T, A> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        let len = self.vec.len();
        match self.get_mut() {
            Some(value) => value,
            None => past_the_end(len),
        }
    }
}

impl<T, A: Allocator> Add<isize> for CursorMut<'_, T, A> {
    type Output = Self;

    fn add(self, delta: isize) -> Self {
        self.offset(delta)
    }
}

impl<T, A: Allocator> Sub<isize> for CursorMut<'_, T, A> {
    type Output = Self;

    fn sub(self, delta: isize) -> Self {
        self.offset(-delta)
    }
}

impl<T, A: Allocator> AddAssign<isize> for CursorMut<'_, T, A> {
    fn add_assign(&mut self, delta: isize) {
        self.step(delta);
    }
}

impl<T, A: Allocator> SubAssign<isize> for CursorMut<'_, T, A> {
    fn sub_assign(&mut self, delta: isize) {
        self.step(-delta);
    }
}

impl<'a, T, A: Allocator> From<CursorMut<'a, T, A>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T, A>) -> Self {
        let CursorMut { vec, index } = cursor;
        let vec: &'a MiniVec<T, A> = vec;
        Cursor::new(vec.as_slice(), index)
    }
}

// =============================================================================
// Rev
// =============================================================================

/// Reverse adaptor over a cursor.
///
/// Advancing a `Rev` moves its base toward the front, and it refers to the element just
/// before its base. `Rev::new(vec.end())` therefore refers to the last element and
/// `Rev::new(vec.begin())` is the reverse past-the-end position.
///
/// `Rev<Cursor>` iterates from the element before its base down to the front. Like
/// [`Cursor`] it is `Copy`, so a `for` loop walks a copy.
///
/// # Example
///
/// ```rust
/// use minivec::{MiniVec, MiniVecError};
///
/// fn example() -> Result<(), MiniVecError> {
///     let vec = MiniVec::from_range([1, 2, 3])?;
///
///     let mut rev = vec.rbegin();
///     assert_eq!(*rev, 3);
///     rev.move_next();
///     assert_eq!(*rev, 2);
///     assert_eq!(vec.rend() - rev, 2);
///
///     let backwards: Vec<i32> = vec.rbegin().copied().collect();
///     assert_eq!(backwards, [3, 2, 1]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Rev<C> {
    base: C,
}

impl<C> Rev<C> {
    /// Wraps `base`.
    pub fn new(base: C) -> Self {
        Self { base }
    }

    /// Returns the underlying forward position.
    pub fn base(&self) -> &C {
        &self.base
    }

    /// Unwraps the underlying forward position.
    pub fn into_base(self) -> C {
        self.base
    }
}

impl<C: Position> Rev<C> {
    /// Advances one position toward the front.
    ///
    /// # Panics
    ///
    /// Panics when already at the reverse past-the-end position.
    pub fn move_next(&mut self) {
        self.base.step(-1);
    }

    /// Steps back one position toward the end.
    ///
    /// # Panics
    ///
    /// Panics when already at the last element.
    pub fn move_prev(&mut self) {
        self.base.step(1);
    }

    /// Index of the forward element this position refers to, if any.
    fn target(&self) -> Option<usize> {
        self.base.index().checked_sub(1)
    }
}

impl<C: Position> Position for Rev<C> {
    fn index(&self) -> usize {
        self.base.end_index() - self.base.index()
    }

    fn end_index(&self) -> usize {
        self.base.end_index()
    }

    fn step(&mut self, delta: isize) {
        self.base.step(-delta);
    }
}

impl<C: Position> Add<isize> for Rev<C> {
    type Output = Self;

    fn add(self, delta: isize) -> Self {
        self.offset(delta)
    }
}

impl<C: Position> Sub<isize> for Rev<C> {
    type Output = Self;

    fn sub(self, delta: isize) -> Self {
        self.offset(-delta)
    }
}

impl<C: Position> AddAssign<isize> for Rev<C> {
    fn add_assign(&mut self, delta: isize) {
        self.step(delta);
    }
}

impl<C: Position> SubAssign<isize> for Rev<C> {
    fn sub_assign(&mut self, delta: isize) {
        self.step(-delta);
    }
}

impl<C: PartialEq> PartialEq for Rev<C> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<C: Eq> Eq for Rev<C> {}

impl<C: PartialOrd> PartialOrd for Rev<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.base.partial_cmp(&self.base)
    }
}

impl<'a, T> Rev<Cursor<'a, T>> {
    /// Returns the element this position refers to, or `None` at the reverse end.
    pub fn get(&self) -> Option<&'a T> {
        self.base.slice.get(self.target()?)
    }

    /// Returns the element `delta` reverse positions away.
    ///
    /// # Panics
    ///
    /// Panics if the target is not a live element.
    pub fn at(&self, delta: isize) -> &'a T {
        let len = self.base.slice.len();
        let reversed = element_index(Position::index(self), delta, len);
        &self.base.slice[len - 1 - reversed]
    }
}

impl<T> Deref for Rev<Cursor<'_, T>> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        match self.get() {
            Some(value) => value,
            None => past_the_end(self.base.slice.len()),
        }
    }
}

impl<T> Sub for Rev<Cursor<'_, T>> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        other.base - self.base
    }
}

impl<'a, T> Iterator for Rev<Cursor<'a, T>> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.get()?;
        self.base.index -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.base.index, Some(self.base.index))
    }
}

impl<T> ExactSizeIterator for Rev<Cursor<'_, T>> {}

impl<T> FusedIterator for Rev<Cursor<'_, T>> {}

impl<T, A: Allocator> Rev<CursorMut<'_, T, A>> {
    /// Returns the element this position refers to, or `None` at the reverse end.
    pub fn get(&self) -> Option<&T> {
        let target = self.target()?;
        self.base.vec.as_slice().get(target)
    }

    /// Returns the element this position refers to mutably, or `None` at the reverse end.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let target = self.target()?;
        self.base.vec.as_mut_slice().get_mut(target)
    }
}

impl<T, A: Allocator> Deref for Rev<CursorMut<'_, T, A>> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        match self.get() {
            Some(value) => value,
            None => past_the_end(self.base.vec.len()),
        }
    }
}

impl<T, A: Allocator> DerefMut for Rev<CursorMut<'_, T, A>> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        let len = self.base.vec.len();
        match self.get_mut() {
            Some(value) => value,
            None => past_the_end(len),
        }
    }
}
