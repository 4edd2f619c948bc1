// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::panic::{self, AssertUnwindSafe};

use minivec_test_utils::{CountingAlloc, Ledger};

use super::ids;
use crate::{MiniVec, MiniVecBehaviour, MiniVecError};

// =============================================================================
// clone / try_clone
// =============================================================================

#[test]
fn test_clone_keeps_source_capacity() {
    let mut vec = MiniVec::with_capacity(10).expect("Failed to with_capacity(10)");
    vec.push_back(1).expect("Failed to push_back(1)");
    vec.push_back(2).expect("Failed to push_back(2)");

    let mut copy = vec.clone();

    assert_eq!(copy, vec);
    assert_eq!(copy.capacity(), 10);
    assert_ne!(copy.as_ptr(), vec.as_ptr());

    copy[0] = 100;
    assert_eq!(vec.as_slice(), &[1, 2]);
}

#[test]
fn test_try_clone_of_empty_vector_does_not_allocate() {
    let alloc = CountingAlloc::new();
    let vec = MiniVec::<u8, _>::new_in(alloc.clone());

    let copy = vec.try_clone().expect("Failed to try_clone()");

    assert!(copy.is_empty());
    assert_eq!(alloc.allocations(), 0);
}

#[test]
fn test_try_clone_alloc_failure() {
    let alloc = CountingAlloc::new();
    let vec = MiniVec::from_range_in([1u8, 2], alloc.clone()).expect("Failed to from_range_in(..)");

    alloc.fail_all(true);

    assert!(matches!(
        vec.try_clone(),
        Err(MiniVecError::AllocFailed { capacity: 2 })
    ));
}

#[test]
fn test_clone_panic_rolls_back_and_releases() {
    let ledger = Ledger::new();
    let alloc = CountingAlloc::new();
    let vec = MiniVec::from_range_in((0..4).map(|id| ledger.track(id)), alloc.clone())
        .expect("Failed to from_range_in(..)");

    ledger.fail_on_clone(3);

    let result = panic::catch_unwind(AssertUnwindSafe(|| vec.clone()));

    assert!(result.is_err());
    assert_eq!(ledger.drops(), [1, 0]);
    assert_eq!(alloc.live_blocks(), 1);

    // The source is untouched
    assert_eq!(ids(&vec), [0, 1, 2, 3]);

    drop(vec);
    assert!(alloc.is_balanced());
}

// =============================================================================
// try_assign_from / clone_from
// =============================================================================

#[test]
fn test_clone_from_replaces_contents() {
    let mut target = MiniVec::from_range([7, 8, 9]).expect("Failed to from_range(..)");
    let source = MiniVec::from_range([1, 2]).expect("Failed to from_range(..)");

    target.clone_from(&source);

    assert_eq!(target.as_slice(), &[1, 2]);
    assert_eq!(source.as_slice(), &[1, 2]);
}

#[test]
fn test_try_assign_from_is_all_or_nothing() {
    let ledger = Ledger::new();
    let mut target = MiniVec::from_range([ledger.track(7), ledger.track(8)]).expect("Failed to from_range(..)");
    let source = MiniVec::from_range((0..3).map(|id| ledger.track(id))).expect("Failed to from_range(..)");

    ledger.fail_on_clone(2);

    let result = panic::catch_unwind(AssertUnwindSafe(|| target.try_assign_from(&source)));

    assert!(result.is_err());
    assert_eq!(ids(&target), [7, 8]);
    assert_eq!(ledger.drops(), [0]);
}

#[test]
fn test_try_assign_from_alloc_failure_leaves_target() {
    let alloc = CountingAlloc::new();
    let mut target = MiniVec::from_range_in([7u8, 8], alloc.clone()).expect("Failed to from_range_in(..)");
    let source = MiniVec::from_range_in([1u8, 2, 3], alloc.clone()).expect("Failed to from_range_in(..)");

    alloc.fail_all(true);

    assert!(target.try_assign_from(&source).is_err());
    assert_eq!(target.as_slice(), &[7, 8]);
}

// =============================================================================
// move_assign / take
// =============================================================================

#[test]
fn test_move_assign_transfers_storage() {
    let ledger = Ledger::new();
    let alloc = CountingAlloc::new();
    let mut target = MiniVec::from_range_in([ledger.track(7)], alloc.clone()).expect("Failed to from_range_in(..)");
    let mut source = MiniVec::from_range_in((0..3).map(|id| ledger.track(id)), alloc.clone())
        .expect("Failed to from_range_in(..)");
    let source_ptr = source.as_ptr();

    target.move_assign(&mut source);

    assert_eq!(ids(&target), [0, 1, 2]);
    assert_eq!(target.as_ptr(), source_ptr);
    assert_eq!(target.capacity(), 3);

    assert!(source.is_empty());
    assert_eq!(source.capacity(), 0);

    // The target's previous element and buffer are gone
    assert_eq!(ledger.drops(), [7]);
    assert_eq!(alloc.live_blocks(), 1);
}

#[test]
fn test_take_leaves_empty_but_usable_source() {
    let mut source = MiniVec::from_range([1, 2, 3]).expect("Failed to from_range(..)");

    let moved = source.take();

    assert_eq!(moved.as_slice(), &[1, 2, 3]);
    assert!(source.is_empty());
    assert_eq!(source.capacity(), 0);

    source.push_back(4).expect("Failed to push_back(4)");
    assert_eq!(source.as_slice(), &[4]);
}

// =============================================================================
// assign
// =============================================================================

#[test]
fn test_assign_larger_list_reallocates_exactly() {
    let mut vec = MiniVec::from_range([1, 2]).expect("Failed to from_range(..)");

    vec.assign(&[10, 20, 30, 40, 50]).expect("Failed to assign(..)");

    assert_eq!(vec.as_slice(), &[10, 20, 30, 40, 50]);
    assert_eq!(vec.capacity(), 5);
}

#[test]
fn test_assign_smaller_list_keeps_capacity() {
    let ledger = Ledger::new();
    let mut vec = MiniVec::from_range((0..4).map(|id| ledger.track(id))).expect("Failed to from_range(..)");
    let replacement = [ledger.track(8), ledger.track(9)];

    vec.assign(&replacement).expect("Failed to assign(..)");

    assert_eq!(ids(&vec), [8, 9]);
    assert_eq!(vec.capacity(), 4);
    assert_eq!(ledger.drops(), [0, 1, 2, 3]);
}

#[test]
fn test_assign_failure_leaves_empty_vector() {
    let mut vec = MiniVec::from_range([1, 2, 3]).expect("Failed to from_range(..)");
    vec.change_behaviour(MiniVecBehaviour::FailAtAllocate);

    let result = vec.assign(&[1, 2, 3, 4, 5]);

    assert!(matches!(
        result,
        Err(MiniVecError::AllocFailed { capacity: 5 })
    ));
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 3);
}
