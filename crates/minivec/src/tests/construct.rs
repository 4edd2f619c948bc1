// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::panic::{self, AssertUnwindSafe};

use minivec_test_utils::{CountingAlloc, Ledger};

use super::{BuildError, ids};
use crate::{MiniVec, MiniVecError};

#[test]
fn test_new_is_empty() {
    let vec: MiniVec<u8> = MiniVec::new();

    assert_eq!(vec.len(), 0);
    assert_eq!(vec.capacity(), 0);
    assert!(vec.is_empty());
}

#[test]
fn test_default_is_empty() {
    let vec: MiniVec<u8> = MiniVec::default();

    assert_eq!(vec.len(), 0);
    assert_eq!(vec.capacity(), 0);
}

#[test]
fn test_new_in_does_not_allocate() {
    let alloc = CountingAlloc::new();
    let vec = MiniVec::<u64, _>::new_in(alloc.clone());

    assert_eq!(alloc.allocations(), 0);

    drop(vec);
    assert!(alloc.is_balanced());
    assert_eq!(alloc.deallocations(), 0);
}

#[test]
fn test_with_capacity_allocates_exactly() {
    let alloc = CountingAlloc::new();
    let vec = MiniVec::<u64, _>::with_capacity_in(10, alloc.clone())
        .expect("Failed to with_capacity_in(10)");

    assert_eq!(vec.len(), 0);
    assert_eq!(vec.capacity(), 10);
    assert_eq!(alloc.allocations(), 1);
    assert_eq!(alloc.live_bytes(), 80);

    drop(vec);
    assert!(alloc.is_balanced());
}

#[test]
fn test_with_capacity_zero_does_not_allocate() {
    let alloc = CountingAlloc::new();
    let vec = MiniVec::<u64, _>::with_capacity_in(0, alloc.clone())
        .expect("Failed to with_capacity_in(0)");

    assert_eq!(vec.capacity(), 0);
    assert_eq!(alloc.allocations(), 0);
}

#[test]
fn test_with_capacity_overflow() {
    let result = MiniVec::<u64>::with_capacity(usize::MAX);

    assert!(matches!(
        result,
        Err(MiniVecError::CapacityOverflow {
            requested: usize::MAX
        })
    ));
}

#[test]
fn test_with_capacity_alloc_failure() {
    let alloc = CountingAlloc::new();
    alloc.fail_all(true);

    let result = MiniVec::<u64, _>::with_capacity_in(4, alloc.clone());

    assert!(matches!(
        result,
        Err(MiniVecError::AllocFailed { capacity: 4 })
    ));
    assert!(alloc.is_balanced());
}

#[test]
fn test_with_len_default_constructs() {
    let vec = MiniVec::<u32>::with_len(4).expect("Failed to with_len(4)");

    assert_eq!(vec.as_slice(), &[0, 0, 0, 0]);
    assert_eq!(vec.capacity(), 4);
}

#[test]
fn test_from_elem_clones_value() {
    let value = String::from("minivec");
    let vec = MiniVec::from_elem(3, &value).expect("Failed to from_elem(3)");

    assert_eq!(vec.len(), 3);
    assert_eq!(vec.capacity(), 3);
    assert!(vec.iter().all(|item| *item == value));
}

#[test]
fn test_from_range_allocates_distance() {
    let source = [3, 1, 4, 1, 5];
    let vec = MiniVec::from_range(source.iter().cloned()).expect("Failed to from_range(..)");

    assert_eq!(vec.as_slice(), &source);
    assert_eq!(vec.capacity(), 5);
}

#[test]
fn test_from_range_empty_does_not_allocate() {
    let alloc = CountingAlloc::new();
    let vec = MiniVec::from_range_in(core::iter::empty::<u8>(), alloc.clone())
        .expect("Failed to from_range_in(empty)");

    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 0);
    assert_eq!(alloc.allocations(), 0);
}

#[test]
fn test_try_from_fn_builds_in_index_order() {
    let vec = MiniVec::try_from_fn(5, |index| Ok::<_, MiniVecError>(index * 10))
        .expect("Failed to try_from_fn(5)");

    assert_eq!(vec.as_slice(), &[0, 10, 20, 30, 40]);
}

#[test]
fn test_try_from_fn_rolls_back_in_reverse_order() {
    let ledger = Ledger::new();
    let alloc = CountingAlloc::new();

    let result = MiniVec::try_from_fn_in(
        5,
        |index| {
            let id = index as u32;
            if id == 3 {
                Err(BuildError::Refused(id))
            } else {
                Ok(ledger.track(id))
            }
        },
        alloc.clone(),
    );

    assert!(matches!(result, Err(BuildError::Refused(3))));
    assert_eq!(ledger.drops(), [2, 1, 0]);
    assert!(alloc.is_balanced());
}

#[test]
fn test_try_from_fn_reports_alloc_failure() {
    let alloc = CountingAlloc::new();
    alloc.fail_all(true);

    let mut calls = 0;
    let result = MiniVec::try_from_fn_in(
        3,
        |index| {
            calls += 1;
            Ok::<_, BuildError>(index)
        },
        alloc.clone(),
    );

    assert_eq!(
        result.err(),
        Some(BuildError::Vec(MiniVecError::AllocFailed { capacity: 3 }))
    );
    assert_eq!(calls, 0);
}

#[test]
fn test_from_elem_clone_panic_rolls_back() {
    let ledger = Ledger::new();
    let alloc = CountingAlloc::new();
    let prototype = ledger.track(7);

    // Third clone panics: two copies exist at that point
    ledger.fail_on_clone(3);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        MiniVec::from_elem_in(5, &prototype, alloc.clone())
    }));

    assert!(result.is_err());
    assert_eq!(ledger.drops(), [7, 7]);
    assert!(alloc.is_balanced());

    // The prototype is untouched
    assert_eq!(prototype.id(), 7);
}

#[test]
fn test_try_clone_of_tracked_elements() {
    let ledger = Ledger::new();
    let vec = MiniVec::from_range((0..3).map(|id| ledger.track(id))).expect("Failed to from_range(..)");

    let copy = MiniVec::try_from_fn(vec.len(), |index| vec[index].try_clone().map_err(BuildError::from))
        .expect("Failed to try_from_fn(..)");

    assert_eq!(ids(&copy), [0, 1, 2]);
    assert_eq!(ledger.clones(), 3);
}

#[test]
fn test_zero_sized_elements_never_allocate() {
    let alloc = CountingAlloc::new();
    let mut vec = MiniVec::<(), _>::with_capacity_in(100, alloc.clone())
        .expect("Failed to with_capacity_in(100)");

    for _ in 0..250 {
        vec.push_back(()).expect("Failed to push_back(())");
    }

    assert_eq!(vec.len(), 250);
    assert_eq!(vec.capacity(), 400);
    assert_eq!(alloc.allocations(), 0);
}
