// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Contiguous growable array with explicit storage phases and random-access cursors.
//!
//! `MiniVec<T, A>` owns one contiguous buffer obtained from a replaceable
//! [`Allocator`](allocator_api2::alloc::Allocator). Allocating raw slots, constructing
//! values into them, destroying values and releasing slots are kept as separate steps,
//! which is what lets every bulk operation roll back precisely.
//!
//! # Core Guarantees
//!
//! - **Amortized growth**: appends double the capacity (`0 → 1 → 2 → 4 → ...`).
//! - **Strong relocation**: `reserve()` and `shrink_to_fit()` either succeed or leave the
//!   vector untouched. Relocation is a bitwise move, so only the allocator can fail.
//! - **Scoped rollback**: if building an element fails halfway through a bulk operation
//!   (an `Err` from a fallible constructor or a panic from `Clone`/`Default`), exactly the
//!   elements built so far are dropped in reverse order and no storage leaks.
//! - **Fallible operations**: everything that may allocate returns
//!   `Result<_, MiniVecError>` instead of aborting.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use minivec::{MiniVec, MiniVecError};
//!
//! fn example() -> Result<(), MiniVecError> {
//!     let mut vec = MiniVec::new();
//!     for value in [10, 30, 20, 40] {
//!         vec.push_back(value)?;
//!     }
//!
//!     vec.insert(2, 99)?;
//!     assert_eq!(vec.as_slice(), &[10, 30, 99, 20, 40]);
//!
//!     vec.erase(3);
//!     vec.erase_range(1..3);
//!     assert_eq!(vec.as_slice(), &[10, 40]);
//!
//!     vec.resize(5, -1)?;
//!     assert_eq!(vec.as_slice(), &[10, 40, -1, -1, -1]);
//!
//!     // Slice algorithms work directly on the live elements.
//!     vec.sort();
//!     assert_eq!(vec.as_slice(), &[-1, -1, -1, 10, 40]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Cursors
//!
//! ```rust
//! use minivec::{MiniVec, MiniVecError};
//!
//! fn example() -> Result<(), MiniVecError> {
//!     let mut vec = MiniVec::from_range([1, 2, 4])?;
//!
//!     let begin = vec.begin();
//!     let end = vec.end();
//!     assert_eq!(end - begin, 3);
//!     assert_eq!(*(begin + 2), 4);
//!
//!     // Mutable cursors insert and erase in place.
//!     let cursor = vec.begin_mut() + 2;
//!     let cursor = cursor.insert(3)?;
//!     assert_eq!(cursor.index(), 2);
//!     assert_eq!(vec.as_slice(), &[1, 2, 3, 4]);
//!
//!     let reversed: Vec<i32> = vec.rbegin().copied().collect();
//!     assert_eq!(reversed, [4, 3, 2, 1]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test_utils` feature to inject allocation failures:
//!
//! ```toml
//! [dev-dependencies]
//! minivec = { version = "*", features = ["test_utils"] }
//! ```
//!
//! Then use [`MiniVecBehaviour`] to drive the error paths of your own code:
//!
//! ```rust
//! // test_utils feature required in dev-dependencies
//! #[cfg(test)]
//! mod tests {
//!     use minivec::{MiniVec, MiniVecBehaviour};
//!
//!     #[test]
//!     fn test_handles_growth_failure() {
//!         let mut vec = MiniVec::new();
//!         vec.change_behaviour(MiniVecBehaviour::FailAtAllocate);
//!
//!         assert!(vec.push_back(1u8).is_err());
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(any(test, feature = "test_utils"))]
mod behaviour;
mod cursor;
mod error;
mod guard;
mod into_iter;
mod mini_vec;
mod raw;

#[cfg(test)]
mod tests;

pub use allocator_api2::alloc::{Allocator, Global};

pub use cursor::{Cursor, CursorMut, Position, Rev};
pub use error::MiniVecError;
pub use into_iter::IntoIter;
pub use mini_vec::MiniVec;

#[cfg(any(test, feature = "test_utils"))]
pub use behaviour::MiniVecBehaviour;
