// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for minivec.

use thiserror::Error;

/// Error type for `MiniVec` operations.
///
/// Whenever one of these is returned from a mutating operation, the operation has
/// already been unwound: elements it built were dropped and storage it obtained was
/// released.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum MiniVecError {
    /// Checked access at an index that does not hold a live element.
    #[error("Index out of range: index {index} is not below length {length}")]
    OutOfRange {
        /// Index that was accessed
        index: usize,
        /// Length of the vector at the time of access
        length: usize,
    },

    /// The allocator could not provide the requested storage.
    #[error("Allocation failed: could not obtain storage for {capacity} elements")]
    AllocFailed {
        /// Number of slots that were requested
        capacity: usize,
    },

    /// The requested number of slots cannot be described by a memory layout.
    ///
    /// Raised when `capacity * size_of::<T>()` would exceed `isize::MAX`, or when
    /// doubling the capacity overflows `usize`.
    #[error("Capacity overflow: {requested} elements exceed the addressable size")]
    CapacityOverflow {
        /// Number of slots that were requested
        requested: usize,
    },
}
