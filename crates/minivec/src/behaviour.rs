// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Test behaviour for injecting allocation failures into `MiniVec` operations.
///
/// This is only available with the `test_utils` feature and allows users
/// to test error handling paths in their code by injecting failures.
///
/// Every buffer request made by an existing vector (growth, `reserve`,
/// `shrink_to_fit`, `assign`) consults the behaviour before reaching the allocator.
/// Releasing storage never fails.
///
/// # Example
///
/// ```rust
/// // test_utils feature required in dev-dependencies
/// #[cfg(test)]
/// mod tests {
///     use minivec::{MiniVec, MiniVecBehaviour, MiniVecError};
///
///     #[test]
///     fn test_handles_reserve_failure() -> Result<(), MiniVecError> {
///         let mut vec = MiniVec::<u8>::new();
///
///         // Second buffer request fails, first one succeeds
///         vec.change_behaviour(MiniVecBehaviour::FailOnNthAllocation(2));
///         vec.reserve(4)?;
///         assert!(vec.reserve(8).is_err());
///
///         // The behaviour resets itself after firing
///         vec.reserve(8)?;
///         Ok(())
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MiniVecBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every buffer request fails with `AllocFailed` until the behaviour is changed.
    FailAtAllocate,
    /// The n-th buffer request from now fails (1-based), then the behaviour
    /// resets to [`MiniVecBehaviour::None`].
    FailOnNthAllocation(usize),
}

impl MiniVecBehaviour {
    /// Consumes one buffer request and reports whether it must fail.
    pub(crate) fn should_fail(&mut self) -> bool {
        match *self {
            Self::None => false,
            Self::FailAtAllocate => true,
            Self::FailOnNthAllocation(n) if n <= 1 => {
                *self = Self::None;
                true
            }
            Self::FailOnNthAllocation(n) => {
                *self = Self::FailOnNthAllocation(n - 1);
                false
            }
        }
    }
}
