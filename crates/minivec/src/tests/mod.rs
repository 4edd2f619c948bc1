// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

mod assign;
mod construct;

use minivec_test_utils::{CloneFailed, Tracked};

use crate::MiniVecError;

/// Error type for the fallible constructors under test.
#[derive(Debug, PartialEq)]
pub(crate) enum BuildError {
    Refused(u32),
    Vec(MiniVecError),
}

impl From<MiniVecError> for BuildError {
    fn from(err: MiniVecError) -> Self {
        Self::Vec(err)
    }
}

impl From<CloneFailed> for BuildError {
    fn from(err: CloneFailed) -> Self {
        Self::Refused(err.id)
    }
}

pub(crate) fn ids<'a>(values: impl IntoIterator<Item = &'a Tracked>) -> Vec<u32> {
    values.into_iter().map(|value| value.id()).collect()
}
