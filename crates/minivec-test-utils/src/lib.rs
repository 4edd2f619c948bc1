// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for minivec.
//!
//! - [`CountingAlloc`]: allocator strategy that counts every request, tracks live bytes
//!   and can be told to refuse requests.
//! - [`Ledger`] and [`Tracked`]: instrumented elements that record their drops and can
//!   be told to fail on the k-th clone.
//!
//! ## License
//!
//! GPL-3.0-only

mod counting;
mod tracked;

pub use counting::CountingAlloc;
pub use tracked::{CloneFailed, Ledger, Tracked};
