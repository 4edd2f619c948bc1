// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Returned by [`Tracked::try_clone`] when the ledger is armed to fail.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("Clone failed: element {id} refused to be cloned")]
pub struct CloneFailed {
    /// Id of the element whose clone failed
    pub id: u32,
}

/// Shared record of what happened to a family of [`Tracked`] elements.
#[derive(Debug, Default)]
pub struct Ledger {
    clones: Cell<usize>,
    fail_countdown: Cell<usize>,
    drops: RefCell<Vec<u32>>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Creates an element with `id` recorded in this ledger.
    pub fn track(self: &Rc<Self>, id: u32) -> Tracked {
        Tracked {
            id,
            ledger: Rc::clone(self),
        }
    }

    /// Makes the k-th clone from now fail (1-based). `0` disarms.
    ///
    /// `Clone::clone` panics on failure, [`Tracked::try_clone`] returns an error.
    pub fn fail_on_clone(&self, k: usize) {
        self.fail_countdown.set(k);
    }

    /// Number of successful clones.
    pub fn clones(&self) -> usize {
        self.clones.get()
    }

    /// Ids of the dropped elements, in drop order.
    pub fn drops(&self) -> Vec<u32> {
        self.drops.borrow().clone()
    }

    /// Number of dropped elements.
    pub fn drop_count(&self) -> usize {
        self.drops.borrow().len()
    }

    /// Forgets the drops recorded so far.
    pub fn clear_drops(&self) {
        self.drops.borrow_mut().clear();
    }

    fn register_clone(&self) -> bool {
        match self.fail_countdown.get() {
            0 => {}
            1 => {
                self.fail_countdown.set(0);
                return false;
            }
            n => self.fail_countdown.set(n - 1),
        }

        self.clones.set(self.clones.get() + 1);
        true
    }
}

/// Instrumented element: records its id in the ledger when dropped.
///
/// # Example
///
/// ```rust
/// use minivec_test_utils::Ledger;
///
/// let ledger = Ledger::new();
/// let first = ledger.track(1);
///
/// ledger.fail_on_clone(2);
/// let copy = first.try_clone().unwrap();
/// assert!(first.try_clone().is_err());
///
/// drop(copy);
/// drop(first);
/// assert_eq!(ledger.drops(), [1, 1]);
/// ```
pub struct Tracked {
    id: u32,
    ledger: Rc<Ledger>,
}

impl Tracked {
    /// Returns the id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Clones the element unless the ledger is armed to fail on this clone.
    ///
    /// # Errors
    ///
    /// Returns [`CloneFailed`] when the armed clone is reached.
    pub fn try_clone(&self) -> Result<Self, CloneFailed> {
        if !self.ledger.register_clone() {
            return Err(CloneFailed { id: self.id });
        }

        Ok(Self {
            id: self.id,
            ledger: Rc::clone(&self.ledger),
        })
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.drops.borrow_mut().push(self.id);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.id).finish()
    }
}
