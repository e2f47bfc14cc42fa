// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cell::Cell;
use core::fmt;

/// A lazily filled slot for a derived value.
///
/// The slot is either empty (dirty) or holds a value that its owner keeps
/// consistent with the inputs it was derived from. Owners call
/// [`CacheSlot::invalidate`] from every mutator that touches those inputs.
///
/// Reads only need `&self`, so derived values can be memoized from getters.
pub struct CacheSlot<T: Copy> {
    value: Cell<Option<T>>,
}

impl<T: Copy> CacheSlot<T> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            value: Cell::new(None),
        }
    }

    /// Returns the cached value, if any.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.value.get()
    }

    /// Returns `true` if the slot currently holds a value.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.value.get().is_some()
    }

    /// Empties the slot.
    pub fn invalidate(&mut self) {
        self.value.set(None);
    }

    /// Returns the cached value, computing and storing it first if the slot is empty.
    pub fn get_or_insert_with(&self, compute: impl FnOnce() -> T) -> T {
        if let Some(value) = self.value.get() {
            return value;
        }
        let value = compute();
        self.value.set(Some(value));
        value
    }

    /// Like [`CacheSlot::get_or_insert_with`], for computations that can fail.
    ///
    /// On error the slot stays empty and the error is returned.
    pub fn get_or_try_insert_with<E>(
        &self,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        let value = compute()?;
        self.value.set(Some(value));
        Ok(value)
    }
}

impl<T: Copy> Default for CacheSlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Copy> Clone for CacheSlot<T> {
    fn clone(&self) -> Self {
        Self {
            value: Cell::new(self.value.get()),
        }
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for CacheSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSlot")
            .field("value", &self.value.get())
            .finish()
    }
}
