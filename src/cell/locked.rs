//! `Locked` — lazy initialization that takes the lock on every access.
//!
//! Simple and obviously correct, but every reader serializes on the mutex even
//! after the value exists. Kept as the baseline that [`DoubleChecked`] beats.
//!
//! [`DoubleChecked`]: crate::cell::DoubleChecked

use core::cell::UnsafeCell;
use core::fmt;

use crate::cell::InstanceCell;
use crate::concurrency::sync::RawMutex;
use crate::trace::init_event;

/// A thread-safe lazy cell guarded by a mutex on every call.
pub struct Locked<T> {
    value: UnsafeCell<Option<T>>,
    lock: RawMutex,
}

impl<T> Locked<T> {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            value: UnsafeCell::new(None),
            lock: RawMutex::new(),
        }
    }

    /// Returns the value if initialized. Takes the lock.
    pub fn get(&self) -> Option<&T> {
        let _guard = self.lock.lock();
        // SAFETY: the slot is only written under the lock, and only while it
        // is `None`, so an existing `Some` is never moved or overwritten.
        unsafe { (*self.value.get()).as_ref() }
    }

    /// Returns the value, constructing it under the lock if needed.
    ///
    /// A panicking `f` leaves the cell empty; the next caller retries.
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        let _guard = self.lock.lock();
        // SAFETY: lock held, see `get`.
        let slot = unsafe { &mut *self.value.get() };
        if slot.is_none() {
            init_event!(type_name = core::any::type_name::<T>(), "constructing instance under lock");
            *slot = Some(f());
        }
        match slot {
            Some(value) => value,
            None => unreachable!("slot filled above"),
        }
    }

    /// Returns `true` if the value has been constructed.
    pub fn is_initialized(&self) -> bool {
        self.get().is_some()
    }

    /// Takes the value out, leaving the cell empty.
    pub fn take(&mut self) -> Option<T> {
        self.value.get_mut().take()
    }

    /// Consumes the cell, returning the value if any.
    pub fn into_inner(self) -> Option<T> {
        self.value.into_inner()
    }
}

impl<T> Default for Locked<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Locked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locked").field("value", &self.get()).finish()
    }
}

impl<T> InstanceCell<T> for Locked<T> {
    fn get(&self) -> Option<&T> {
        Locked::get(self)
    }

    fn get_or_init<F: FnOnce() -> T>(&self, f: F) -> &T {
        Locked::get_or_init(self, f)
    }
}

// SAFETY: access to the slot is serialized by `lock`; `T` is constructed on
// one thread and then shared by reference.
unsafe impl<T: Send + Sync> Sync for Locked<T> {}
unsafe impl<T: Send> Send for Locked<T> {}
