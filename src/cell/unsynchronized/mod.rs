//! `Unsynchronized` — single-threaded lazy initialization (no heap, no lock).
//!
//! The plain "check for null, then construct" singleton. It is only correct
//! on one thread, so the type is `!Sync`: the compiler refuses to put it in a
//! `static` or share it across threads. Use it inside `thread_local!` or as a
//! field of a single-threaded owner.

mod inner;

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::ptr;

use crate::cell::InstanceCell;
use inner::{Inner, State};

/// A lazily-initialized value for single-threaded use.
pub struct Unsynchronized<T> {
    inner: UnsafeCell<Inner<T>>,
}

impl<T> Unsynchronized<T> {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            inner: UnsafeCell::new(Inner {
                value: MaybeUninit::uninit(),
                state: State::Uninit,
            }),
        }
    }

    /// Whether construction has completed.
    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        // SAFETY: `!Sync`, and no `&mut Inner` outlives a method call.
        unsafe { (*self.inner.get()).state == State::Init }
    }

    /// The instance, if this thread already built it.
    #[inline(always)]
    pub fn get(&self) -> Option<&T> {
        // SAFETY: see `is_initialized`; an initialized value is never moved
        // or overwritten through `&self`.
        unsafe {
            let inner = &*self.inner.get();
            if inner.state == State::Init {
                Some(inner.value.assume_init_ref())
            } else {
                None
            }
        }
    }

    /// The instance, building it with `init` on first use.
    ///
    /// # Panics
    /// If `init` tries to read this same cell (re-entrant initialization).
    /// A panicking `init` leaves the cell empty.
    pub fn get_or_init<F>(&self, init: F) -> &T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get() {
            return value;
        }

        let state = self.inner.get();
        // SAFETY: single-threaded; we only touch `state` through the raw
        // pointer so that a re-entrant `&self` call sees a consistent view.
        unsafe {
            assert!(
                (*state).state != State::Initializing,
                "Unsynchronized instance initialized re-entrantly"
            );
            (*state).state = State::Initializing;
        }

        let reset = ResetOnUnwind(state);
        let value = init();
        core::mem::forget(reset);

        // SAFETY: state is `Initializing`, so nobody else wrote `value`.
        unsafe {
            let inner = &mut *state;
            inner.value.write(value);
            inner.state = State::Init;
            inner.value.assume_init_ref()
        }
    }

    /// Mutable access to a built instance.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let inner = self.inner.get_mut();
        if inner.state == State::Init {
            // SAFETY: initialized, and `&mut self` is exclusive.
            unsafe { Some(inner.value.assume_init_mut()) }
        } else {
            None
        }
    }

    /// Moves the instance out; the next access builds a new one.
    pub fn take(&mut self) -> Option<T> {
        let inner = self.inner.get_mut();
        if inner.state != State::Init {
            return None;
        }
        inner.state = State::Uninit;
        // SAFETY: was initialized; the state change forgets the old copy.
        Some(unsafe { ptr::read(inner.value.as_ptr()) })
    }
}

struct ResetOnUnwind<T>(*mut Inner<T>);

impl<T> Drop for ResetOnUnwind<T> {
    fn drop(&mut self) {
        // SAFETY: only alive while the owning cell is borrowed.
        unsafe { (*self.0).state = State::Uninit };
    }
}

impl<T> Default for Unsynchronized<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Unsynchronized<T> {
    fn drop(&mut self) {
        drop(self.take());
    }
}

impl<T> InstanceCell<T> for Unsynchronized<T> {
    #[inline]
    fn get(&self) -> Option<&T> {
        Unsynchronized::get(self)
    }

    #[inline]
    fn get_or_init<F: FnOnce() -> T>(&self, f: F) -> &T {
        Unsynchronized::get_or_init(self, f)
    }
}
