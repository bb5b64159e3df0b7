//! `OnceLocked` — lazy initialization on top of `std::sync::OnceLock`.

use std::sync::OnceLock;

use crate::cell::InstanceCell;

/// A thread-safe lazy cell that delegates to the standard library's run-once
/// primitive.
///
/// `OnceLock` already guarantees exactly-once construction and safe
/// publication, so this is the strategy to reach for when the constructor is
/// infallible. It cannot express a fallible constructor on stable Rust, which
/// is what [`DoubleChecked`](crate::cell::DoubleChecked) is for.
#[derive(Debug)]
pub struct OnceLocked<T> {
    inner: OnceLock<T>,
}

impl<T> OnceLocked<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self { inner: OnceLock::new() }
    }

    /// Whether some call has already stored the instance.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.inner.get().is_some()
    }

    /// The stored instance, or `None` while the cell is still empty. Never
    /// blocks.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.inner.get()
    }

    /// The stored instance. The first caller runs `f`; callers that arrive
    /// while it runs block until it stores the result.
    ///
    /// A panicking `f` leaves the cell empty and the next caller tries again.
    /// Unlike [`DoubleChecked`](crate::cell::DoubleChecked) there is no
    /// poison option, and re-entrant use is left to `OnceLock`, which may
    /// deadlock or panic.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.inner.get_or_init(f)
    }

    /// Mutable access to the stored instance, for owners holding the cell
    /// exclusively.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.inner.get_mut()
    }

    /// Empties the cell and hands back whatever it held. The next
    /// [`get_or_init`](Self::get_or_init) constructs anew.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.inner.take()
    }

    /// Unwraps the cell into its instance, or `None` if it was never filled.
    #[inline]
    pub fn into_inner(self) -> Option<T> {
        self.inner.into_inner()
    }
}

impl<T> Default for OnceLocked<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InstanceCell<T> for OnceLocked<T> {
    #[inline]
    fn get(&self) -> Option<&T> {
        self.inner.get()
    }

    #[inline]
    fn get_or_init<F: FnOnce() -> T>(&self, f: F) -> &T {
        self.inner.get_or_init(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_locked_get_or_init() {
        let cell = OnceLocked::new();
        assert_eq!(cell.get(), None);
        assert_eq!(*cell.get_or_init(|| 42), 42);
        assert_eq!(*cell.get_or_init(|| 100), 42);
        assert!(cell.is_initialized());
    }

    #[test]
    fn test_once_locked_mut_and_take() {
        let mut cell = OnceLocked::new();
        cell.get_or_init(|| 42);
        if let Some(v) = cell.get_mut() {
            *v += 1;
        }
        assert_eq!(cell.take(), Some(43));
        assert!(!cell.is_initialized());
    }
}
