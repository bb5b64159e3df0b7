//! `Eager` — an instance that exists before anyone asks for it.

use crate::cell::InstanceCell;

/// Holds a value constructed up front.
///
/// In a `static` the value is built at compile time (`const fn new`), so
/// there is no first-access race to win and no state to check.
#[derive(Debug)]
pub struct Eager<T> {
    value: T,
}

impl<T> Eager<T> {
    /// Wraps an already-constructed value.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Returns the instance.
    #[inline]
    pub const fn get_instance(&self) -> &T {
        &self.value
    }

    /// Consumes the wrapper, returning the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> core::ops::Deref for Eager<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> InstanceCell<T> for Eager<T> {
    #[inline]
    fn get(&self) -> Option<&T> {
        Some(&self.value)
    }

    /// Never calls `f`: the value already exists.
    #[inline]
    fn get_or_init<F: FnOnce() -> T>(&self, _f: F) -> &T {
        &self.value
    }
}
