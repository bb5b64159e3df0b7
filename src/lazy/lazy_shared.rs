use core::fmt;
use core::ops::Deref;

use crate::cell::{DoubleChecked, FailurePolicy, InitState};

/// A single shared instance of `T`, constructed on first access.
///
/// Every caller of [`get_instance`](Self::get_instance), on any thread, gets a
/// reference to the same instance, and `init` runs exactly once no matter how
/// many threads race on the first call.
///
/// ```rust
/// use solo::LazyShared;
/// use std::collections::HashMap;
///
/// static CODES: LazyShared<HashMap<&str, u16>> = LazyShared::new(|| {
///     HashMap::from([("ok", 200), ("not_found", 404)])
/// });
///
/// assert_eq!(CODES.get_instance()["ok"], 200);
/// assert!(std::ptr::eq(CODES.get_instance(), &*CODES));
/// ```
pub struct LazyShared<T, F = fn() -> T> {
    cell: DoubleChecked<T>,
    init: F,
}

impl<T, F> LazyShared<T, F> {
    /// Declares an instance built by `init` on first access.
    ///
    /// A panicking `init` is re-run by the next caller.
    #[inline]
    pub const fn new(init: F) -> Self {
        Self::with_policy(init, FailurePolicy::Retry)
    }

    /// Like [`new`](Self::new) with an explicit failure policy. Under
    /// [`FailurePolicy::Poison`], a panicking `init` makes every later
    /// access panic.
    #[inline]
    pub const fn with_policy(init: F, policy: FailurePolicy) -> Self {
        Self {
            cell: DoubleChecked::with_policy(policy),
            init,
        }
    }

    /// Returns the instance if it has been constructed. Never blocks.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Returns `true` once the instance has been published.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.cell.is_initialized()
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> InitState {
        self.cell.state()
    }

    /// Drops back to the uninitialized state, returning the instance.
    ///
    /// Requires `&mut self`, so no reference handed out earlier can still be
    /// alive. The next access constructs a fresh instance.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.cell.take()
    }
}

impl<T, F: Fn() -> T> LazyShared<T, F> {
    /// Returns the shared instance, constructing it if this is the first
    /// access.
    ///
    /// Warm calls are a single atomic load. Cold calls may block while
    /// another thread runs the constructor, and return that thread's
    /// instance.
    ///
    /// # Panics
    ///
    /// Panics if `init` panics, if the cell was poisoned by an earlier
    /// panicking `init`, or if `init` itself calls `get_instance` on this
    /// same instance.
    #[inline]
    pub fn get_instance(&self) -> &T {
        self.cell.get_or_init(|| (self.init)())
    }
}

impl<T, F: Fn() -> T> Deref for LazyShared<T, F> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.get_instance()
    }
}

impl<T: Default> Default for LazyShared<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for LazyShared<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LazyShared").field(&self.cell).finish()
    }
}
