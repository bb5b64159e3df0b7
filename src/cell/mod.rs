//! Cells that hold at most one instance of a value.
//!
//! Each type is one strategy for the "construct once, share forever" problem:
//!
//! | type               | first access                 | warm access      | shareable |
//! |--------------------|------------------------------|------------------|-----------|
//! | [`Eager`]          | already built                | plain reference  | yes       |
//! | [`Unsynchronized`] | construct in place           | state check      | no        |
//! | [`Locked`]         | lock, construct              | lock             | yes       |
//! | [`DoubleChecked`]  | lock, re-check, construct    | one acquire load | yes       |
//! | [`OnceLocked`]     | `std::sync::OnceLock`        | one acquire load | yes       |
//!
//! None of them implement `Clone`: the instance is reachable only by
//! reference through its cell.

pub mod double_checked;
pub mod eager;
pub mod locked;
pub mod once_locked;
pub mod state;
pub mod unsynchronized;

pub use double_checked::DoubleChecked;
pub use eager::Eager;
pub use locked::Locked;
pub use once_locked::OnceLocked;
pub use state::{FailurePolicy, InitState};
pub use unsynchronized::Unsynchronized;

/// Common surface of the lazy-instance strategies.
///
/// Lets code (and tests, and benchmarks) stay generic over how the instance
/// is guarded. Construction itself stays an inherent `const fn new` on each
/// type so the cells can live in `static`s.
pub trait InstanceCell<T> {
    /// Returns the instance if it exists. Never constructs.
    fn get(&self) -> Option<&T>;

    /// Returns the instance, running `f` to construct it if it does not
    /// exist yet. `f` runs at most once per successful construction.
    fn get_or_init<F: FnOnce() -> T>(&self, f: F) -> &T;

    /// Returns `true` if the instance exists.
    #[inline]
    fn is_initialized(&self) -> bool {
        self.get().is_some()
    }
}
