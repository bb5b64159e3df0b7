//! Process-wide lazily-shared instances.
//!
//! [`LazyShared`] and [`TryLazyShared`] bind a [`DoubleChecked`] cell to the
//! constructor that fills it, so the construction inputs are fixed where the
//! instance is declared rather than passed on every access.
//!
//! ## Lifetime of the instance
//!
//! In a `static`, the instance is created on first use and lives until the
//! process exits: Rust never runs destructors for statics, so there is no
//! teardown ordering to get wrong. A non-static `LazyShared` drops its
//! instance with itself, or earlier through [`LazyShared::take`].
//!
//! [`DoubleChecked`]: crate::cell::DoubleChecked

mod lazy_shared;
mod try_lazy_shared;

pub use lazy_shared::LazyShared;
pub use try_lazy_shared::TryLazyShared;
