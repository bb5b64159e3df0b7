//! # `solo` - Exactly-Once Shared Instances
//!
//! Lazily-constructed, process-wide instances that are safe to reach from any
//! number of threads, plus the neighbouring creational patterns.
//!
//! ## Guarantees
//!
//! For [`LazyShared`] and the thread-safe cells in [`cell`]:
//!
//! - **Safety**: the constructor runs at most once per successful
//!   construction, however many threads race on first access, and every
//!   caller observes the same instance.
//! - **Liveness**: a call only blocks while another thread is running the
//!   constructor, and returns once it finishes. A constructor that reaches
//!   back into its own cell panics rather than deadlocking.
//! - **Ordering**: the instance is published with `Release` and read with
//!   `Acquire`, so no caller can observe a partially-constructed value.
//!
//! ## Architecture
//!
//! 1. **Cells** ([`cell`]): one type per strategy. [`DoubleChecked`],
//!    [`Locked`], [`OnceLocked`], [`Eager`] and [`Unsynchronized`] all
//!    implement [`InstanceCell`].
//! 2. **Shared instances** ([`lazy`]): [`LazyShared`] / [`TryLazyShared`]
//!    pair a [`DoubleChecked`] cell with the constructor that fills it.
//! 3. **Declaration** ([`singleton!`]): statics and `Type::instance()`
//!    accessors in one line.
//! 4. **Builders** ([`builder`]): consuming builders for immutable values.
//! 5. **Factories** ([`factory`]): families of related objects behind one
//!    trait.
//!
//! ## Failure policy
//!
//! A failed construction either reverts the cell so the next caller retries
//! ([`FailurePolicy::Retry`], the default) or poisons it for good
//! ([`FailurePolicy::Poison`]). The policy applies equally to constructors
//! that return an error and constructors that panic.
//!
//! ## Example
//!
//! ```rust
//! use solo::LazyShared;
//! use std::thread;
//!
//! static SETTINGS: LazyShared<Vec<String>> = LazyShared::new(|| {
//!     vec!["verbose".to_owned(), "color".to_owned()]
//! });
//!
//! let addrs: Vec<usize> = thread::scope(|s| {
//!     let handles: Vec<_> = (0..4)
//!         .map(|_| s.spawn(|| SETTINGS.get_instance() as *const _ as usize))
//!         .collect();
//!     handles.into_iter().map(|h| h.join().unwrap()).collect()
//! });
//!
//! assert!(addrs.windows(2).all(|w| w[0] == w[1]));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod macros;
mod trace;

pub mod builder;
pub mod cell;
pub mod concurrency;
pub mod error;
pub mod factory;
pub mod lazy;

pub use builder::{Computer, ComputerBuilder};
pub use cell::{DoubleChecked, Eager, FailurePolicy, InitState, InstanceCell, Locked, OnceLocked, Unsynchronized};
pub use error::ConstructionError;
pub use lazy::{LazyShared, TryLazyShared};

// Compile-time assertions for layout and auto-trait claims.
const _: () = {
    use core::mem;

    // The value lives behind one pointer; the rest is the lock, the owner
    // token and two state bytes. Loose bound, catches accidental growth.
    assert!(mem::size_of::<DoubleChecked<u64>>() <= mem::size_of::<usize>() * 7);
    // Eager adds nothing around its value.
    assert!(mem::size_of::<Eager<u64>>() == mem::size_of::<u64>());
    // A fn-pointer LazyShared fits in a handful of words too.
    assert!(mem::size_of::<LazyShared<u64>>() <= mem::size_of::<usize>() * 9);
};

const _: () = {
    const fn assert_sync<T: Sync>() {}
    assert_sync::<DoubleChecked<String>>();
    assert_sync::<Locked<String>>();
    assert_sync::<OnceLocked<String>>();
    assert_sync::<LazyShared<String>>();
    assert_sync::<TryLazyShared<String, std::io::Error>>();
};
