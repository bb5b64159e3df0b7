//! Concurrency helpers.
//!
//! Important: nothing here is on the warm read path. Once a cell is
//! initialized, readers only perform an atomic load; these primitives only
//! serialize the threads racing to construct the value.

pub mod sync;

pub use sync::RawMutex;
