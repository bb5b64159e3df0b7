//! Blocking primitives used on the initialization slow path.

mod raw_mutex;
mod wait_queue;

pub use raw_mutex::{RawMutex, RawMutexGuard};
