//! Step-by-step construction of immutable values.
//!
//! Required inputs go to the builder's constructor, optional ones are chained
//! setters with defaults, and a consuming `build()` produces the value.

pub mod computer;

pub use computer::{Computer, ComputerBuilder};
