//! Slow-path instrumentation.
//!
//! With the `tracing` feature these forward to `tracing::debug!`; without it
//! they expand to nothing. Warm reads are never instrumented.

macro_rules! init_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: "solo::init", $($arg)+);
    };
}

pub(crate) use init_event;
