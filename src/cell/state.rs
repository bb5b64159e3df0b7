//! Lifecycle state shared by the thread-safe cells.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Observable lifecycle of a lazily-initialized instance.
///
/// ```text
/// Uninit --lock+recheck--> Initializing --ok--> Init (terminal)
///                               |
///                               +--err/panic--> Uninit    (FailurePolicy::Retry)
///                               +--err/panic--> Poisoned  (FailurePolicy::Poison, terminal)
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum InitState {
    /// No instance exists and nobody is constructing one.
    Uninit = 0,
    /// A thread holds the init lock and is running the constructor.
    Initializing = 1,
    /// The instance is published.
    Init = 2,
    /// Construction failed under [`FailurePolicy::Poison`].
    Poisoned = 3,
}

impl InitState {
    #[inline]
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Uninit,
            1 => Self::Initializing,
            2 => Self::Init,
            _ => Self::Poisoned,
        }
    }
}

impl fmt::Display for InitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninit => "uninitialized",
            Self::Initializing => "initializing",
            Self::Init => "initialized",
            Self::Poisoned => "poisoned",
        })
    }
}

/// What happens to a cell when its constructor fails or panics.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Revert to [`InitState::Uninit`]; the next caller runs the constructor again.
    #[default]
    Retry,
    /// Move to [`InitState::Poisoned`]; every later call fails without retrying.
    Poison,
}

impl FailurePolicy {
    /// The state a failed construction leaves behind.
    #[inline]
    pub const fn after_failure(self) -> InitState {
        match self {
            Self::Retry => InitState::Uninit,
            Self::Poison => InitState::Poisoned,
        }
    }
}

/// Atomic holder for an [`InitState`].
///
/// Only written under the cell's init lock; read without it for diagnostics.
/// The published pointer, not this byte, is what readers synchronize on.
pub(crate) struct AtomicState(AtomicU8);

impl AtomicState {
    pub(crate) const fn new(state: InitState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    #[inline]
    pub(crate) fn load(&self) -> InitState {
        InitState::from_u8(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn store(&self, state: InitState) {
        self.0.store(state as u8, Ordering::Release);
    }

    #[inline]
    pub(crate) fn set_mut(&mut self, state: InitState) {
        *self.0.get_mut() = state as u8;
    }
}
