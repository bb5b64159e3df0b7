use core::fmt;
use core::marker::PhantomData;

use crate::cell::{DoubleChecked, FailurePolicy, InitState};
use crate::error::ConstructionError;

/// A single shared instance of `T` whose constructor can fail.
///
/// The caller whose access ran a failing constructor receives
/// [`ConstructionError::Failed`] with the constructor's error. What later
/// callers see depends on the [`FailurePolicy`]:
///
/// - [`Retry`](FailurePolicy::Retry) (default): the next access runs the
///   constructor again.
/// - [`Poison`](FailurePolicy::Poison): every later access returns
///   [`ConstructionError::Poisoned`] without running it.
///
/// ```rust
/// use solo::{ConstructionError, FailurePolicy, TryLazyShared};
///
/// static PORT: TryLazyShared<u16, std::num::ParseIntError> =
///     TryLazyShared::with_policy(|| "80a".parse::<u16>(), FailurePolicy::Poison);
///
/// assert!(matches!(PORT.get_instance(), Err(ConstructionError::Failed(_))));
/// assert!(matches!(PORT.get_instance(), Err(ConstructionError::Poisoned)));
/// ```
pub struct TryLazyShared<T, E, F = fn() -> Result<T, E>> {
    cell: DoubleChecked<T>,
    init: F,
    _error: PhantomData<fn() -> E>,
}

impl<T, E, F> TryLazyShared<T, E, F> {
    /// Declares an instance built by the fallible `init`, retried after failure.
    #[inline]
    pub const fn new(init: F) -> Self {
        Self::with_policy(init, FailurePolicy::Retry)
    }

    /// Declares an instance with an explicit failure policy.
    #[inline]
    pub const fn with_policy(init: F, policy: FailurePolicy) -> Self {
        Self {
            cell: DoubleChecked::with_policy(policy),
            init,
            _error: PhantomData,
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

    /// The policy applied when `init` fails.
    #[inline]
    pub const fn policy(&self) -> FailurePolicy {
        self.cell.policy()
    }

    /// Resets to uninitialized (clearing poison), returning the instance if any.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.cell.take()
    }
}

impl<T, E, F> TryLazyShared<T, E, F>
where
    F: Fn() -> Result<T, E>,
{
    /// Returns the shared instance, constructing it on first access.
    ///
    /// # Errors
    /// [`ConstructionError::Failed`] if this call ran the constructor and it
    /// failed; [`ConstructionError::Poisoned`] if an earlier attempt failed
    /// under [`FailurePolicy::Poison`].
    ///
    /// # Panics
    /// Panics if the constructor calls `get_instance` on this same instance.
    #[inline]
    pub fn get_instance(&self) -> Result<&T, ConstructionError<E>> {
        self.cell.get_or_try_init(|| (self.init)())
    }
}

impl<T: fmt::Debug, E, F> fmt::Debug for TryLazyShared<T, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TryLazyShared").field(&self.cell).finish()
    }
}
