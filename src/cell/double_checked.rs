//! `DoubleChecked` — a thread-safe once-cell using double-checked locking.
//!
//! The value lives in a heap box whose pointer is the only thing readers look
//! at:
//!
//! - **fast path**: `ptr.load(Acquire)`; non-null means done, no lock taken.
//! - **slow path**: take the [`RawMutex`], re-check the pointer (another
//!   thread may have won while we were waiting), run the constructor, then
//!   `ptr.store(Release)`.
//!
//! The `Release` store pairs with the fast-path `Acquire` load, so a reader
//! that sees the pointer also sees every write the constructor made.
//!
//! The lock is not reentrant, so the constructing thread's token is kept in
//! `owner` while its constructor runs. A constructor that reaches back into
//! its own cell panics instead of parking on a lock it already holds.

use core::fmt;
use core::marker::PhantomData;
use core::ptr;
use core::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

use crate::cell::state::{AtomicState, FailurePolicy, InitState};
use crate::cell::InstanceCell;
use crate::concurrency::sync::RawMutex;
use crate::error::ConstructionError;
use crate::trace::init_event;

/// A thread-safe cell constructed at most once, on first use.
pub struct DoubleChecked<T> {
    ptr: AtomicPtr<T>,
    state: AtomicState,
    lock: RawMutex,
    /// Token of the thread running the constructor, `0` when none is.
    owner: AtomicUsize,
    policy: FailurePolicy,
    _owns: PhantomData<Box<T>>,
}

impl<T> DoubleChecked<T> {
    /// Creates an empty cell that permits retry after a failed construction.
    #[inline]
    pub const fn new() -> Self {
        Self::with_policy(FailurePolicy::Retry)
    }

    /// Creates an empty cell with an explicit failure policy.
    #[inline]
    pub const fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            ptr: AtomicPtr::new(ptr::null_mut()),
            state: AtomicState::new(InitState::Uninit),
            lock: RawMutex::new(),
            owner: AtomicUsize::new(0),
            policy,
            _owns: PhantomData,
        }
    }

    /// The failure policy this cell was created with.
    #[inline]
    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Current lifecycle state. Advisory while other threads are initializing.
    #[inline]
    pub fn state(&self) -> InitState {
        if self.is_initialized() {
            InitState::Init
        } else {
            self.state.load()
        }
    }

    /// Returns `true` once the value has been published.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        !self.ptr.load(Ordering::Acquire).is_null()
    }

    /// Returns the value if it has been published. Never blocks.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        let p = self.ptr.load(Ordering::Acquire);
        // SAFETY: a non-null pointer was published with Release after the box
        // was fully written, and it stays valid until `&mut self` access.
        unsafe { p.as_ref() }
    }

    /// Returns the value, running `f` to construct it if nobody has yet.
    ///
    /// # Panics
    ///
    /// If `f` panics the panic propagates and the cell follows its
    /// [`FailurePolicy`]; a later call on a poisoned cell panics too.
    /// Calling back into the same cell from inside `f` panics with
    /// "instance initialized re-entrantly".
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        match self.get_or_try_init(|| Ok::<T, core::convert::Infallible>(f())) {
            Ok(value) => value,
            Err(ConstructionError::Poisoned) => panic!("DoubleChecked instance is poisoned"),
            Err(ConstructionError::Failed(never)) => match never {},
        }
    }

    /// Returns the value, running the fallible `f` to construct it if needed.
    ///
    /// Only the caller whose `f` ran sees [`ConstructionError::Failed`]; on a
    /// poisoned cell every caller sees [`ConstructionError::Poisoned`].
    ///
    /// # Panics
    ///
    /// Panics if `f` calls back into this cell on the thread running it.
    #[inline]
    pub fn get_or_try_init<F, E>(&self, f: F) -> Result<&T, ConstructionError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.get() {
            return Ok(value);
        }
        self.init_slow(f)
    }

    #[cold]
    fn init_slow<F, E>(&self, f: F) -> Result<&T, ConstructionError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        // Only this thread can have stored its own token, so a match means
        // we are inside our own constructor and already hold the lock.
        let me = current_thread_token();
        if self.owner.load(Ordering::Relaxed) == me {
            panic!("instance initialized re-entrantly");
        }

        let _guard = self.lock.lock();

        // Second check: someone may have published while we were queued.
        // The lock's Acquire already orders this, the load just has to see it.
        let p = self.ptr.load(Ordering::Relaxed);
        if !p.is_null() {
            // SAFETY: see `get`.
            return Ok(unsafe { &*p });
        }
        if self.state.load() == InitState::Poisoned {
            return Err(ConstructionError::Poisoned);
        }

        self.state.store(InitState::Initializing);
        self.owner.store(me, Ordering::Relaxed);
        init_event!(type_name = core::any::type_name::<T>(), "constructing instance");

        let attempt = Attempt { cell: self, committed: false };
        match f() {
            Ok(value) => {
                let raw = Box::into_raw(Box::new(value));
                self.ptr.store(raw, Ordering::Release);
                attempt.commit();
                init_event!(type_name = core::any::type_name::<T>(), "instance published");
                // SAFETY: we just published `raw`.
                Ok(unsafe { &*raw })
            }
            Err(e) => {
                // `attempt` drops here and applies the failure policy.
                drop(attempt);
                Err(ConstructionError::Failed(e))
            }
        }
    }

    /// Returns a mutable reference to the value, if published.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        // SAFETY: `&mut self` excludes every other reference into the box.
        unsafe { self.ptr.get_mut().as_mut() }
    }

    /// Removes the published instance and resets the cell to `Uninit`.
    ///
    /// This is the explicit teardown point for an owned cell, and it also
    /// clears a poisoned state.
    pub fn take(&mut self) -> Option<T> {
        self.state.set_mut(InitState::Uninit);
        let p = core::mem::replace(self.ptr.get_mut(), ptr::null_mut());
        if p.is_null() {
            None
        } else {
            // SAFETY: `p` came from `Box::into_raw` and `&mut self` means no
            // outstanding borrows.
            Some(*unsafe { Box::from_raw(p) })
        }
    }

    /// Consumes the cell, returning the value if one was published.
    #[inline]
    pub fn into_inner(mut self) -> Option<T> {
        self.take()
    }
}

/// Settles the state of an in-flight construction.
///
/// Dropped without `commit` means the constructor returned an error or
/// unwound; either way the cell's policy decides the next state.
struct Attempt<'a, T> {
    cell: &'a DoubleChecked<T>,
    committed: bool,
}

impl<T> Attempt<'_, T> {
    fn commit(mut self) {
        self.committed = true;
        self.cell.owner.store(0, Ordering::Relaxed);
        self.cell.state.store(InitState::Init);
    }
}

impl<T> Drop for Attempt<'_, T> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        self.cell.owner.store(0, Ordering::Relaxed);
        let next = self.cell.policy.after_failure();
        self.cell.state.store(next);
        init_event!(
            type_name = core::any::type_name::<T>(),
            next_state = %next,
            "construction failed"
        );
    }
}

/// A per-thread token, never `0`.
fn current_thread_token() -> usize {
    static NEXT: AtomicUsize = AtomicUsize::new(1);
    thread_local! {
        static TOKEN: usize = NEXT.fetch_add(1, Ordering::Relaxed);
    }
    TOKEN.with(|t| *t)
}

impl<T> Default for DoubleChecked<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DoubleChecked<T> {
    fn drop(&mut self) {
        drop(self.take());
    }
}

impl<T: fmt::Debug> fmt::Debug for DoubleChecked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("DoubleChecked");
        match self.get() {
            Some(v) => d.field("value", v),
            None => d.field("state", &self.state()),
        };
        d.field("policy", &self.policy).finish()
    }
}

impl<T> InstanceCell<T> for DoubleChecked<T> {
    #[inline]
    fn get(&self) -> Option<&T> {
        DoubleChecked::get(self)
    }

    #[inline]
    fn get_or_init<F: FnOnce() -> T>(&self, f: F) -> &T {
        DoubleChecked::get_or_init(self, f)
    }
}

// SAFETY: one thread constructs `T` and others read it through `&T`, so `T`
// must be both `Send` and `Sync` for the cell to be shared.
unsafe impl<T: Send + Sync> Sync for DoubleChecked<T> {}
// Send comes from `PhantomData<Box<T>>`: the cell owns its `T`.
