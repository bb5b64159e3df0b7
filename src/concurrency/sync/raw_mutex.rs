use std::ptr::NonNull;
use std::sync::atomic::{AtomicU8, Ordering};

use crossbeam_utils::Backoff;

use super::wait_queue::{WaitNode, WaitQueue};

/// A data-less blocking mutex: spin briefly, then park on a FIFO wait queue.
///
/// This is the exclusive lock behind the slow path of the lazy cells. It
/// guards no data of its own; the cells pair it with their own storage.
///
/// # States
/// - 0: Unlocked
/// - 1: Locked, no waiters
/// - 2: Locked, waiters may be parked (unlock must take the slow path)
pub struct RawMutex {
    state: AtomicU8,
    queue: WaitQueue,
}

impl RawMutex {
    const UNLOCKED: u8 = 0;
    const LOCKED: u8 = 1;
    const CONTENDED: u8 = 2;

    /// Creates an unlocked mutex.
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(Self::UNLOCKED),
            queue: WaitQueue::new(),
        }
    }

    /// Acquires the mutex, blocking the current thread until it is available.
    #[inline]
    pub fn lock(&self) -> RawMutexGuard<'_> {
        if self
            .state
            .compare_exchange(Self::UNLOCKED, Self::LOCKED, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            return RawMutexGuard { mutex: self };
        }
        self.lock_slow()
    }

    /// Locks only if nobody holds the lock right now; never parks.
    #[inline]
    pub fn try_lock(&self) -> Option<RawMutexGuard<'_>> {
        self.state
            .compare_exchange(Self::UNLOCKED, Self::LOCKED, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| RawMutexGuard { mutex: self })
    }

    /// Returns `true` if some thread currently holds the mutex.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.state.load(Ordering::Relaxed) != Self::UNLOCKED
    }

    // Anyone who reaches the slow path acquires in the CONTENDED state, so a
    // thread that was woken from the queue always hands off to the next
    // waiter when it unlocks.
    #[cold]
    fn lock_slow(&self) -> RawMutexGuard<'_> {
        loop {
            let backoff = Backoff::new();
            while !backoff.is_completed() {
                if self
                    .state
                    .compare_exchange(Self::UNLOCKED, Self::CONTENDED, Ordering::Acquire, Ordering::Relaxed)
                    .is_ok()
                {
                    return RawMutexGuard { mutex: self };
                }
                backoff.snooze();
            }

            let node = WaitNode::new();
            self.queue.lock();

            let mut state = self.state.load(Ordering::Relaxed);
            loop {
                match state {
                    Self::UNLOCKED => {
                        match self.state.compare_exchange(
                            Self::UNLOCKED,
                            Self::CONTENDED,
                            Ordering::Acquire,
                            Ordering::Relaxed,
                        ) {
                            Ok(_) => {
                                self.queue.unlock();
                                return RawMutexGuard { mutex: self };
                            }
                            Err(current) => state = current,
                        }
                    }
                    // A fast-path unlock may race with us, so only upgrade a
                    // state we have actually observed.
                    Self::LOCKED => {
                        match self.state.compare_exchange(
                            Self::LOCKED,
                            Self::CONTENDED,
                            Ordering::Relaxed,
                            Ordering::Relaxed,
                        ) {
                            Ok(_) => break,
                            Err(current) => state = current,
                        }
                    }
                    _ => break,
                }
            }

            // SAFETY: queue lock held; `node` outlives its queue membership
            // because `wait` only returns after the unlocker popped it.
            unsafe { self.queue.push_locked(NonNull::from(&node)) };
            self.queue.unlock();

            node.wait();
        }
    }

    fn unlock(&self) {
        if self
            .state
            .compare_exchange(Self::LOCKED, Self::UNLOCKED, Ordering::Release, Ordering::Relaxed)
            .is_ok()
        {
            return;
        }
        self.unlock_slow();
    }

    #[cold]
    fn unlock_slow(&self) {
        self.queue.lock();
        self.state.store(Self::UNLOCKED, Ordering::Release);
        // SAFETY: queue lock held; a popped node is live until notified.
        unsafe {
            if let Some(node) = self.queue.pop_locked() {
                WaitNode::notify(node);
            }
        }
        self.queue.unlock();
    }
}

impl Default for RawMutex {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for [`RawMutex`]; unlocks on drop, including during unwinding.
#[must_use = "if unused the RawMutex will immediately unlock"]
pub struct RawMutexGuard<'a> {
    mutex: &'a RawMutex,
}

impl Drop for RawMutexGuard<'_> {
    fn drop(&mut self) {
        self.mutex.unlock();
    }
}
