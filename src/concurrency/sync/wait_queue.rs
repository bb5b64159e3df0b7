use std::cell::{Cell, UnsafeCell};
use std::marker::PhantomPinned;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, Thread};

use crossbeam_utils::Backoff;

/// A parked thread waiting for the lock.
///
/// Lives on the waiter's stack. The waiter must not return until `notified`
/// is set, because until then the node may still be linked into the queue.
pub(crate) struct WaitNode {
    thread: Thread,
    next: Cell<Option<NonNull<WaitNode>>>,
    notified: AtomicBool,
    _pin: PhantomPinned,
}

impl WaitNode {
    pub(crate) fn new() -> Self {
        Self {
            thread: thread::current(),
            next: Cell::new(None),
            notified: AtomicBool::new(false),
            _pin: PhantomPinned,
        }
    }

    /// Parks the current thread until this node has been popped and notified.
    ///
    /// Spurious unparks are absorbed by re-checking the flag.
    pub(crate) fn wait(&self) {
        while !self.notified.load(Ordering::Acquire) {
            thread::park();
        }
    }

    /// Marks the node as notified and unparks its thread.
    ///
    /// # Safety
    /// `node` must have been popped from the queue and still be live.
    pub(crate) unsafe fn notify(node: NonNull<WaitNode>) {
        // The waiter may free its node as soon as `notified` is visible, so
        // take our own handle to its thread first.
        let thread = node.as_ref().thread.clone();
        node.as_ref().notified.store(true, Ordering::Release);
        thread.unpark();
    }
}

/// FIFO queue of parked threads, guarded by a tiny spinlock.
///
/// Every operation is a couple of pointer swaps, so the spinlock is only ever
/// held for a handful of instructions.
pub(crate) struct WaitQueue {
    head: UnsafeCell<Option<NonNull<WaitNode>>>,
    tail: UnsafeCell<Option<NonNull<WaitNode>>>,
    lock: AtomicBool,
}

impl WaitQueue {
    pub(crate) const fn new() -> Self {
        Self {
            head: UnsafeCell::new(None),
            tail: UnsafeCell::new(None),
            lock: AtomicBool::new(false),
        }
    }

    pub(crate) fn lock(&self) {
        let backoff = Backoff::new();
        while self.lock.swap(true, Ordering::Acquire) {
            backoff.spin();
        }
    }

    pub(crate) fn unlock(&self) {
        self.lock.store(false, Ordering::Release);
    }

    /// Appends a node (caller must hold the queue lock).
    ///
    /// # Safety
    /// Caller holds the queue lock; `node` stays valid and unmoved until it is
    /// popped and notified.
    pub(crate) unsafe fn push_locked(&self, node: NonNull<WaitNode>) {
        let head = &mut *self.head.get();
        let tail = &mut *self.tail.get();

        node.as_ref().next.set(None);

        match *tail {
            Some(t) => t.as_ref().next.set(Some(node)),
            None => *head = Some(node),
        }
        *tail = Some(node);
    }

    /// Removes the oldest node (caller must hold the queue lock).
    ///
    /// # Safety
    /// Caller holds the queue lock.
    pub(crate) unsafe fn pop_locked(&self) -> Option<NonNull<WaitNode>> {
        let head = &mut *self.head.get();
        let tail = &mut *self.tail.get();

        let popped = *head;
        if let Some(h) = popped {
            *head = h.as_ref().next.get();
            if head.is_none() {
                *tail = None;
            }
        }
        popped
    }

    /// No thread is parked.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.lock();
        // SAFETY: queue lock held.
        let empty = unsafe { (*self.head.get()).is_none() };
        self.unlock();
        empty
    }
}

// SAFETY: the list is only touched while the spinlock is held.
unsafe impl Sync for WaitQueue {}
unsafe impl Send for WaitQueue {}
