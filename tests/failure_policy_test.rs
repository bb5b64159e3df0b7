use anyhow::{anyhow, Result};
use solo::{ConstructionError, FailurePolicy, InitState, TryLazyShared};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;

const THREADS: usize = 32;

#[derive(Debug)]
struct Connection {
    attempt: usize,
}

fn connect(attempts: &AtomicUsize, fail_first: usize) -> Result<Connection> {
    let attempt = attempts.fetch_add(1, Ordering::SeqCst);
    if attempt < fail_first {
        Err(anyhow!("connection refused (attempt {attempt})"))
    } else {
        Ok(Connection { attempt })
    }
}

#[test]
fn test_retry_policy_under_contention() {
    let attempts = AtomicUsize::new(0);
    let lazy = TryLazyShared::new(|| connect(&attempts, 3));
    let barrier = Barrier::new(THREADS);

    let outcomes: Vec<Option<usize>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    lazy.get_instance().ok().map(|c| c as *const Connection as usize)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Exactly the first three constructions failed, one succeeded, and no
    // thread ran the constructor after the instance was published.
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
    let failures = outcomes.iter().filter(|o| o.is_none()).count();
    assert_eq!(failures, 3);

    let winner = lazy.get().expect("published");
    assert_eq!(winner.attempt, 3);
    let addr = winner as *const Connection as usize;
    assert!(outcomes.iter().flatten().all(|&a| a == addr));
}

#[test]
fn test_poison_policy_under_contention() {
    let attempts = AtomicUsize::new(0);
    let lazy = TryLazyShared::with_policy(|| connect(&attempts, usize::MAX), FailurePolicy::Poison);
    let barrier = Barrier::new(THREADS);

    let (failed, poisoned) = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    match lazy.get_instance() {
                        Ok(_) => unreachable!("constructor always fails"),
                        Err(ConstructionError::Failed(_)) => (1, 0),
                        Err(ConstructionError::Poisoned) => (0, 1),
                    }
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .fold((0, 0), |acc, x| (acc.0 + x.0, acc.1 + x.1))
    });

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(failed, 1);
    assert_eq!(poisoned, THREADS - 1);
    assert_eq!(lazy.state(), InitState::Poisoned);
}

#[test]
fn test_failed_error_carries_constructor_message() {
    let attempts = AtomicUsize::new(0);
    let lazy = TryLazyShared::new(|| connect(&attempts, 1));

    let err = lazy.get_instance().unwrap_err();
    assert_eq!(err.to_string(), "instance constructor failed");
    let source = err.into_source().expect("constructor error");
    assert_eq!(source.to_string(), "connection refused (attempt 0)");

    assert_eq!(lazy.get_instance().unwrap().attempt, 1);
}

#[test]
fn test_panicking_constructor_retries() {
    let attempts = AtomicUsize::new(0);
    let lazy = solo::LazyShared::new(|| {
        if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("first construction panics");
        }
        "ok"
    });

    let first = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| *lazy.get_instance()));
    assert!(first.is_err());
    assert_eq!(lazy.state(), InitState::Uninit);
    assert_eq!(*lazy.get_instance(), "ok");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
