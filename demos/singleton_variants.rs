//! Singleton Variants
//!
//! Shows each lazy-instance strategy and how they behave on first and later
//! access.

use solo::{
    singleton, ConstructionError, DoubleChecked, Eager, FailurePolicy, InstanceCell, Locked,
    OnceLocked, TryLazyShared, Unsynchronized,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

struct Database {
    url: &'static str,
}

impl Database {
    fn connect() -> Self {
        println!("  (connecting...)");
        Self { url: "postgres://localhost/app" }
    }
}

singleton! {
    impl Database {
        fn instance() = Database::connect();
    }
}

static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);
static FLAKY: TryLazyShared<u32, String> = TryLazyShared::with_policy(
    || {
        if ATTEMPTS.fetch_add(1, Ordering::SeqCst) == 0 {
            Err("service unavailable".to_owned())
        } else {
            Ok(7)
        }
    },
    FailurePolicy::Retry,
);

fn time_reads<C: InstanceCell<u64>>(name: &str, cell: &C) {
    cell.get_or_init(|| 1);
    let start = Instant::now();
    let mut sum = 0_u64;
    for _ in 0..1_000_000 {
        sum = sum.wrapping_add(*cell.get_or_init(|| 0));
    }
    println!("  {name:<16} 1M warm reads in {:?} (sum {sum})", start.elapsed());
}

fn main() {
    println!("Singleton Variants");
    println!("==================");

    println!("\n1. Type accessor (function-local static):");
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| Database::instance() as *const Database as usize))
        .collect();
    let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    println!("  4 threads, distinct instances: {}", {
        let mut unique = addrs.clone();
        unique.sort_unstable();
        unique.dedup();
        unique.len()
    });
    println!("  url = {}", Database::instance().url);

    println!("\n2. Fallible construction with retry:");
    match FLAKY.get_instance() {
        Err(ConstructionError::Failed(e)) => println!("  first call failed: {e}"),
        other => println!("  unexpected: {other:?}"),
    }
    println!("  second call: {:?} (state {})", FLAKY.get_instance(), FLAKY.state());

    println!("\n3. Strategy cost on the warm path:");
    time_reads("Eager", &Eager::new(1_u64));
    time_reads("DoubleChecked", &DoubleChecked::new());
    time_reads("OnceLocked", &OnceLocked::new());
    time_reads("Locked", &Locked::new());
    time_reads("Unsynchronized", &Unsynchronized::new());
}
