use solo::{DoubleChecked, InitState, InstanceCell, LazyShared, Locked, OnceLocked};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;
use std::time::{Duration, Instant};

const RACERS: usize = 128;

/// Instance whose constructor is slow and marks itself complete last.
struct Specimen {
    serial: usize,
    payload: Vec<u64>,
    ready: bool,
}

impl Specimen {
    fn build(counter: &AtomicUsize) -> Self {
        let serial = counter.fetch_add(1, Ordering::SeqCst);
        let mut specimen = Specimen {
            serial,
            payload: (0..256).collect(),
            ready: false,
        };
        thread::sleep(Duration::from_millis(5));
        specimen.ready = true;
        specimen
    }

    fn is_complete(&self) -> bool {
        self.ready && self.payload.len() == 256 && self.payload[255] == 255
    }
}

/// Releases `RACERS` threads at once onto a cold cell and returns each
/// thread's observed address.
fn race<C>(cell: &C, counter: &AtomicUsize) -> Vec<usize>
where
    C: InstanceCell<Specimen> + Sync,
{
    let barrier = Barrier::new(RACERS);
    thread::scope(|s| {
        let handles: Vec<_> = (0..RACERS)
            .map(|_| {
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    let specimen = cell.get_or_init(|| Specimen::build(counter));
                    assert!(specimen.is_complete(), "observed a partially constructed instance");
                    specimen as *const Specimen as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

fn assert_unique_and_single<C>(cell: &C)
where
    C: InstanceCell<Specimen> + Sync,
{
    let counter = AtomicUsize::new(0);
    let addrs = race(cell, &counter);

    assert_eq!(addrs.len(), RACERS);
    assert!(addrs.iter().all(|&a| a == addrs[0]), "threads saw different instances");
    assert_eq!(counter.load(Ordering::SeqCst), 1, "constructor ran more than once");
    assert_eq!(cell.get().map(|p| p.serial), Some(0));
}

#[test]
fn test_double_checked_uniqueness_under_race() {
    assert_unique_and_single(&DoubleChecked::new());
}

#[test]
fn test_locked_uniqueness_under_race() {
    assert_unique_and_single(&Locked::new());
}

#[test]
fn test_once_locked_uniqueness_under_race() {
    assert_unique_and_single(&OnceLocked::new());
}

static SPECIMEN_BUILDS: AtomicUsize = AtomicUsize::new(0);
static SHARED_SPECIMEN: LazyShared<Specimen> = LazyShared::new(|| Specimen::build(&SPECIMEN_BUILDS));

#[test]
fn test_static_lazy_shared_race_and_warm_access() {
    let barrier = Barrier::new(RACERS);
    let first: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..RACERS)
            .map(|_| {
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    let specimen = SHARED_SPECIMEN.get_instance();
                    assert!(specimen.is_complete());
                    specimen as *const Specimen as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(first.iter().all(|&a| a == first[0]));
    assert_eq!(SPECIMEN_BUILDS.load(Ordering::SeqCst), 1);
    assert_eq!(SHARED_SPECIMEN.state(), InitState::Init);

    // Brand-new threads after warm-up get the same instance without
    // constructing or waiting on the constructor's sleep.
    let later = thread::spawn(|| {
        let start = Instant::now();
        let addr = SHARED_SPECIMEN.get_instance() as *const Specimen as usize;
        (addr, start.elapsed())
    })
    .join()
    .unwrap();
    assert_eq!(later.0, first[0]);
    assert!(later.1 < Duration::from_secs(1));
    assert_eq!(SPECIMEN_BUILDS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_visibility_stress_repeated() {
    // Many short races on fresh cells; a missing Acquire/Release pairing shows
    // up here as a reader seeing `ready == false` or a short payload.
    for _ in 0..50 {
        let counter = AtomicUsize::new(0);
        let cell: DoubleChecked<Specimen> = DoubleChecked::new();
        let go = AtomicBool::new(false);

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    while !go.load(Ordering::Acquire) {
                        std::hint::spin_loop();
                    }
                    let specimen = cell.get_or_init(|| {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Specimen {
                            serial: 0,
                            payload: (0..256).collect(),
                            ready: true,
                        }
                    });
                    assert!(specimen.is_complete());
                });
            }
            go.store(true, Ordering::Release);
        });

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_slow_path_blocks_only_while_constructing() {
    let cell: DoubleChecked<u32> = DoubleChecked::new();
    let started = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            cell.get_or_init(|| {
                started.store(true, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(50));
                7
            });
        });

        while !started.load(Ordering::SeqCst) {
            thread::yield_now();
        }
        assert_eq!(cell.state(), InitState::Initializing);
        assert_eq!(cell.get(), None);

        // Blocks until the first thread publishes, then sees its value.
        assert_eq!(*cell.get_or_init(|| 99), 7);
    });
}

#[test]
fn test_rayon_parallel_access() {
    use rayon::prelude::*;

    let builds = AtomicUsize::new(0);
    let lazy = LazyShared::new(|| {
        builds.fetch_add(1, Ordering::SeqCst);
        String::from("shared")
    });

    let addrs: Vec<usize> = (0..10_000)
        .into_par_iter()
        .map(|_| lazy.get_instance() as *const String as usize)
        .collect();

    assert!(addrs.iter().all(|&a| a == addrs[0]));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

static SELF_REFERENTIAL: LazyShared<u32> = LazyShared::new(|| *SELF_REFERENTIAL.get_instance() + 1);

#[test]
fn test_self_referential_constructor_panics_instead_of_hanging() {
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = std::panic::catch_unwind(|| *SELF_REFERENTIAL.get_instance());
        let _ = tx.send(outcome.map_err(|payload| {
            payload.downcast_ref::<&str>().map(|s| s.to_string()).unwrap_or_default()
        }));
    });

    let outcome = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("re-entrant get_instance never returned");
    assert_eq!(outcome, Err(String::from("instance initialized re-entrantly")));
    assert_eq!(SELF_REFERENTIAL.state(), InitState::Uninit);
}
