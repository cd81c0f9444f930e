//! Shared-generator behavior under concurrent callers.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use randflake::{Generator, ManualClock, RandflakeError, EPOCH_OFFSET, MAX_SEQUENCE};

const START: i64 = EPOCH_OFFSET + 10_000;
const END: i64 = START + 3600;
const THREADS: usize = 8;

fn shared(now: i64) -> Arc<Generator<ManualClock>> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Arc::new(Generator::with_clock(3, START, END, &[0x3c; 16], ManualClock::new(now)).unwrap())
}

#[test]
fn test_concurrent_generate_unique() {
    let g = shared(START + 1);
    let per_thread = 10_000;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let g = Arc::clone(&g);
            thread::spawn(move || {
                (0..per_thread)
                    .map(|_| g.generate().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    let mut sequences = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id), "duplicate id {}", id);
            let fields = g.inspect(id).unwrap();
            assert_eq!(fields.node_id, 3);
            assert_eq!(fields.timestamp, START + 1);
            sequences.insert(fields.sequence);
        }
    }

    assert_eq!(ids.len(), THREADS * per_thread);
    let expected: HashSet<i64> = (1..=(THREADS * per_thread) as i64).collect();
    assert_eq!(sequences, expected);
}

#[test]
fn test_concurrent_exhaustion_is_exact() {
    // At the lease start no rollover is available, so exactly MAX_SEQUENCE
    // calls succeed no matter how they interleave.
    let g = shared(START);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let g = Arc::clone(&g);
            thread::spawn(move || {
                let mut ids = Vec::new();
                loop {
                    match g.generate() {
                        Ok(id) => ids.push(id),
                        Err(e) => {
                            assert_eq!(e, RandflakeError::ResourceExhausted);
                            return ids;
                        }
                    }
                }
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id));
        }
    }
    assert_eq!(ids.len(), MAX_SEQUENCE as usize);
}

#[test]
fn test_concurrent_rollover_is_exact() {
    // Exhaust the lease-start second, then race every thread through the
    // rollover of the next one: one caller resets the counter and the new
    // second yields the full 0..=MAX_SEQUENCE range exactly once.
    let clock = ManualClock::new(START);
    let g = Arc::new(Generator::with_clock(5, START, END, &[0x5a; 16], clock.clone()).unwrap());

    let mut drained = HashSet::new();
    loop {
        match g.generate() {
            Ok(id) => assert!(drained.insert(id)),
            Err(e) => {
                assert_eq!(e, RandflakeError::ResourceExhausted);
                break;
            }
        }
    }
    assert_eq!(drained.len(), MAX_SEQUENCE as usize);

    clock.advance(1);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let g = Arc::clone(&g);
            thread::spawn(move || {
                let mut ids = Vec::new();
                loop {
                    match g.generate() {
                        Ok(id) => ids.push(id),
                        Err(e) => {
                            assert_eq!(e, RandflakeError::ResourceExhausted);
                            return ids;
                        }
                    }
                }
            })
        })
        .collect();

    let mut rolled = HashSet::new();
    let mut sequences = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(!drained.contains(&id), "id {} reused from previous second", id);
            assert!(rolled.insert(id), "duplicate id {}", id);
            let fields = g.inspect(id).unwrap();
            assert_eq!(fields.timestamp, START + 1);
            sequences.insert(fields.sequence);
        }
    }

    assert_eq!(rolled.len(), MAX_SEQUENCE as usize + 1);
    let expected: HashSet<i64> = (0..=MAX_SEQUENCE).collect();
    assert_eq!(sequences, expected);
}

#[test]
fn test_concurrent_update_lease_monotonic() {
    let g = shared(START);
    let done = Arc::new(AtomicBool::new(false));

    let observer = {
        let g = Arc::clone(&g);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut last = g.lease_end();
            while !done.load(Ordering::SeqCst) {
                let current = g.lease_end();
                assert!(current >= last, "lease end went from {} to {}", last, current);
                last = current;
            }
        })
    };

    let writers: Vec<_> = (0..THREADS as i64)
        .map(|t| {
            let g = Arc::clone(&g);
            thread::spawn(move || {
                let mut wins = 0;
                for step in 0..1_000i64 {
                    if g.update_lease(START, END + step * THREADS as i64 + t) {
                        wins += 1;
                    }
                    // Mismatched start never applies.
                    assert!(!g.update_lease(START + 1, END + 1_000_000));
                }
                wins
            })
        })
        .collect();

    let wins: usize = writers.into_iter().map(|w| w.join().unwrap()).sum();
    done.store(true, Ordering::SeqCst);
    observer.join().unwrap();

    assert!(wins >= 1);
    assert_eq!(g.lease_end(), END + 999 * THREADS as i64 + (THREADS as i64 - 1));
}

#[test]
fn test_generate_across_seconds_unique() {
    let clock = ManualClock::new(START + 1);
    let g = Generator::with_clock(9, START, END, &[0x01; 16], clock.clone()).unwrap();

    let mut seen = HashSet::new();
    for _ in 0..5 {
        for _ in 0..2_000 {
            assert!(seen.insert(g.generate().unwrap()));
        }
        clock.advance(1);
    }
    assert_eq!(seen.len(), 10_000);
}

#[test]
fn test_full_second_then_rollover_unique() {
    // One full second of sequence space (1..=MAX plus the reset to 0), then
    // more identifiers in the next second.
    let clock = ManualClock::new(START + 1);
    let g = Generator::with_clock(9, START, END, &[0x02; 16], clock.clone()).unwrap();

    let mut seen = HashSet::new();
    for _ in 0..=MAX_SEQUENCE {
        assert!(seen.insert(g.generate().unwrap()));
    }
    clock.advance(1);
    for _ in 0..1_000 {
        assert!(seen.insert(g.generate().unwrap()));
    }
    assert_eq!(seen.len(), MAX_SEQUENCE as usize + 1 + 1_000);
}
