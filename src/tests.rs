use crate::{
    Cuid, Fingerprint, Generator, Phase, base36, cuid, decompose, error::*, fingerprint, is_cuid,
};
use std::{
    collections::HashSet,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    thread,
    time::Instant,
};

use regex::Regex;
use thiserror::Error;

const CUID_PATTERN: &str = r"^c[0-9a-z]{6}[0-9a-z]{4}[!-~]{4}[0-9a-z]{8}$";

#[test]
fn test_next_id() -> Result<(), BoxDynError> {
    let generator = Generator::builder()
        .fingerprint(&|| Ok(Fingerprint::new(*b"fing")?))
        .finalize()?;
    let id = generator.next_id();
    assert!(Regex::new(CUID_PATTERN)?.is_match(&id), "bad cuid: {}", id);
    assert_eq!(&id[11..15], "fing");
    Ok(())
}

#[test]
fn test_once() -> Result<(), BoxDynError> {
    let draws = Mutex::new([0u32, 1679615, 46656].into_iter().cycle());
    let generator = Generator::builder()
        .timestamp(|| 123456789)
        .random(move || draws.lock().unwrap().next().unwrap_or(0))
        .fingerprint(&|| Ok("fing".parse()?))
        .finalize()?;

    assert_eq!(generator.next_id(), "c21i3v90001fing0000zzzz");
    assert_eq!(generator.next_id(), "c21i3v90002fing10000000");
    Ok(())
}

#[test]
fn test_counter_increments() -> Result<(), BoxDynError> {
    let generator = Generator::builder()
        .fingerprint(&|| Ok("test".parse()?))
        .finalize()?;

    let first = decompose(&generator.next_id())?;
    let second = decompose(&generator.next_id())?;
    assert_eq!(first.counter, 1);
    assert_eq!(second.counter, first.counter + 1);
    Ok(())
}

#[test]
fn test_timestamp_source() -> Result<(), BoxDynError> {
    let clock = Arc::new(AtomicU64::new(100));
    let thread_clock = Arc::clone(&clock);
    let generator = Generator::builder()
        .timestamp(move || thread_clock.fetch_add(1, Ordering::Relaxed))
        .fingerprint(&|| Ok("test".parse()?))
        .finalize()?;

    let mut last = 0;
    for _ in 0..100 {
        let parts = decompose(&generator.next_id())?;
        assert!(parts.timestamp > last, "timestamp went back");
        last = parts.timestamp;
    }
    assert_eq!(clock.load(Ordering::Relaxed), 200);
    Ok(())
}

#[test]
fn test_default_timestamp_is_seconds() -> Result<(), BoxDynError> {
    let before = chrono::Utc::now().timestamp() as u64;
    let id = cuid()?;
    let after = chrono::Utc::now().timestamp() as u64;
    // six base36 digits hold the low bits of the clock
    let clipped = |t: u64| base36::decode(&base36::encode_padded(t, 6, '0').unwrap()).unwrap();
    let stamped = decompose(&id)?.timestamp;
    assert!(stamped == clipped(before) || stamped == clipped(after));
    Ok(())
}

#[test]
fn test_quick_mode_successive_ids() -> Result<(), BoxDynError> {
    let first = cuid()?;
    let second = cuid()?;
    assert_ne!(first, second);
    assert_ne!(&first[15..], &second[15..]);
    assert_eq!(&first[11..15], fingerprint()?.as_str());
    assert_eq!(&second[11..15], &first[11..15]);
    Ok(())
}

#[test]
fn test_threads_uniqueness() -> Result<(), BoxDynError> {
    let generator = Generator::builder()
        .fingerprint(&|| Ok("thrd".parse()?))
        .finalize()?;
    let ids = Arc::new(Mutex::new(HashSet::new()));
    let mut children = Vec::new();
    let num_threads = 10;
    let ids_per_thread = 10_000;

    for _ in 0..num_threads {
        let thread_generator = generator.clone();
        let thread_ids = Arc::clone(&ids);
        children.push(thread::spawn(move || {
            let local_ids: Vec<String> = (0..ids_per_thread)
                .map(|_| thread_generator.next_id())
                .collect();
            let mut ids_lock = thread_ids.lock().unwrap();
            for id in local_ids {
                assert!(ids_lock.insert(id.clone()), "Duplicate ID detected: {}", id);
            }
        }));
    }

    for child in children {
        child.join().expect("Child thread panicked");
    }

    let ids = ids.lock().unwrap();
    assert_eq!(ids.len(), num_threads * ids_per_thread);
    let counters: HashSet<u64> = ids
        .iter()
        .map(|id| decompose(id).map(|parts| parts.counter))
        .collect::<Result<_, _>>()?;
    // clones share one counter
    assert_eq!(counters.len(), num_threads * ids_per_thread);
    Ok(())
}

#[test]
fn test_generate_10_ids() -> Result<(), BoxDynError> {
    let re = Regex::new(CUID_PATTERN)?;
    let mut ids = HashSet::new();
    for _ in 0..10 {
        let id = cuid()?;
        assert_eq!(id.len(), 23);
        assert!(re.is_match(&id), "bad cuid: {}", id);
        assert!(is_cuid(&id));
        assert!(ids.insert(id.clone()), "duplicated id: {}", id);
    }
    Ok(())
}

#[derive(Error, Debug)]
pub enum TestError {
    #[error("some error")]
    SomeError,
}

#[test]
fn test_builder_errors() {
    assert!(matches!(
        Generator::builder()
            .fingerprint(&|| Err(Box::new(TestError::SomeError)))
            .finalize(),
        Err(Error::FingerprintFailed(_))
    ));

    assert!(matches!(
        Generator::builder()
            .fingerprint(&|| Ok("fing".parse()?))
            .check_fingerprint(&|_| false)
            .finalize(),
        Err(Error::CheckFingerprintFailed)
    ));

    assert!(matches!(
        Generator::builder()
            .fingerprint(&|| Ok("fi".parse()?))
            .finalize(),
        Err(Error::FingerprintFailed(_))
    ));
}

#[test]
fn test_error_send_sync() {
    // This test ensures the Error type is Send + Sync
    let err = Error::CheckFingerprintFailed;
    thread::spawn(move || {
        let _ = err;
    })
    .join()
    .unwrap();
}

#[test]
fn test_modes_agree() -> Result<(), BoxDynError> {
    let mut next = 0u32;
    let pure = Cuid::create_with_seed("fing".parse()?, || {
        next += 1;
        next
    })
    .initialize(123456789)
    .advance(223456789);
    assert_eq!(pure.phase(), Phase::Advanced);

    let parts = decompose(&pure.read())?;
    let draws = Mutex::new([parts.random1 as u32, parts.random2 as u32].into_iter());
    let quick = Generator::builder()
        .timestamp(|| 223456789)
        .random(move || draws.lock().unwrap().next().unwrap_or(0))
        .fingerprint(&|| Ok("fing".parse()?))
        .finalize()?;

    assert_eq!(quick.next_id(), pure.read());
    Ok(())
}

// --- Performance Benchmarks ---
// These tests are ignored by default. Run with `cargo test -- --ignored`.

#[test]
#[ignore]
fn bench_single_thread_performance() -> Result<(), BoxDynError> {
    let generator = Generator::new()?;
    let iterations = 1_000_000;

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = generator.next_id();
    }
    let duration = start.elapsed();
    let rate = iterations as f64 / duration.as_secs_f64();

    println!("\n--- Single-Thread Benchmark ---");
    println!(
        "Generated {} IDs in {:?}. Rate: {:.2} IDs/sec",
        iterations, duration, rate
    );
    println!("-----------------------------\n");

    Ok(())
}

#[test]
#[ignore]
fn bench_pure_advance_performance() -> Result<(), BoxDynError> {
    let mut id = Cuid::create(fingerprint()?).initialize(0);
    let iterations = 1_000_000;

    let start = Instant::now();
    for t in 0..iterations {
        id = id.advance(t);
    }
    let duration = start.elapsed();
    let rate = iterations as f64 / duration.as_secs_f64();

    println!("\n--- Pure Advance Benchmark ---");
    println!(
        "Advanced {} times in {:?}. Rate: {:.2} IDs/sec ({})",
        iterations,
        duration,
        rate,
        id.read()
    );
    println!("----------------------------\n");

    Ok(())
}
