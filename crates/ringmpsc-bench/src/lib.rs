//! Harness protocol for the `ringmpsc-bench` binary, factored out as a
//! library function so it is unit-testable independent of the CLI layer.
//! `main` is a thin wrapper: parse args, call [`run_benchmark`], probe the
//! environment once, append a result record.

pub mod cpu_info;
pub mod error;
pub mod order_event;
pub mod results;

use order_event::OrderEvent;
use ringmpsc::MpscRing;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// Parameters for one benchmark run.
#[derive(Debug, Clone, Copy)]
pub struct BenchParams {
    pub queue_size: usize,
    pub producer_count: usize,
    pub duration: Duration,
}

/// Measured outcome of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchOutcome {
    pub events_pushed: u64,
    /// Every `pop()` call the consumer made, whether it returned a value
    /// or not.
    pub total_pop_attempts: u64,
    /// The subset of `total_pop_attempts` that returned a value.
    pub successful_pops: u64,
    pub events_rejected_full: u64,
    pub elapsed: Duration,
    pub metrics: ringmpsc::MetricsSnapshot,
}

impl BenchOutcome {
    #[must_use]
    pub fn throughput_events_per_sec(&self) -> f64 {
        self.successful_pops as f64 / self.elapsed.as_secs_f64()
    }
}

/// Runs the producer/consumer throughput protocol once and returns what it
/// measured. Never panics on the happy path; joins can only panic if a
/// worker thread itself panicked, which propagates as an `expect` failure
/// since it indicates a bug rather than a recoverable condition.
pub fn run_benchmark(params: &BenchParams) -> Result<BenchOutcome, ringmpsc::ConfigError> {
    let ring = Arc::new(MpscRing::<OrderEvent>::with_capacity(params.queue_size)?);
    let stop = Arc::new(AtomicBool::new(false));
    let events_rejected_full = Arc::new(AtomicU64::new(0));

    // producers + consumer + this orchestrating thread, so everyone
    // releases at the same instant instead of racing ahead while threads
    // are still spinning up.
    let barrier = Arc::new(Barrier::new(params.producer_count + 2));

    let producer_handles: Vec<_> = (0..params.producer_count)
        .map(|producer_id| {
            let ring = Arc::clone(&ring);
            let stop = Arc::clone(&stop);
            let rejected = Arc::clone(&events_rejected_full);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut sequence = 0u64;
                let mut local_rejected = 0u64;
                while !stop.load(Ordering::SeqCst) {
                    let event = OrderEvent::synthetic(producer_id as u32, sequence);
                    if ring.push(event) == ringmpsc::PushOutcome::Full {
                        local_rejected += 1;
                        thread::yield_now();
                    } else {
                        sequence += 1;
                    }
                }
                rejected.fetch_add(local_rejected, Ordering::Relaxed);
                sequence
            })
        })
        .collect();

    let consumer_handle = {
        let ring = Arc::clone(&ring);
        let stop = Arc::clone(&stop);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            // Plain locals, not atomics: this thread is the only reader or
            // writer of either counter.
            let mut total_pop_attempts = 0u64;
            let mut successful_pops = 0u64;
            loop {
                total_pop_attempts += 1;
                match ring.pop() {
                    Some(_) => successful_pops += 1,
                    None => {
                        if stop.load(Ordering::SeqCst) {
                            // Drain whatever producers committed before
                            // they observed the stop flag.
                            loop {
                                total_pop_attempts += 1;
                                if ring.pop().is_some() {
                                    successful_pops += 1;
                                } else {
                                    break;
                                }
                            }
                            break;
                        }
                        thread::yield_now();
                    }
                }
            }
            (total_pop_attempts, successful_pops)
        })
    };

    barrier.wait();
    let start = Instant::now();
    thread::sleep(params.duration);
    stop.store(true, Ordering::SeqCst);

    let events_pushed: u64 = producer_handles
        .into_iter()
        .map(|h| h.join().expect("producer thread panicked"))
        .sum();
    let (total_pop_attempts, successful_pops) =
        consumer_handle.join().expect("consumer thread panicked");
    let elapsed = start.elapsed();

    Ok(BenchOutcome {
        events_pushed,
        total_pop_attempts,
        successful_pops,
        events_rejected_full: events_rejected_full.load(Ordering::Relaxed),
        elapsed,
        metrics: ring.metrics(),
    })
}
