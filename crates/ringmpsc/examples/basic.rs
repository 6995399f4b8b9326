//! Minimal multi-producer / single-consumer demo.

use ringmpsc::{MpscRing, PushOutcome};
use std::sync::Arc;
use std::thread;

const PRODUCERS: u64 = 4;
const PER_PRODUCER: u64 = 10_000;

fn main() {
    let ring = Arc::new(MpscRing::<(u64, u64)>::with_capacity(4096).unwrap());

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|id| {
            let ring = Arc::clone(&ring);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    while ring.push((id, i)) == PushOutcome::Full {
                        std::hint::spin_loop();
                    }
                }
            })
        })
        .collect();

    let mut last_seen = vec![0u64; PRODUCERS as usize];
    let mut received = 0u64;
    while received < PRODUCERS * PER_PRODUCER {
        if let Some((id, i)) = ring.pop() {
            assert_eq!(i, last_seen[id as usize], "FIFO violation for producer {id}");
            last_seen[id as usize] += 1;
            received += 1;
        }
    }

    for producer in producers {
        producer.join().unwrap();
    }

    let metrics = ring.metrics();
    println!(
        "pushed {} popped {} (per-producer order preserved)",
        metrics.push_count, metrics.pop_count
    );
}
