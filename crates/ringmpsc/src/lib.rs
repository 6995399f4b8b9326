//! ringmpsc - a bounded, lock-free, multi-producer / single-consumer ring queue.
//!
//! Any number of producer threads may [`MpscRing::push`] concurrently; a
//! single consumer thread calls [`MpscRing::pop`]. Capacity is fixed at
//! construction and memory is bounded — the queue never grows. Correctness
//! rests on a per-slot sequence-number protocol (see `ring.rs`), not on
//! mutual exclusion: there are no locks anywhere on the push/pop path.
//!
//! # Example
//!
//! ```
//! use ringmpsc::{MpscRing, PushOutcome};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let ring = Arc::new(MpscRing::<u64>::with_capacity(1024).unwrap());
//!
//! let producer_ring = Arc::clone(&ring);
//! let producer = thread::spawn(move || {
//!     for i in 0..100 {
//!         while producer_ring.push(i) == PushOutcome::Full {
//!             std::hint::spin_loop();
//!         }
//!     }
//! });
//!
//! let mut received = 0u64;
//! while received < 100 {
//!     if let Some(value) = ring.pop() {
//!         assert_eq!(value, received);
//!         received += 1;
//!     }
//! }
//! producer.join().unwrap();
//! ```

mod backoff;
mod config;
mod error;
mod invariants;
mod metrics;
mod ring;

pub use backoff::Backoff;
pub use config::Config;
pub use error::ConfigError;
pub use metrics::{Metrics, MetricsSnapshot};
pub use ring::{MpscRing, PushOutcome};
