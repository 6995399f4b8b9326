use std::hint;
use std::thread;

/// Adaptive backoff strategy (spin with `PAUSE` hints, then yield to the OS).
///
/// `push`/`pop` themselves never use this — the protocol is required to
/// never block (see `push`/`pop` docs) — but a caller retrying a `Full`
/// push or an `Empty` pop in a loop of its own (the benchmark harness's
/// producer loop, for instance) can use it to avoid burning a whole core
/// on a pure spin once contention is sustained rather than transient.
#[derive(Debug)]
pub struct Backoff {
    step: u32,
}

impl Backoff {
    const SPIN_LIMIT: u32 = 6;
    const YIELD_LIMIT: u32 = 10;

    /// Creates a new backoff instance, starting at the lightest spin step.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { step: 0 }
    }

    /// Light spin with `PAUSE` hints.
    #[inline]
    pub fn spin(&mut self) {
        let spins = 1 << self.step.min(Self::SPIN_LIMIT);
        for _ in 0..spins {
            hint::spin_loop();
        }
        if self.step <= Self::SPIN_LIMIT {
            self.step += 1;
        }
    }

    /// Heavier backoff: spin while cheap, then yield to the scheduler.
    #[inline]
    pub fn snooze(&mut self) {
        if self.step <= Self::SPIN_LIMIT {
            self.spin();
        } else {
            thread::yield_now();
            if self.step <= Self::YIELD_LIMIT {
                self.step += 1;
            }
        }
    }

    /// Returns true once the backoff has exhausted its escalation steps.
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.step > Self::YIELD_LIMIT
    }

    /// Resets the backoff to its initial step.
    #[inline]
    pub fn reset(&mut self) {
        self.step = 0;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}
