use std::sync::atomic::{AtomicU64, Ordering};

/// Best-effort monotonic counters of successful pushes and pops.
///
/// Both counters are incremented with relaxed ordering on the hot path —
/// they exist for observability, not for the full/empty decision, and
/// should only be trusted once all producer and consumer threads have
/// quiesced (joined). Reading them mid-run yields a snapshot that may be
/// stale by the time it's observed.
#[derive(Debug, Default)]
pub struct Metrics {
    push_count: AtomicU64,
    pop_count: AtomicU64,
}

impl Metrics {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_push(&self) {
        self.push_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_pop(&self) {
        self.pop_count.fetch_add(1, Ordering::Relaxed);
    }

    /// A point-in-time snapshot of both counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            push_count: self.push_count.load(Ordering::Relaxed),
            pop_count: self.pop_count.load(Ordering::Relaxed),
        }
    }
}

/// A plain-value snapshot of [`Metrics`], taken at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Number of `push` calls that returned `Success` up to the snapshot.
    pub push_count: u64,
    /// Number of `pop` calls that returned `Some` up to the snapshot.
    pub pop_count: u64,
}
