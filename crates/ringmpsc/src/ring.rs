use crate::invariants::{
    debug_assert_bounded_count, debug_assert_monotonic, debug_assert_plausible_diff,
};
use crate::{Config, ConfigError, Metrics, MetricsSnapshot};
use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// PROTOCOL
// =============================================================================
//
// Each cell carries its own sequence number; that single word is the entire
// synchronizer for the cell. A cell at physical position `p % capacity` is:
//
//   - empty and writable at logical position p    when sequence == p
//   - full and readable at logical position p     when sequence == p + 1
//
// A producer reserves a logical position by CASing `head` from `p` to
// `p + 1` only once it has observed `sequence == p` there; the consumer
// does the same on `tail`, requiring `sequence == p + 1`. Because the CAS
// is gated on the sequence match, two producers racing for the same `p`
// only ever have one winner — the loser re-reads `head` and tries the new
// position.  There is never a lock, and the payload itself is touched
// under plain (non-atomic) loads/stores because the sequence gate already
// establishes exclusive access and the necessary happens-before edge.
//
// Ordering:
//   - loads of head/tail/sequence that gate a payload access: Acquire
//   - stores of sequence that publish or re-arm a slot: Release
//   - CAS on head/tail: AcqRel on success, Acquire on failure
//   - the push/pop counters: Relaxed
//
// =============================================================================

/// One slot of the ring: a payload and the sequence word that gates it.
///
/// Aligned to a cache line so that two producers contending for adjacent
/// logical positions don't also fight over the same cache line.
#[repr(align(64))]
struct Cell<T> {
    sequence: AtomicUsize,
    value: UnsafeCell<MaybeUninit<T>>,
}

// Safety: a `Cell`'s payload is only ever touched by the single thread that
// currently holds the sequence gate for it, so sharing `Cell<T>` across
// threads is safe whenever `T: Send`.
unsafe impl<T: Send> Sync for Cell<T> {}

/// The outcome of [`MpscRing::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// `value` was enqueued.
    Success,
    /// The ring was full from this producer's point of view; `value` was
    /// not enqueued and is dropped by the caller along with the `Full`
    /// return (no ownership is retained by the queue).
    Full,
}

/// A bounded, lock-free, multi-producer / single-consumer ring queue.
///
/// Any number of threads may call [`push`](MpscRing::push) concurrently.
/// Exactly one thread should call [`pop`](MpscRing::pop) — a second
/// concurrent popper will not corrupt the queue (the CAS on `tail` is
/// still correct), but FIFO delivery to "the consumer" as a single logical
/// reader is only guaranteed with one.
pub struct MpscRing<T> {
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
    config: Config,
    cells: Box<[Cell<T>]>,
    metrics: Metrics,
}

impl<T> std::fmt::Debug for MpscRing<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MpscRing")
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

// Safety: all cross-thread access to cell payloads is mediated by the
// sequence-number protocol, which establishes the necessary
// happens-before edges via Acquire/Release on the sequence words.
unsafe impl<T: Send> Send for MpscRing<T> {}
unsafe impl<T: Send> Sync for MpscRing<T> {}

impl<T> MpscRing<T> {
    /// Creates a new ring with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let capacity = config.capacity();
        let cells: Box<[Cell<T>]> = (0..capacity)
            .map(|i| Cell {
                sequence: AtomicUsize::new(i),
                value: UnsafeCell::new(MaybeUninit::uninit()),
            })
            .collect();

        Self {
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            config,
            cells,
            metrics: Metrics::new(),
        }
    }

    /// Creates a new ring with the given capacity.
    ///
    /// Shorthand for `MpscRing::new(Config::try_new(capacity)?)`.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Config::try_new(capacity).map(Self::new)
    }

    /// The ring's fixed capacity, in elements.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// An approximate element count, valid only when no producer or
    /// consumer is concurrently active (e.g. for tests and diagnostics).
    /// Under concurrent use this is a racy snapshot of two independently
    /// loaded atomics and may be stale the instant it's returned.
    #[must_use]
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        head.wrapping_sub(tail)
    }

    /// True iff [`len`](Self::len) is zero at the moment of the check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot of the best-effort push/pop counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    #[inline]
    fn cell(&self, pos: usize) -> &Cell<T> {
        &self.cells[self.config.index(pos)]
    }

    /// Attempts to enqueue `value` at the current logical head.
    ///
    /// Never blocks. Returns [`PushOutcome::Full`] iff, at the instant this
    /// call observed its candidate cell, that cell had not yet been
    /// consumed for its previous lap — i.e. the queue was full from this
    /// producer's point of view. Never overwrites an unread slot and never
    /// drops a previously committed element.
    pub fn push(&self, value: T) -> PushOutcome {
        let mut pos = self.head.load(Ordering::Acquire);

        let reserved = loop {
            let cell = self.cell(pos);
            let seq = cell.sequence.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos) as isize;
            debug_assert_plausible_diff!(diff, self.capacity());

            match diff.cmp(&0) {
                std::cmp::Ordering::Equal => {
                    match self.head.compare_exchange(
                        pos,
                        pos.wrapping_add(1),
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    ) {
                        Ok(_) => break pos,
                        Err(current) => pos = current,
                    }
                }
                std::cmp::Ordering::Less => return PushOutcome::Full,
                std::cmp::Ordering::Greater => pos = self.head.load(Ordering::Acquire),
            }
        };

        let cell = self.cell(reserved);
        debug_assert_bounded_count!(
            reserved.wrapping_add(1),
            self.tail.load(Ordering::Relaxed),
            self.capacity()
        );
        debug_assert_monotonic!("head", pos, reserved.wrapping_add(1));

        // SAFETY: the CAS above transferred exclusive ownership of this
        // cell's payload slot to this thread, for logical position
        // `reserved`, until the Release store of the sequence below
        // publishes it. No other thread writes or reads this slot in
        // that window: the consumer only reads once sequence == reserved+1.
        unsafe {
            (*cell.value.get()).write(value);
        }
        cell.sequence.store(reserved.wrapping_add(1), Ordering::Release);
        self.metrics.record_push();
        PushOutcome::Success
    }

    /// Attempts to dequeue the element at the current logical tail.
    ///
    /// Never blocks. Returns `None` iff no element at the current tail has
    /// been fully published by a producer. Elements are returned in FIFO
    /// order of their commit (the producer's Release store in `push`).
    pub fn pop(&self) -> Option<T> {
        let mut pos = self.tail.load(Ordering::Acquire);

        let reserved = loop {
            let cell = self.cell(pos);
            let seq = cell.sequence.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos.wrapping_add(1)) as isize;
            debug_assert_plausible_diff!(diff, self.capacity());

            match diff.cmp(&0) {
                std::cmp::Ordering::Equal => {
                    match self.tail.compare_exchange(
                        pos,
                        pos.wrapping_add(1),
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    ) {
                        Ok(_) => break pos,
                        Err(current) => pos = current,
                    }
                }
                std::cmp::Ordering::Less => return None,
                std::cmp::Ordering::Greater => pos = self.tail.load(Ordering::Acquire),
            }
        };

        let cell = self.cell(reserved);
        debug_assert_monotonic!("tail", pos, reserved.wrapping_add(1));

        // SAFETY: the CAS above transferred exclusive read ownership of
        // this cell's payload to this thread for logical position
        // `reserved`; the producer's Release store of `sequence` (observed
        // by the Acquire load above) made its payload write visible here.
        let value = unsafe { (*cell.value.get()).assume_init_read() };
        cell.sequence
            .store(reserved.wrapping_add(self.capacity()), Ordering::Release);
        self.metrics.record_pop();
        Some(value)
    }
}

impl<T> Drop for MpscRing<T> {
    fn drop(&mut self) {
        let head = *self.head.get_mut();
        let tail = *self.tail.get_mut();
        let count = head.wrapping_sub(tail);

        for i in 0..count {
            let pos = tail.wrapping_add(i);
            let idx = self.config.index(pos);
            // SAFETY: every logical position in [tail, head) was committed
            // by a push and never popped, so its slot holds a live `T`.
            unsafe {
                ptr::drop_in_place(self.cells[idx].value.get_mut().as_mut_ptr());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_thread_fill_and_drain() {
        let ring = MpscRing::<u64>::with_capacity(8).unwrap();

        for i in 0..8 {
            assert_eq!(ring.push(i), PushOutcome::Success);
        }
        assert_eq!(ring.push(99), PushOutcome::Full);

        for i in 0..8 {
            assert_eq!(ring.pop(), Some(i));
        }
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn metrics_track_successful_operations() {
        let ring = MpscRing::<u64>::with_capacity(4).unwrap();
        ring.push(1);
        ring.push(2);
        ring.pop();

        let snapshot = ring.metrics();
        assert_eq!(snapshot.push_count, 2);
        assert_eq!(snapshot.pop_count, 1);
    }

    #[test]
    fn rearm_is_idempotent_across_laps() {
        let ring = MpscRing::<u64>::with_capacity(4).unwrap();

        for lap in 0..3u64 {
            for i in 0..4 {
                assert_eq!(ring.push(lap * 4 + i), PushOutcome::Success);
            }
            for i in 0..4 {
                assert_eq!(ring.pop(), Some(lap * 4 + i));
            }
            assert_eq!(ring.pop(), None);
        }
    }

    #[test]
    fn drop_releases_unpopped_elements() {
        use std::sync::atomic::{AtomicUsize as Counter, Ordering as O};
        static DROPS: Counter = Counter::new(0);

        struct Tracked;
        impl Drop for Tracked {
            fn drop(&mut self) {
                DROPS.fetch_add(1, O::SeqCst);
            }
        }

        DROPS.store(0, O::SeqCst);
        {
            let ring = MpscRing::<Tracked>::with_capacity(4).unwrap();
            ring.push(Tracked);
            ring.push(Tracked);
            let _ = ring.pop();
            // one popped-and-dropped, one still resident when `ring` drops
        }
        assert_eq!(DROPS.load(O::SeqCst), 2);
    }

    #[test]
    fn rejects_non_power_of_two_capacity() {
        assert_eq!(
            MpscRing::<u64>::with_capacity(5).unwrap_err(),
            ConfigError::CapacityNotPowerOfTwo { capacity: 5 }
        );
    }

    #[test]
    fn modulus_exception_capacity_wraps_correctly() {
        let ring = MpscRing::<u64>::with_capacity(10240).unwrap();
        for i in 0..10240 {
            assert_eq!(ring.push(i), PushOutcome::Success);
        }
        assert_eq!(ring.push(99), PushOutcome::Full);
        for i in 0..10240 {
            assert_eq!(ring.pop(), Some(i));
        }
        // a second lap exercises the wraparound index path
        for i in 10240..10245 {
            assert_eq!(ring.push(i), PushOutcome::Success);
        }
        for i in 10240..10245 {
            assert_eq!(ring.pop(), Some(i));
        }
    }
}
