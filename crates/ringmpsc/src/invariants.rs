//! Debug-only assertion macros for the sequence-number protocol.
//!
//! Every check here is `debug_assert!`-gated, so it costs nothing in
//! release builds. They exist to turn a protocol bug (a mis-ordered
//! atomic, a sign error in the `diff` computation) into an immediate
//! panic at the point of corruption instead of a silent, much-later
//! data race.

/// INV-SEQ-01: at most `capacity` committed, un-popped elements exist.
///
/// Checked with the producer's own relaxed snapshot of `tail` right after
/// a successful CAS on `head`; this is inherently racy against concurrent
/// pops (the real invariant is enforced by the CAS protocol itself), so
/// this assertion is a sanity net, not a proof.
macro_rules! debug_assert_bounded_count {
    ($new_head:expr, $tail:expr, $capacity:expr) => {
        debug_assert!(
            $new_head.wrapping_sub($tail) <= $capacity,
            "INV-SEQ-01 violated: head {} outruns tail {} by more than capacity {}",
            $new_head,
            $tail,
            $capacity
        )
    };
}

/// INV-SEQ-02: `head`/`tail` only ever increase (mod the word width).
macro_rules! debug_assert_monotonic {
    ($name:literal, $old:expr, $new:expr) => {
        debug_assert!(
            $new.wrapping_sub($old) < usize::MAX / 2,
            "INV-SEQ-02 violated: {} moved backwards from {} to {}",
            $name,
            $old,
            $new
        )
    };
}

/// INV-SEQ-04: the sequence/position `diff` a producer or consumer observes
/// must be small in magnitude — anything else indicates the cell's sequence
/// word was corrupted (written outside the protocol) rather than simply
/// "ahead" or "behind" by a normal race.
macro_rules! debug_assert_plausible_diff {
    ($diff:expr, $capacity:expr) => {
        debug_assert!(
            $diff.unsigned_abs() as usize <= $capacity,
            "INV-SEQ-04 violated: sequence diff {} exceeds capacity {}",
            $diff,
            $capacity
        )
    };
}

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_monotonic;
pub(crate) use debug_assert_plausible_diff;
