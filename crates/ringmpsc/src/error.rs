use thiserror::Error;

/// Construction-time failures for [`crate::Config`] / [`crate::MpscRing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `capacity < 2`; a one-slot (or zero-slot) ring cannot distinguish
    /// "empty" from "full" under the sequence-number protocol.
    #[error("ring capacity {capacity} is too small (minimum 2)")]
    CapacityTooSmall {
        /// The rejected capacity.
        capacity: usize,
    },
    /// `capacity` is not a power of two. The bit-mask index path requires
    /// it; the one documented exception is `10240`, used by the benchmark
    /// CLI, which falls back to a modulus instead.
    #[error("ring capacity {capacity} is not a power of two")]
    CapacityNotPowerOfTwo {
        /// The rejected capacity.
        capacity: usize,
    },
}
