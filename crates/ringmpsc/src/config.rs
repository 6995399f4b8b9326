use crate::error::ConfigError;

/// The one documented non-power-of-two capacity the benchmark CLI is
/// allowed to request. Every other capacity must be a power of two.
const MODULUS_EXCEPTION_CAPACITY: usize = 10240;

/// Configuration for [`crate::MpscRing`].
///
/// Owns the validation the ring needs at construction time: the capacity
/// must be at least 2 and a power of two, with a single named exception
/// (`10240`, used by the benchmark CLI) that falls back to a plain modulus
/// instead of the bit-mask index path. See `DESIGN.md` for why that one
/// exception exists instead of a second general-purpose index strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    capacity: usize,
    /// `Some(mask)` for the bit-mask index path, `None` only for the
    /// `10240` exception, which uses a modulus instead.
    mask: Option<usize>,
}

impl Config {
    /// Creates a configuration for the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is invalid. Use [`Config::try_new`] when the
    /// capacity comes from outside the program (CLI flags, config files)
    /// and a typed error is preferable to a panic.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(config) => config,
            Err(ConfigError::CapacityTooSmall { capacity }) => {
                panic!("ring capacity {capacity} is too small (minimum 2)")
            }
            Err(ConfigError::CapacityNotPowerOfTwo { capacity }) => {
                panic!("ring capacity {capacity} is not a power of two")
            }
        }
    }

    /// Creates a configuration for the given capacity, returning a typed
    /// error instead of panicking when the capacity is invalid.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity < 2 {
            return Err(ConfigError::CapacityTooSmall { capacity });
        }

        if capacity.is_power_of_two() {
            return Ok(Self {
                capacity,
                mask: Some(capacity - 1),
            });
        }

        if capacity == MODULUS_EXCEPTION_CAPACITY {
            return Ok(Self {
                capacity,
                mask: None,
            });
        }

        Err(ConfigError::CapacityNotPowerOfTwo { capacity })
    }

    /// The ring's fixed capacity, in elements.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maps a logical position to a slot index.
    #[inline]
    pub(crate) fn index(&self, pos: usize) -> usize {
        match self.mask {
            Some(mask) => pos & mask,
            None => pos % self.capacity,
        }
    }
}
