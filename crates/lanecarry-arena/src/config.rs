//! Arena configuration parameters.

use lanecarry_core::{LANES, LIMB_BYTES};

use crate::error::ArenaError;

/// Configuration for the limb arena.
///
/// Validated by [`ArenaConfig::validate`] when the arena is constructed;
/// all values are immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing region in bytes.
    ///
    /// Default: 32 MiB. Must be a non-zero multiple of one lane-group
    /// (64 bytes).
    pub capacity_bytes: usize,

    /// Allocation offsets are rounded up to a multiple of this many limbs,
    /// measured from the start of the region.
    ///
    /// Default: 8 (one 512-bit lane-group). Must be a power of two.
    /// Set to 1 for a plain unaligned bump pointer.
    pub align_limbs: usize,
}

impl ArenaConfig {
    /// Default region size: 32 MiB.
    pub const DEFAULT_CAPACITY_BYTES: usize = 1 << 25;

    /// Default allocation alignment: one full lane-group.
    pub const DEFAULT_ALIGN_LIMBS: usize = LANES;

    /// Create a config with the given capacity and default alignment.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            align_limbs: Self::DEFAULT_ALIGN_LIMBS,
        }
    }

    /// Set the allocation alignment in limbs.
    pub fn with_align_limbs(mut self, align_limbs: usize) -> Self {
        self.align_limbs = align_limbs;
        self
    }

    /// Capacity of the region in limbs.
    pub fn capacity_limbs(&self) -> usize {
        self.capacity_bytes / LIMB_BYTES
    }

    /// Usage level above which the next release recycles the region.
    pub fn watermark_bytes(&self) -> usize {
        self.capacity_bytes / 2
    }

    /// Check the invariants documented on each field.
    pub fn validate(&self) -> Result<(), ArenaError> {
        let group_bytes = LANES * LIMB_BYTES;
        if self.capacity_bytes == 0 || self.capacity_bytes % group_bytes != 0 {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "capacity_bytes must be a non-zero multiple of {group_bytes} (got {})",
                    self.capacity_bytes
                ),
            });
        }
        if !self.align_limbs.is_power_of_two() {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "align_limbs must be a power of two (got {})",
                    self.align_limbs
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY_BYTES)
    }
}
