//! The session-scoped limb arena.
//!
//! [`LimbArena`] owns one [`Region`] between `init()` and `teardown()`.
//! The lifecycle is:
//! 1. `new(config)`: validate the config; the arena starts uninitialised
//! 2. `init()`: allocate and zero the region
//! 3. `alloc()` / `release()` / `limbs()`: bump allocation and access
//! 4. `teardown()`: drop the region and retire the current epoch
//!
//! Releases are not precise frees. A release that finds the bump pointer
//! above the watermark (half of capacity) zeroes the region, rewinds it,
//! and advances the epoch, retiring every outstanding handle at once.

use lanecarry_core::{Epoch, Limb, LIMB_BYTES};
use tracing::{debug, trace, warn};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::LimbHandle;
use crate::region::Region;

/// Outcome of [`LimbArena::release`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Usage is below the watermark; the buffer stays in place until the
    /// next recycle.
    Deferred,
    /// The release crossed the watermark and recycled the region. Every
    /// handle issued before the release is now stale.
    Recycled {
        /// The epoch the arena moved into.
        epoch: Epoch,
    },
    /// The handle was already stale; its memory had been reclaimed by an
    /// earlier recycle or teardown.
    AlreadyStale,
}

/// Epoch-checked bump arena for limb buffers.
///
/// Not thread-safe and not reentrant: one arena serves one session, and
/// `&mut self` on every mutating call enforces exclusive use.
pub struct LimbArena {
    /// Arena configuration.
    config: ArenaConfig,
    /// Backing region; `None` while uninitialised.
    region: Option<Region>,
    /// Current epoch; advanced on every recycle and teardown.
    epoch: Epoch,
    /// How many times the region has been recycled.
    recycle_count: u64,
}

impl LimbArena {
    /// Create an uninitialised arena.
    ///
    /// Returns `Err(ArenaError::InvalidConfig)` if the config violates its
    /// documented invariants.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            config,
            region: None,
            epoch: Epoch::INITIAL,
            recycle_count: 0,
        })
    }

    /// Create and initialise an arena in one step.
    pub fn initialised(config: ArenaConfig) -> Result<Self, ArenaError> {
        let mut arena = Self::new(config)?;
        arena.init()?;
        Ok(arena)
    }

    /// Allocate and zero the backing region.
    ///
    /// Returns `Err(ArenaError::CapacityExceeded)` if the configured
    /// capacity cannot be allocated.
    pub fn init(&mut self) -> Result<(), ArenaError> {
        if self.region.is_some() {
            return Err(ArenaError::AlreadyInitialised);
        }
        self.region = Some(Region::new(
            self.config.capacity_limbs(),
            self.config.align_limbs,
        )?);
        self.recycle_count = 0;
        debug!(
            epoch = self.epoch.0,
            capacity_bytes = self.config.capacity_bytes,
            "limb arena initialised"
        );
        Ok(())
    }

    /// Drop the backing region and retire the current epoch.
    ///
    /// Every handle issued so far becomes stale. The arena may be
    /// initialised again afterwards.
    pub fn teardown(&mut self) -> Result<(), ArenaError> {
        if self.region.take().is_none() {
            return Err(ArenaError::Uninitialised);
        }
        let retired = self.epoch;
        self.epoch = self.epoch.next().ok_or(ArenaError::EpochOverflow)?;
        debug!(
            retired_epoch = retired.0,
            recycle_count = self.recycle_count,
            "limb arena torn down"
        );
        Ok(())
    }

    /// Bump-allocate a zeroed buffer of `len` limbs.
    ///
    /// Returns `Err(ArenaError::CapacityExceeded)` if the aligned request
    /// does not fit in the remaining capacity.
    pub fn alloc(&mut self, len: usize) -> Result<LimbHandle, ArenaError> {
        let region = self.region.as_mut().ok_or(ArenaError::Uninitialised)?;
        let offset = region
            .alloc(len)
            .ok_or_else(|| ArenaError::CapacityExceeded {
                requested: len.saturating_mul(LIMB_BYTES),
                available: region.remaining() * LIMB_BYTES,
                capacity: region.capacity() * LIMB_BYTES,
            })?;
        trace!(epoch = self.epoch.0, offset, len, "limb buffer allocated");
        Ok(LimbHandle::new(self.epoch, offset, len))
    }

    /// Release a buffer.
    ///
    /// This is not a precise free. If the bump pointer is above the
    /// watermark, the whole region is zeroed and rewound and the epoch
    /// advances; see [`Release`]. Releasing a handle that is already stale
    /// is harmless and reported as [`Release::AlreadyStale`].
    pub fn release(&mut self, handle: LimbHandle) -> Result<Release, ArenaError> {
        let used_bytes = {
            let region = self.region.as_ref().ok_or(ArenaError::Uninitialised)?;
            region.used() * LIMB_BYTES
        };
        if handle.epoch != self.epoch {
            trace!(%handle, current_epoch = self.epoch.0, "release of stale handle");
            return Ok(Release::AlreadyStale);
        }
        if used_bytes <= self.config.watermark_bytes() {
            return Ok(Release::Deferred);
        }
        self.recycle()?;
        Ok(Release::Recycled { epoch: self.epoch })
    }

    /// Zero the region, rewind it, and advance the epoch.
    fn recycle(&mut self) -> Result<(), ArenaError> {
        let next = self.epoch.next().ok_or(ArenaError::EpochOverflow)?;
        let region = self.region.as_mut().ok_or(ArenaError::Uninitialised)?;
        let used_bytes = region.used() * LIMB_BYTES;
        region.recycle();
        self.epoch = next;
        self.recycle_count += 1;
        debug!(
            epoch = self.epoch.0,
            used_bytes,
            recycle_count = self.recycle_count,
            "limb arena recycled"
        );
        Ok(())
    }

    /// Check that `handle` can be resolved right now.
    pub fn check(&self, handle: &LimbHandle) -> Result<(), ArenaError> {
        let region = self.region.as_ref().ok_or(ArenaError::Uninitialised)?;
        if handle.epoch != self.epoch {
            warn!(%handle, current_epoch = self.epoch.0, "stale limb handle");
            return Err(ArenaError::StaleHandle {
                handle_epoch: handle.epoch,
                current_epoch: self.epoch,
            });
        }
        if !region.contains(&handle.range()) {
            return Err(ArenaError::OutOfBounds {
                offset: handle.offset,
                len: handle.len,
                used: region.used(),
            });
        }
        Ok(())
    }

    /// Whether `handle` belongs to the current epoch of an initialised arena.
    pub fn is_live(&self, handle: &LimbHandle) -> bool {
        self.region.is_some() && handle.epoch == self.epoch
    }

    /// Resolve a handle to its limbs.
    pub fn limbs(&self, handle: &LimbHandle) -> Result<&[Limb], ArenaError> {
        self.check(handle)?;
        let region = self.region.as_ref().ok_or(ArenaError::Uninitialised)?;
        Ok(region.slice(handle.range()))
    }

    /// Resolve a handle to its limbs for writing.
    pub fn limbs_mut(&mut self, handle: &LimbHandle) -> Result<&mut [Limb], ArenaError> {
        self.check(handle)?;
        let region = self.region.as_mut().ok_or(ArenaError::Uninitialised)?;
        Ok(region.slice_mut(handle.range()))
    }

    /// Resolve an output handle for writing and two input handles for
    /// reading, all at once.
    ///
    /// Returns `Err(ArenaError::Aliased)` if `out` overlaps either input.
    /// The two inputs may be the same handle.
    pub fn split_mut(
        &mut self,
        out: &LimbHandle,
        lhs: &LimbHandle,
        rhs: &LimbHandle,
    ) -> Result<(&mut [Limb], &[Limb], &[Limb]), ArenaError> {
        self.check(out)?;
        self.check(lhs)?;
        self.check(rhs)?;
        if out.overlaps(lhs) || out.overlaps(rhs) {
            return Err(ArenaError::Aliased);
        }
        let region = self.region.as_mut().ok_or(ArenaError::Uninitialised)?;
        Ok(region.split_mut(out.range(), lhs.range(), rhs.range()))
    }

    /// Shorten a live buffer in place to its low `len` limbs.
    ///
    /// The dropped high limbs stay allocated until the next recycle.
    /// Growing is not possible; `len` larger than the handle's length
    /// returns `Err(ArenaError::OutOfBounds)`.
    pub fn truncate(&self, handle: &LimbHandle, len: usize) -> Result<LimbHandle, ArenaError> {
        self.check(handle)?;
        if len > handle.len {
            return Err(ArenaError::OutOfBounds {
                offset: handle.offset,
                len,
                used: self.region.as_ref().map_or(0, Region::used),
            });
        }
        Ok(LimbHandle::new(handle.epoch, handle.offset, len))
    }

    /// Diagnostic view of the entire backing region, including limbs that
    /// belong to no live handle.
    pub fn raw(&self) -> Result<&[Limb], ArenaError> {
        self.region
            .as_ref()
            .map(Region::raw)
            .ok_or(ArenaError::Uninitialised)
    }

    /// The arena configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Whether the arena is between `init()` and `teardown()`.
    pub fn is_initialised(&self) -> bool {
        self.region.is_some()
    }

    /// The current epoch.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// How many times the region has been recycled since `init()`.
    pub fn recycle_count(&self) -> u64 {
        self.recycle_count
    }

    /// Bytes allocated in the current epoch, including alignment padding.
    pub fn used_bytes(&self) -> usize {
        self.region
            .as_ref()
            .map_or(0, |r| r.used() * LIMB_BYTES)
    }

    /// Total capacity in bytes.
    pub fn capacity_bytes(&self) -> usize {
        self.config.capacity_limbs() * LIMB_BYTES
    }

    /// Usage above which the next release recycles the region.
    pub fn watermark_bytes(&self) -> usize {
        self.config.watermark_bytes()
    }
}
