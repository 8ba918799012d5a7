//! One lane-group of limbs, the unit every kernel step operates on.
//!
//! [`LaneGroup`] is a portable stand-in for a `W × 64`-bit vector
//! register: a fixed array of lanes plus an active-lane count. Loads and
//! stores are masked to the active lanes, so a trailing partial group
//! never touches memory past the end of an operand. Inactive lanes read
//! as zero.

use lanecarry_core::{LaneMask, Limb, LIMB_MAX};

/// `W` limbs processed together, of which the lowest `active` are live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneGroup<const W: usize> {
    lanes: [Limb; W],
    active: usize,
}

impl<const W: usize> LaneGroup<W> {
    /// Masked load: lanes `0..src.len()` come from `src`, the rest are zero.
    ///
    /// # Panics
    ///
    /// Panics if `src` is empty or longer than `W`.
    pub fn load(src: &[Limb]) -> Self {
        assert!(
            !src.is_empty() && src.len() <= W,
            "lane-group load of {} limbs into {W} lanes",
            src.len()
        );
        let mut lanes = [0; W];
        lanes[..src.len()].copy_from_slice(src);
        Self {
            lanes,
            active: src.len(),
        }
    }

    /// Masked store of the active lanes into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len()` differs from the active lane count.
    pub fn store(&self, dst: &mut [Limb]) {
        dst.copy_from_slice(&self.lanes[..self.active]);
    }

    /// Number of active lanes.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Mask of the active lanes.
    pub fn active_mask(&self) -> LaneMask {
        LaneMask::first(self.active)
    }

    /// The lanes as a slice, inactive lanes included.
    pub fn lanes(&self) -> &[Limb; W] {
        &self.lanes
    }

    /// Lane-wise wrapping sum. Returns the sum and the mask of lanes whose
    /// 64-bit addition overflowed (sum less than the `self` lane).
    pub fn overflowing_add(&self, rhs: &Self) -> (Self, LaneMask) {
        let mut sum = *self;
        let mut overflow = LaneMask::EMPTY;
        for i in 0..W {
            sum.lanes[i] = self.lanes[i].wrapping_add(rhs.lanes[i]);
            if sum.lanes[i] < self.lanes[i] {
                overflow.insert(i);
            }
        }
        (sum, overflow)
    }

    /// Lane-wise wrapping difference. Returns the difference and the mask
    /// of lanes that borrowed (`rhs` lane greater than `self` lane).
    pub fn overflowing_sub(&self, rhs: &Self) -> (Self, LaneMask) {
        let mut diff = *self;
        let mut borrow = LaneMask::EMPTY;
        for i in 0..W {
            diff.lanes[i] = self.lanes[i].wrapping_sub(rhs.lanes[i]);
            if rhs.lanes[i] > self.lanes[i] {
                borrow.insert(i);
            }
        }
        (diff, borrow)
    }

    /// Add one to every active lane in `mask`. Returns the lanes that
    /// wrapped from `u64::MAX` to zero.
    pub fn increment(&mut self, mask: LaneMask) -> LaneMask {
        let mut wrapped = LaneMask::EMPTY;
        for i in (mask & self.active_mask()).iter() {
            let (v, o) = self.lanes[i].overflowing_add(1);
            self.lanes[i] = v;
            if o {
                wrapped.insert(i);
            }
        }
        wrapped
    }

    /// Subtract one from every active lane in `mask`. Returns the lanes
    /// that wrapped from zero to `u64::MAX`.
    pub fn decrement(&mut self, mask: LaneMask) -> LaneMask {
        let mut wrapped = LaneMask::EMPTY;
        for i in (mask & self.active_mask()).iter() {
            let (v, o) = self.lanes[i].overflowing_sub(1);
            self.lanes[i] = v;
            if o {
                wrapped.insert(i);
            }
        }
        wrapped
    }

    /// Active lanes holding `value`.
    pub fn lanes_equal(&self, value: Limb) -> LaneMask {
        let mut mask = LaneMask::EMPTY;
        for (i, &lane) in self.lanes[..self.active].iter().enumerate() {
            if lane == value {
                mask.insert(i);
            }
        }
        mask
    }

    /// Active lanes that would pass an incoming carry straight through.
    pub fn saturated(&self) -> LaneMask {
        self.lanes_equal(LIMB_MAX)
    }

    /// Active lanes that would pass an incoming borrow straight through.
    pub fn exhausted(&self) -> LaneMask {
        self.lanes_equal(0)
    }
}
