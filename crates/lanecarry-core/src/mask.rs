//! The [`LaneMask`] bitset for per-lane carry and borrow tracking.
//!
//! Bit `i` refers to lane `i` of a lane-group. Masks are wider than any
//! lane-group so that shifting the top lane's carry up by one position
//! leaves it observable as the group carry-out.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor};

/// A set of lanes within one lane-group, one bit per lane.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LaneMask(u32);

impl LaneMask {
    /// Number of lane positions a mask can address.
    pub const CAPACITY: usize = 32;

    /// The empty mask.
    pub const EMPTY: LaneMask = LaneMask(0);

    /// Build a mask from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits of the mask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The mask of the lowest `lanes` lanes (the active lanes of a group).
    ///
    /// # Panics
    ///
    /// Panics if `lanes` exceeds [`LaneMask::CAPACITY`] - 1.
    pub fn first(lanes: usize) -> Self {
        assert!(
            lanes < Self::CAPACITY,
            "lane count {lanes} exceeds mask capacity"
        );
        Self((1u32 << lanes) - 1)
    }

    /// A mask with only `lane` set.
    pub fn lane(lane: usize) -> Self {
        debug_assert!(lane < Self::CAPACITY);
        Self(1u32 << lane)
    }

    /// A mask with lane 0 set iff `bit` is true. Used to inject a
    /// carry-in from the previous group.
    pub fn carry_in(bit: bool) -> Self {
        Self(bit as u32)
    }

    /// Whether `lane` is set.
    pub fn contains(self, lane: usize) -> bool {
        lane < Self::CAPACITY && (self.0 >> lane) & 1 == 1
    }

    /// Set `lane`.
    pub fn insert(&mut self, lane: usize) {
        debug_assert!(lane < Self::CAPACITY);
        self.0 |= 1u32 << lane;
    }

    /// Whether no lane is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of lanes set.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Move every lane's bit one lane up, so lane `i`'s carry lands on
    /// lane `i + 1`.
    pub fn shift_up(self) -> Self {
        Self(self.0 << 1)
    }

    /// Integer addition of two masks.
    ///
    /// Adding a generate mask to a propagate mask ripples each generated
    /// bit through every run of set propagate bits above it; this is the
    /// carry-lookahead step of the lane-group kernels.
    pub fn ripple(self, propagate: LaneMask) -> Self {
        Self(self.0.wrapping_add(propagate.0))
    }

    /// Whether the bit at position `lane` is set; used to read a carry-out
    /// that has been shifted above the group's highest lane.
    pub fn bit(self, lane: usize) -> bool {
        self.contains(lane)
    }

    /// Iterate over the set lanes in ascending order.
    pub fn iter(self) -> LaneMaskIter {
        LaneMaskIter { bits: self.0 }
    }
}

impl BitOr for LaneMask {
    type Output = LaneMask;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for LaneMask {
    type Output = LaneMask;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitXor for LaneMask {
    type Output = LaneMask;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl fmt::Debug for LaneMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LaneMask({:#b})", self.0)
    }
}

impl FromIterator<usize> for LaneMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut mask = Self::EMPTY;
        for lane in iter {
            mask.insert(lane);
        }
        mask
    }
}

/// Iterator over the lanes of a [`LaneMask`], lowest lane first.
pub struct LaneMaskIter {
    bits: u32,
}

impl Iterator for LaneMaskIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let lane = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(lane)
    }
}
