//! The contiguous limb region behind the arena.
//!
//! A [`Region`] is a fixed-capacity `Vec<u64>` with a bump cursor. Every
//! limb at or beyond the cursor is zero: the region starts zeroed and
//! [`Region::recycle`] zeroes it again, so fresh allocations never need
//! an explicit fill.

use std::ops::Range;

use lanecarry_core::{Limb, LIMB_BYTES};

use crate::error::ArenaError;

/// A single contiguous limb region with bump allocation.
pub struct Region {
    /// Backing storage. Allocated to full capacity at creation.
    data: Vec<Limb>,
    /// Bump pointer: next free position (in limbs).
    cursor: usize,
    /// Offsets are rounded up to a multiple of this many limbs.
    align: usize,
}

impl Region {
    /// Create a zeroed region of `capacity` limbs.
    ///
    /// `align` must be a power of two. Returns
    /// `Err(ArenaError::CapacityExceeded)` if the buffer cannot be
    /// allocated.
    pub fn new(capacity: usize, align: usize) -> Result<Self, ArenaError> {
        debug_assert!(align.is_power_of_two());
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| ArenaError::CapacityExceeded {
                requested: capacity.saturating_mul(LIMB_BYTES),
                available: 0,
                capacity: capacity.saturating_mul(LIMB_BYTES),
            })?;
        data.resize(capacity, 0);
        Ok(Self {
            data,
            cursor: 0,
            align,
        })
    }

    /// Bump-allocate `len` limbs.
    ///
    /// Returns the offset of the new buffer, or `None` if the aligned
    /// request does not fit in the remaining capacity.
    pub fn alloc(&mut self, len: usize) -> Option<usize> {
        let offset = self.cursor.checked_next_multiple_of(self.align)?;
        let new_cursor = offset.checked_add(len)?;
        if new_cursor > self.data.len() {
            return None;
        }
        self.cursor = new_cursor;
        Some(offset)
    }

    /// Whether `range` lies inside the allocated part of the region.
    pub fn contains(&self, range: &Range<usize>) -> bool {
        range.start <= range.end && range.end <= self.cursor
    }

    /// Get a shared slice over `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` exceeds the region's capacity.
    pub fn slice(&self, range: Range<usize>) -> &[Limb] {
        &self.data[range]
    }

    /// Get a mutable slice over `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` exceeds the region's capacity.
    pub fn slice_mut(&mut self, range: Range<usize>) -> &mut [Limb] {
        &mut self.data[range]
    }

    /// Borrow one mutable and two shared slices at once.
    ///
    /// `out` must not overlap `lhs` or `rhs`; `lhs` and `rhs` may be
    /// identical.
    ///
    /// # Panics
    ///
    /// Panics if any range exceeds the region's capacity.
    pub fn split_mut(
        &mut self,
        out: Range<usize>,
        lhs: Range<usize>,
        rhs: Range<usize>,
    ) -> (&mut [Limb], &[Limb], &[Limb]) {
        debug_assert!(lhs.is_empty() || lhs.end <= out.start || lhs.start >= out.end);
        debug_assert!(rhs.is_empty() || rhs.end <= out.start || rhs.start >= out.end);
        let split = out.start;
        let gap = out.end;
        let (head, tail) = self.data.split_at_mut(split);
        let (out_slice, rest) = tail.split_at_mut(gap - split);
        let head: &[Limb] = head;
        let rest: &[Limb] = rest;
        let lhs = pick(head, rest, split, gap, lhs);
        let rhs = pick(head, rest, split, gap, rhs);
        (out_slice, lhs, rhs)
    }

    /// Zero the whole region and rewind the bump pointer.
    ///
    /// All previous allocations become invalid.
    pub fn recycle(&mut self) {
        self.data.fill(0);
        self.cursor = 0;
    }

    /// Number of limbs currently allocated, including alignment padding.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Total capacity in limbs.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Remaining free capacity in limbs.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Read-only view of the whole backing store, allocated or not.
    pub fn raw(&self) -> &[Limb] {
        &self.data
    }
}

/// Resolve `range` against the two halves left over after carving out the
/// output range `split..gap`.
fn pick<'a>(
    head: &'a [Limb],
    rest: &'a [Limb],
    split: usize,
    gap: usize,
    range: Range<usize>,
) -> &'a [Limb] {
    if range.is_empty() {
        &[]
    } else if range.end <= split {
        &head[range]
    } else {
        &rest[range.start - gap..range.end - gap]
    }
}
