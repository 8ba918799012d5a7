//! Limb buffer handles.
//!
//! A [`LimbHandle`] encodes where a buffer lives in the arena region and
//! which epoch issued it. The epoch allows O(1) staleness checks without a
//! lookup table.

use std::fmt;
use std::ops::Range;

use lanecarry_core::Epoch;

/// Location of a limb buffer within the arena.
///
/// Handles are plain data: copying one does not duplicate the buffer, and
/// dropping one does not free it. Only the arena can resolve a handle to a
/// slice, and it refuses to do so once the handle's epoch has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct LimbHandle {
    /// Arena epoch when this allocation was made.
    pub(crate) epoch: Epoch,
    /// Start of the buffer, in limbs from the start of the region.
    pub(crate) offset: usize,
    /// Length of the buffer in limbs.
    pub(crate) len: usize,
}

impl LimbHandle {
    pub(crate) fn new(epoch: Epoch, offset: usize, len: usize) -> Self {
        Self { epoch, offset, len }
    }

    /// The epoch this handle belongs to.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Offset of the buffer in limbs.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the buffer in limbs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length buffer.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The limb range this handle covers.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Whether two handles share at least one limb.
    pub fn overlaps(&self, other: &LimbHandle) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.offset < other.offset + other.len
            && other.offset < self.offset + self.len
    }
}

impl fmt::Display for LimbHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LimbHandle(epoch={}, off={}, len={})",
            self.epoch, self.offset, self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_accessors() {
        let h = LimbHandle::new(Epoch(4), 16, 8);
        assert_eq!(h.epoch(), Epoch(4));
        assert_eq!(h.offset(), 16);
        assert_eq!(h.len(), 8);
        assert_eq!(h.range(), 16..24);
        assert!(!h.is_empty());
    }

    #[test]
    fn overlap_detection() {
        let a = LimbHandle::new(Epoch(0), 0, 8);
        let b = LimbHandle::new(Epoch(0), 8, 8);
        let c = LimbHandle::new(Epoch(0), 4, 8);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn empty_handle_overlaps_nothing() {
        let empty = LimbHandle::new(Epoch(0), 4, 0);
        let a = LimbHandle::new(Epoch(0), 0, 8);
        assert!(empty.is_empty());
        assert!(!empty.overlaps(&a));
    }
}
