//! The big-integer value type.

use lanecarry_arena::LimbHandle;

/// A sign-and-magnitude integer whose limbs live in a session arena.
///
/// A `LimbInt` is a descriptor: the limbs themselves are owned by the
/// [`Session`](crate::Session) that produced it and are reached through
/// it. The buffer stays valid until the arena next recycles or the session
/// is torn down; after that every access reports a stale handle.
///
/// Not `Clone`: each value owns exactly one buffer, so a result can never
/// alias one of its operands.
#[derive(Debug, PartialEq, Eq)]
pub struct LimbInt {
    pub(crate) handle: Option<LimbHandle>,
    pub(crate) size: usize,
    /// True when the magnitude is negated.
    pub sign: bool,
    /// Set by the most recent addition when the sum overflowed the top
    /// limb. The buffer is not grown to hold the extra bit.
    pub carry: bool,
}

impl LimbInt {
    pub(crate) fn new(handle: LimbHandle) -> Self {
        Self {
            size: handle.len(),
            handle: Some(handle),
            sign: false,
            carry: false,
        }
    }

    /// Number of limbs.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the value has been shrunk to zero limbs.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The arena handle backing this value, if it owns a buffer.
    pub fn handle(&self) -> Option<&LimbHandle> {
        self.handle.as_ref()
    }
}
