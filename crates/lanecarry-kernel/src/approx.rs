//! Approximate carry-chain kernel.
//!
//! Only the first correction level runs: per-lane overflow (or borrow) is
//! detected, shifted up one lane, and injected. A lane that wraps because
//! of that injection does not pass its own carry on, so a carry that has to
//! pass through a saturated lane (an exhausted lane, for subtraction) stops
//! there. The lanes the dropped carry would have reached are off by one;
//! nothing else changes.
//!
//! Each group's carry-out is the first-level overflow of its top active
//! lane. Operands of at most [`NARROW_LANES`] limbs run as one narrow group
//! with no chaining.
//!
//! The magnitude comparison in [`sub_magnitudes`] is exact; only the borrow
//! chain applied afterwards is approximate.

use std::cmp::Ordering;

use lanecarry_core::{KernelError, LaneMask, Limb, LANES, NARROW_LANES};

use crate::chain::{self, CarryChain};
use crate::group::LaneGroup;

/// The approximate, first-level-only carry policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Approx;

impl CarryChain for Approx {
    const EXACT: bool = false;
    const NAME: &'static str = "approx";

    fn add_group<const W: usize>(
        a: &LaneGroup<W>,
        b: &LaneGroup<W>,
        carry_in: bool,
    ) -> (LaneGroup<W>, bool) {
        let (mut sum, overflow) = a.overflowing_add(b);
        let carry_out = overflow.bit(a.active() - 1);
        sum.increment(overflow.shift_up() | LaneMask::carry_in(carry_in));
        (sum, carry_out)
    }

    fn sub_group<const W: usize>(
        a: &LaneGroup<W>,
        b: &LaneGroup<W>,
        borrow_in: bool,
    ) -> (LaneGroup<W>, bool) {
        let (mut diff, borrow) = a.overflowing_sub(b);
        let borrow_out = borrow.bit(a.active() - 1);
        diff.decrement(borrow.shift_up() | LaneMask::carry_in(borrow_in));
        (diff, borrow_out)
    }
}

fn is_narrow(len: usize) -> bool {
    len <= NARROW_LANES
}

/// Approximate `out = a + b`. Returns the first-level carry-out as 0 or 1.
pub fn add_words(out: &mut [Limb], a: &[Limb], b: &[Limb]) -> Result<u64, KernelError> {
    let carry = if is_narrow(a.len()) {
        chain::add_chain::<Approx, NARROW_LANES>(out, a, b)?
    } else {
        chain::add_chain::<Approx, LANES>(out, a, b)?
    };
    Ok(u64::from(carry))
}

/// Approximate `out = a - b`. Returns the first-level borrow-out as 0 or 1.
pub fn sub_words(out: &mut [Limb], a: &[Limb], b: &[Limb]) -> Result<u64, KernelError> {
    let borrow = if is_narrow(a.len()) {
        chain::sub_chain::<Approx, NARROW_LANES>(out, a, b)?
    } else {
        chain::sub_chain::<Approx, LANES>(out, a, b)?
    };
    Ok(u64::from(borrow))
}

/// Exact comparison followed by an approximate larger-minus-smaller.
pub fn sub_magnitudes(out: &mut [Limb], a: &[Limb], b: &[Limb]) -> Result<Ordering, KernelError> {
    if is_narrow(a.len()) {
        chain::sub_magnitudes::<Approx, NARROW_LANES>(out, a, b)
    } else {
        chain::sub_magnitudes::<Approx, LANES>(out, a, b)
    }
}
