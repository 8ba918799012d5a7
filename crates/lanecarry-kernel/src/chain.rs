//! The [`CarryChain`] policy trait and the group-chaining drivers.
//!
//! A driver walks the operands in full lane-groups of `W` limbs followed by
//! at most one partial tail group, feeding each group's carry-out into the
//! next group's carry-in. The policy decides how much intra-group
//! correction a group performs.

use std::cmp::Ordering;

use lanecarry_core::{KernelError, Limb};

use crate::compare::compare_magnitudes;
use crate::group::LaneGroup;

/// Per-group carry policy.
///
/// Implementors turn two loaded lane-groups and an incoming carry (or
/// borrow) into a result group and an outgoing carry (or borrow).
pub trait CarryChain {
    /// Whether the policy produces exact results for every input.
    const EXACT: bool;

    /// Short name used in diagnostics and benchmark labels.
    const NAME: &'static str;

    /// Add one group: `a + b + carry_in`.
    fn add_group<const W: usize>(
        a: &LaneGroup<W>,
        b: &LaneGroup<W>,
        carry_in: bool,
    ) -> (LaneGroup<W>, bool);

    /// Subtract one group: `a - b - borrow_in`.
    fn sub_group<const W: usize>(
        a: &LaneGroup<W>,
        b: &LaneGroup<W>,
        borrow_in: bool,
    ) -> (LaneGroup<W>, bool);
}

/// Validate operand and result lengths. Returns the operand length.
pub fn check_operands(out: usize, lhs: usize, rhs: usize) -> Result<usize, KernelError> {
    if lhs != rhs {
        return Err(KernelError::LengthMismatch { lhs, rhs });
    }
    if out < lhs {
        return Err(KernelError::ResultTooShort {
            required: lhs,
            available: out,
        });
    }
    Ok(lhs)
}

/// Add `a + b` into `out[..a.len()]` in groups of `W` lanes.
///
/// Returns the final carry-out. Zero-length operands are a no-op with no
/// carry.
pub fn add_chain<C: CarryChain, const W: usize>(
    out: &mut [Limb],
    a: &[Limb],
    b: &[Limb],
) -> Result<bool, KernelError> {
    let n = check_operands(out.len(), a.len(), b.len())?;
    let mut carry = false;
    for ((dst, a), b) in out[..n].chunks_mut(W).zip(a.chunks(W)).zip(b.chunks(W)) {
        let (sum, carry_out) =
            C::add_group(&LaneGroup::<W>::load(a), &LaneGroup::<W>::load(b), carry);
        sum.store(dst);
        carry = carry_out;
    }
    Ok(carry)
}

/// Subtract `a - b` into `out[..a.len()]` in groups of `W` lanes.
///
/// Returns the final borrow-out, which is set iff `b > a` (for exact
/// policies), in which case `out` holds the two's-complement wrap.
pub fn sub_chain<C: CarryChain, const W: usize>(
    out: &mut [Limb],
    a: &[Limb],
    b: &[Limb],
) -> Result<bool, KernelError> {
    let n = check_operands(out.len(), a.len(), b.len())?;
    let mut borrow = false;
    for ((dst, a), b) in out[..n].chunks_mut(W).zip(a.chunks(W)).zip(b.chunks(W)) {
        let (diff, borrow_out) =
            C::sub_group(&LaneGroup::<W>::load(a), &LaneGroup::<W>::load(b), borrow);
        diff.store(dst);
        borrow = borrow_out;
    }
    Ok(borrow)
}

/// Subtract the smaller magnitude from the larger one.
///
/// Returns how `a` compares to `b`. On [`Ordering::Less`], `out` holds
/// `b - a`; on [`Ordering::Greater`], `a - b`; on [`Ordering::Equal`],
/// zero. The magnitude comparison itself is always exact.
pub fn sub_magnitudes<C: CarryChain, const W: usize>(
    out: &mut [Limb],
    a: &[Limb],
    b: &[Limb],
) -> Result<Ordering, KernelError> {
    let n = check_operands(out.len(), a.len(), b.len())?;
    let ordering = compare_magnitudes(a, b);
    match ordering {
        Ordering::Equal => out[..n].fill(0),
        Ordering::Greater => {
            sub_chain::<C, W>(out, a, b)?;
        }
        Ordering::Less => {
            sub_chain::<C, W>(out, b, a)?;
        }
    }
    Ok(ordering)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::Exact;
    use lanecarry_core::LANES;

    #[test]
    fn check_operands_reports_mismatch() {
        assert_eq!(
            check_operands(8, 8, 4),
            Err(KernelError::LengthMismatch { lhs: 8, rhs: 4 })
        );
        assert_eq!(
            check_operands(2, 4, 4),
            Err(KernelError::ResultTooShort {
                required: 4,
                available: 2
            })
        );
        assert_eq!(check_operands(9, 8, 8), Ok(8));
    }

    #[test]
    fn policies_declare_exactness() {
        assert!(Exact::EXACT);
        assert!(!crate::approx::Approx::EXACT);
        assert_ne!(Exact::NAME, crate::approx::Approx::NAME);
    }

    #[test]
    fn zero_length_is_a_no_op() {
        let mut out: [Limb; 0] = [];
        assert_eq!(add_chain::<Exact, LANES>(&mut out, &[], &[]), Ok(false));
        assert_eq!(sub_chain::<Exact, LANES>(&mut out, &[], &[]), Ok(false));
    }

    #[test]
    fn longer_result_buffer_keeps_its_tail() {
        let mut out = [7u64; 4];
        add_chain::<Exact, LANES>(&mut out, &[1, 2], &[3, 4]).unwrap();
        assert_eq!(out, [4, 6, 7, 7]);
    }

    #[test]
    fn carry_crosses_group_boundary() {
        // Group 0 is all-ones; the +1 must reach limb 8 in group 1.
        let mut a = vec![u64::MAX; 8];
        a.push(5);
        let mut b = vec![0; 9];
        b[0] = 1;
        let mut out = vec![0; 9];
        let carry = add_chain::<Exact, LANES>(&mut out, &a, &b).unwrap();
        assert!(!carry);
        assert_eq!(&out[..8], &[0; 8]);
        assert_eq!(out[8], 6);
    }

    #[test]
    fn sub_magnitudes_orders_operands() {
        let mut out = [0u64; 2];
        let ord = sub_magnitudes::<Exact, LANES>(&mut out, &[1, 0], &[0, 1]).unwrap();
        assert_eq!(ord, Ordering::Less);
        // 2^64 - 1
        assert_eq!(out, [u64::MAX, 0]);

        let ord = sub_magnitudes::<Exact, LANES>(&mut out, &[3, 3], &[3, 3]).unwrap();
        assert_eq!(ord, Ordering::Equal);
        assert_eq!(out, [0, 0]);
    }
}
