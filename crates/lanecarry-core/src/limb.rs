//! Limb and lane-group constants.
//!
//! A limb is one 64-bit word of a multi-word magnitude, stored
//! least-significant first. Kernels process limbs in lane-groups of
//! [`LANES`] words, the width of a 512-bit vector register. Lane widths are
//! compile-time constants; no kernel reads mutable shared state.

/// One word of a multi-word magnitude.
pub type Limb = u64;

/// Bits per limb.
pub const LIMB_BITS: usize = 64;

/// Bytes per limb.
pub const LIMB_BYTES: usize = std::mem::size_of::<Limb>();

/// Hex digits per limb.
pub const HEX_DIGITS_PER_LIMB: usize = LIMB_BITS / 4;

/// The maximum limb value (all bits set). Adding one to it wraps to zero.
pub const LIMB_MAX: Limb = Limb::MAX;

/// Limbs per full-width lane-group (512-bit vector).
pub const LANES: usize = 8;

/// Limbs per narrow lane-group (256-bit vector), used by the approximate
/// kernel for operands that fit in a single narrow group.
pub const NARROW_LANES: usize = 4;

/// Number of limbs needed to hold `digits` hex digits.
///
/// Computes `ceil(digits * 4 / 64)`.
pub const fn limbs_for_hex_digits(digits: usize) -> usize {
    digits.div_ceil(HEX_DIGITS_PER_LIMB)
}
