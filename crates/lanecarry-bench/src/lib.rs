//! Benchmark operand profiles for the lanecarry kernels.
//!
//! Every profile is deterministic in its seed so runs stay comparable:
//!
//! - [`Profile::Random`]: seeded random limbs with occasional boundary values
//! - [`Profile::FullCarry`]: all limbs saturated plus one, the worst case
//!   for the exact kernel's second correction level
//! - [`Profile::BorrowChain`]: a single high limb minus one

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lanecarry_test_utils::fixtures::{boundary_cases, limbs_for_bits, random_operands, Case};

pub use lanecarry_test_utils::BIT_SIZES;

/// Operand shape for a benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    /// Seeded random operands.
    Random,
    /// `u64::MAX` in every limb against `1`.
    FullCarry,
    /// `2^(64(n-1))` against `1`.
    BorrowChain,
}

impl Profile {
    /// Every profile, in report order.
    pub const ALL: [Profile; 3] = [Profile::Random, Profile::FullCarry, Profile::BorrowChain];

    /// Short label for benchmark IDs.
    pub fn label(self) -> &'static str {
        match self {
            Profile::Random => "random",
            Profile::FullCarry => "full_carry",
            Profile::BorrowChain => "borrow_chain",
        }
    }
}

/// Build operands of `bits` width for `profile`.
pub fn operands(profile: Profile, bits: usize, seed: u64) -> Case {
    let n = limbs_for_bits(bits);
    let key = match profile {
        Profile::Random => return random_operands(seed, n),
        Profile::FullCarry => "full_carry_chain",
        Profile::BorrowChain => "borrow_heavy",
    };
    boundary_cases(n)
        .swap_remove(key)
        .unwrap_or_else(|| random_operands(seed, n))
}
