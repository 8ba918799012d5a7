//! Operand fixtures.
//!
//! The boundary catalogue is keyed by name in insertion order so that test
//! failures and benchmark ids report a stable, readable case label.

use indexmap::IndexMap;
use lanecarry_core::{Limb, LIMB_BITS, LIMB_MAX};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Operand widths, in bits, swept by the exactness tests and benchmarks.
pub const BIT_SIZES: [usize; 10] = [
    256, 512, 1024, 2048, 4096, 8192, 16384, 32768, 65536, 131072,
];

/// Limb count for an operand of `bits` bits.
pub fn limbs_for_bits(bits: usize) -> usize {
    bits.div_ceil(LIMB_BITS)
}

/// A pair of equal-length operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Case {
    pub a: Vec<Limb>,
    pub b: Vec<Limb>,
}

impl Case {
    pub fn new(a: Vec<Limb>, b: Vec<Limb>) -> Self {
        assert_eq!(a.len(), b.len(), "case operands must be reconciled");
        Self { a, b }
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Both operands as canonical hex strings.
    pub fn hex(&self) -> (String, String) {
        (limbs_to_hex(&self.a), limbs_to_hex(&self.b))
    }
}

/// `1` zero-extended to `n` limbs.
pub fn one(n: usize) -> Vec<Limb> {
    let mut v = vec![0; n];
    if let Some(first) = v.first_mut() {
        *first = 1;
    }
    v
}

/// Named boundary cases of `n` limbs each.
///
/// - `full_carry_chain`: every limb saturated, plus one. Exercises the
///   second correction level in every group and the carry across every
///   group boundary.
/// - `maxed_out`: every limb saturated on both sides.
/// - `carry_heavy`: saturated limbs with sparse ones in `b`, so carries
///   start inside runs of saturated lanes.
/// - `borrow_heavy`: `2^(64·(n-1)) - 1`, which borrows through every lower limb.
/// - `edge_mixed`: alternating `0` / `u64::MAX` limbs against their
///   complement pattern shifted by one lane.
/// - `group_straddle`: a saturated run that crosses the first group
///   boundary.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn boundary_cases(n: usize) -> IndexMap<&'static str, Case> {
    assert!(n > 0, "boundary cases need at least one limb");
    let mut cases = IndexMap::new();

    cases.insert("full_carry_chain", Case::new(vec![LIMB_MAX; n], one(n)));
    cases.insert(
        "maxed_out",
        Case::new(vec![LIMB_MAX; n], vec![LIMB_MAX; n]),
    );

    let sparse: Vec<Limb> = (0..n).map(|i| (i % 5 == 0) as Limb).collect();
    cases.insert("carry_heavy", Case::new(vec![LIMB_MAX; n], sparse));

    let mut top = vec![0; n];
    top[n - 1] = 1;
    cases.insert("borrow_heavy", Case::new(top, one(n)));

    let alternating: Vec<Limb> = (0..n)
        .map(|i| if i % 2 == 0 { 0 } else { LIMB_MAX })
        .collect();
    let shifted: Vec<Limb> = (0..n)
        .map(|i| if i % 2 == 0 { LIMB_MAX } else { 1 })
        .collect();
    cases.insert("edge_mixed", Case::new(alternating, shifted));

    let mut straddle = vec![0x1234; n];
    for limb in straddle.iter_mut().take(12).skip(5) {
        *limb = LIMB_MAX;
    }
    let mut straddle_b = vec![0; n];
    if n > 4 {
        straddle_b[4] = LIMB_MAX - 0x1233;
    }
    cases.insert("group_straddle", Case::new(straddle, straddle_b));

    cases
}

/// A reproducible pair of `n`-limb operands.
pub fn random_operands(seed: u64, n: usize) -> Case {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let a = random_limbs(&mut rng, n);
    let b = random_limbs(&mut rng, n);
    Case::new(a, b)
}

/// `n` random limbs, with roughly one in eight forced to a boundary value
/// so that carry runs actually occur.
pub fn random_limbs(rng: &mut ChaCha8Rng, n: usize) -> Vec<Limb> {
    (0..n)
        .map(|_| {
            let x = rng.next_u64();
            match x & 0x1F {
                0..=1 => LIMB_MAX,
                2 => 0,
                3 => LIMB_MAX - 1,
                _ => x,
            }
        })
        .collect()
}

/// Canonical lowercase hex of a little-endian magnitude.
pub fn limbs_to_hex(limbs: &[Limb]) -> String {
    let mut out = String::with_capacity(limbs.len() * 16);
    for limb in limbs.iter().rev() {
        if out.is_empty() {
            if *limb != 0 {
                out.push_str(&format!("{limb:x}"));
            }
        } else {
            out.push_str(&format!("{limb:016x}"));
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}
