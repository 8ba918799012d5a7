//! Scalar reference oracles.
//!
//! Nothing here shares code with the lane-group kernels: the exact oracles
//! are the schoolbook limb loop, the approximate model is written lane by
//! lane, and the hex oracle adds digit strings directly.

use lanecarry_core::{Limb, LIMB_MAX};

/// `out = a + b + carry_in`, one limb at a time. Returns the carry-out.
pub fn add_with_carry(out: &mut [Limb], a: &[Limb], b: &[Limb], carry_in: bool) -> bool {
    assert_eq!(a.len(), b.len());
    let mut carry = carry_in;
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        let (s1, c1) = x.overflowing_add(y);
        let (s2, c2) = s1.overflowing_add(carry as Limb);
        *o = s2;
        carry = c1 | c2;
    }
    carry
}

/// `out = a - b - borrow_in`, one limb at a time. Returns the borrow-out.
pub fn sub_with_borrow(out: &mut [Limb], a: &[Limb], b: &[Limb], borrow_in: bool) -> bool {
    assert_eq!(a.len(), b.len());
    let mut borrow = borrow_in;
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        let (d1, b1) = x.overflowing_sub(y);
        let (d2, b2) = d1.overflowing_sub(borrow as Limb);
        *o = d2;
        borrow = b1 | b2;
    }
    borrow
}

/// First-level-only addition over groups of `width` lanes.
///
/// Each lane gets `+1` iff the lane below it overflowed (or, for lane 0 of
/// a group, the previous group's top lane overflowed). A lane wrapped by
/// that `+1` passes nothing on. Returns the top lane's overflow.
pub fn approx_add(out: &mut [Limb], a: &[Limb], b: &[Limb], width: usize) -> bool {
    assert_eq!(a.len(), b.len());
    let mut carry = false;
    for start in (0..a.len()).step_by(width) {
        let end = (start + width).min(a.len());
        let mut below = carry;
        for i in start..end {
            let (s, o) = a[i].overflowing_add(b[i]);
            out[i] = if below { s.wrapping_add(1) } else { s };
            below = o;
        }
        carry = below;
    }
    carry
}

/// First-level-only subtraction; the mirror of [`approx_add`].
pub fn approx_sub(out: &mut [Limb], a: &[Limb], b: &[Limb], width: usize) -> bool {
    assert_eq!(a.len(), b.len());
    let mut borrow = false;
    for start in (0..a.len()).step_by(width) {
        let end = (start + width).min(a.len());
        let mut below = borrow;
        for i in start..end {
            let (d, o) = a[i].overflowing_sub(b[i]);
            out[i] = if below { d.wrapping_sub(1) } else { d };
            below = o;
        }
        borrow = below;
    }
    borrow
}

/// Lanes where approximate addition is expected to differ from exact
/// addition, derived from the operands alone.
///
/// A lane that held `u64::MAX` after the lane-wise sum and then received
/// an injected carry wraps and drops its own carry. That carry should have
/// landed on the next lane and kept going while lanes are saturated.
/// Returns `None` if a dropped carry would leave its group, since then
/// the groups above diverge too.
pub fn predicted_add_divergence(a: &[Limb], b: &[Limb], width: usize) -> Option<Vec<usize>> {
    predicted_divergence(a, b, width, |x, y| x.overflowing_add(y), LIMB_MAX, |r| r.wrapping_add(1))
}

/// Subtraction counterpart of [`predicted_add_divergence`]; lanes that
/// were zero and received a borrow drop theirs.
pub fn predicted_sub_divergence(a: &[Limb], b: &[Limb], width: usize) -> Option<Vec<usize>> {
    predicted_divergence(a, b, width, |x, y| x.overflowing_sub(y), 0, |r| r.wrapping_sub(1))
}

fn predicted_divergence(
    a: &[Limb],
    b: &[Limb],
    width: usize,
    lane_op: impl Fn(Limb, Limb) -> (Limb, bool),
    pass_through: Limb,
    inject: impl Fn(Limb) -> Limb,
) -> Option<Vec<usize>> {
    assert_eq!(a.len(), b.len());
    let mut lanes = Vec::new();
    let mut carry = false;
    for start in (0..a.len()).step_by(width) {
        let end = (start + width).min(a.len());
        let mut first_level = Vec::with_capacity(end - start);
        let mut dropped = Vec::new();
        let mut below = carry;
        for i in start..end {
            let (r, o) = lane_op(a[i], b[i]);
            if below {
                if r == pass_through {
                    dropped.push(i);
                }
                first_level.push(inject(r));
            } else {
                first_level.push(r);
            }
            below = o;
        }
        carry = below;

        for i in dropped {
            let mut j = i + 1;
            loop {
                if j >= end {
                    return None;
                }
                lanes.push(j);
                if first_level[j - start] != pass_through {
                    break;
                }
                j += 1;
            }
        }
    }
    lanes.sort_unstable();
    lanes.dedup();
    Some(lanes)
}

fn hex_digits(text: &str) -> Vec<u8> {
    // Least significant digit first.
    text.bytes()
        .rev()
        .map(|c| match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => panic!("not a hex digit: {:?}", c as char),
        })
        .collect()
}

fn hex_string(digits: &[u8]) -> String {
    let s: String = digits
        .iter()
        .rev()
        .skip_while(|&&d| d == 0)
        .map(|&d| char::from_digit(d as u32, 16).unwrap_or('?'))
        .collect();
    if s.is_empty() {
        "0".to_string()
    } else {
        s
    }
}

fn cmp_hex(a: &[u8], b: &[u8]) -> std::cmp::Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .rev()
        .map(|i| a.get(i).unwrap_or(&0).cmp(b.get(i).unwrap_or(&0)))
        .find(|o| o.is_ne())
        .unwrap_or(std::cmp::Ordering::Equal)
}

/// Digit-wise sum of two unsigned hex strings, in canonical form.
pub fn hex_add(a: &str, b: &str) -> String {
    let (a, b) = (hex_digits(a), hex_digits(b));
    let mut out = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0;
    for i in 0..a.len().max(b.len()) {
        let s = a.get(i).unwrap_or(&0) + b.get(i).unwrap_or(&0) + carry;
        out.push(s % 16);
        carry = s / 16;
    }
    out.push(carry);
    hex_string(&out)
}

/// Digit-wise `a - b` of two unsigned hex strings, signed and canonical:
/// a leading `-` when `b > a`, plain `0` when equal.
pub fn hex_sub(a: &str, b: &str) -> String {
    let (a, b) = (hex_digits(a), hex_digits(b));
    let (big, small, negative) = match cmp_hex(&a, &b) {
        std::cmp::Ordering::Equal => return "0".to_string(),
        std::cmp::Ordering::Greater => (a, b, false),
        std::cmp::Ordering::Less => (b, a, true),
    };
    let mut out = Vec::with_capacity(big.len());
    let mut borrow = 0i8;
    for (i, &d) in big.iter().enumerate() {
        let mut x = d as i8 - *small.get(i).unwrap_or(&0) as i8 - borrow;
        borrow = 0;
        if x < 0 {
            x += 16;
            borrow = 1;
        }
        out.push(x as u8);
    }
    let magnitude = hex_string(&out);
    if negative {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}
