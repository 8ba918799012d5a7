//! Magnitude comparison of equal-length limb sequences.

use std::cmp::Ordering;

use lanecarry_core::Limb;

/// Compare two little-endian magnitudes of equal length.
///
/// Scans from the most significant limb down; the first differing limb
/// decides. For equal-length sequences this is exactly numeric order.
///
/// # Panics
///
/// Panics in debug builds if the lengths differ.
pub fn compare_magnitudes(a: &[Limb], b: &[Limb]) -> Ordering {
    debug_assert_eq!(a.len(), b.len(), "magnitudes must be reconciled");
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .map(|(x, y)| x.cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}
