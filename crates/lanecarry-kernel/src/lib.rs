//! Lane-group carry-chain kernels for multi-limb addition and subtraction.
//!
//! Operands are little-endian limb slices of equal length. Limbs are
//! processed in lane-groups of [`LANES`](lanecarry_core::LANES) words: each
//! group computes its per-lane sums in one pass, repairs the carries it can
//! see locally, and hands a single carry bit to the next group.
//!
//! Two carry policies implement [`CarryChain`]:
//!
//! - [`Exact`]: two-level correction. The result is exact for any
//!   operand length.
//! - [`Approx`]: first-level correction only. A carry or borrow that has
//!   to ripple through two or more saturated lanes of one group is
//!   dropped. Faster, and wrong in exactly those lanes.
//!
//! The module-level `add_words` / `sub_words` functions in [`exact`] and
//! [`approx`] are the raw word-slice entry points.
//!
//! # Example
//!
//! ```
//! use lanecarry_kernel::exact;
//!
//! let a = [u64::MAX; 16];
//! let mut b = [0u64; 16];
//! b[0] = 1;
//! let mut out = [0u64; 16];
//! let carry = exact::add_words(&mut out, &a, &b).unwrap();
//! assert_eq!(carry, 1);
//! assert!(out.iter().all(|&l| l == 0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod approx;
pub mod chain;
pub mod compare;
pub mod exact;
pub mod group;

pub use approx::Approx;
pub use chain::CarryChain;
pub use compare::compare_magnitudes;
pub use exact::Exact;
pub use group::LaneGroup;
