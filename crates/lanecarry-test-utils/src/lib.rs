//! Test utilities for lanecarry development.
//!
//! - [`reference`]: scalar limb-at-a-time oracles for the exact kernels, a
//!   first-level model of the approximate kernels, and a hex-string
//!   adder/subtractor that works on digits rather than limbs.
//! - [`fixtures`]: the named boundary-case catalogue, seeded random
//!   operands, and the operand sizes the benchmarks and exactness tests
//!   sweep.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod reference;

pub use fixtures::{boundary_cases, random_operands, Case, BIT_SIZES};
