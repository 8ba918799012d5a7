//! Core types for the lanecarry workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the limb and lane-group constants shared by the arena and the
//! kernels, the [`LaneMask`] bitset used for per-lane carry tracking,
//! the arena [`Epoch`] identifier, and the kernel and parse error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod limb;
pub mod mask;

pub use error::{KernelError, ParseError};
pub use id::Epoch;
pub use limb::{Limb, LANES, LIMB_BITS, LIMB_BYTES, LIMB_MAX, NARROW_LANES};
pub use mask::LaneMask;
