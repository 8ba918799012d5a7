//! Lanecarry: multi-limb integer addition and subtraction in lane-groups.
//!
//! This is the top-level facade crate. It provides the [`LimbInt`] value
//! type, the [`Session`] that owns the arena every value lives in, hex
//! text interchange, and the exact and approximate add/sub operations.
//! The word-slice kernels and the arena are re-exported for callers that
//! manage their own buffers.
//!
//! # Quick start
//!
//! ```rust
//! use lanecarry::prelude::*;
//!
//! let mut session = Session::new()?;
//! let mut a = session.parse_hex("ffffffffffffffffffffffffffffffff")?;
//! let mut b = session.parse_hex("1")?;
//! session.reconcile_sizes(&mut a, &mut b)?;
//!
//! let mut sum = session.allocate(a.size())?;
//! session.add(&mut sum, &a, &b)?;
//! assert!(sum.carry);
//! assert_eq!(session.format_hex(&sum)?, format!("1{}", "0".repeat(32)));
//!
//! let mut diff = session.allocate(a.size())?;
//! session.sub(&mut diff, &b, &a)?;
//! assert_eq!(session.format_hex(&diff)?, format!("-{}", "f".repeat(31) + "e"));
//! # Ok::<(), LimbError>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `lanecarry-arena` | Epoch-checked bump arena and handles |
//! | [`types`] | `lanecarry-core` | Limb constants, lane masks, kernel and parse errors |
//! | [`kernel`] | `lanecarry-kernel` | Word-slice exact and approximate kernels |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod hex;
mod session;
mod value;

pub use error::LimbError;
pub use session::Session;
pub use value::LimbInt;

/// Arena, handles, and configuration (`lanecarry-arena`).
pub use lanecarry_arena as arena;

/// Limb constants, lane masks, and leaf error types (`lanecarry-core`).
pub use lanecarry_core as types;

/// Word-slice kernels (`lanecarry-kernel`).
///
/// [`kernel::exact::add_words`] and [`kernel::exact::sub_words`] are the
/// raw fixed-length entry points with no sign handling.
pub use lanecarry_kernel as kernel;

/// Common imports.
pub mod prelude {
    pub use crate::{LimbError, LimbInt, Session};
    pub use lanecarry_arena::{ArenaConfig, ArenaError, Release};
    pub use lanecarry_core::{KernelError, Limb, ParseError};
}
