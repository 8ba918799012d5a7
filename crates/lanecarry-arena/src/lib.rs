//! Epoch-checked bump arena for lanecarry limb buffers.
//!
//! Every limb buffer in a session is bump-allocated from a single
//! fixed-capacity region. Releasing a buffer does not free it: once the
//! live offset has crossed half of capacity, the next release zeroes the
//! whole region, rewinds the bump pointer and advances the arena epoch.
//!
//! # Architecture
//!
//! ```text
//! LimbArena (lifecycle + epoch)
//! ├── ArenaConfig (capacity, alignment; validated at construction)
//! └── Option<Region> (None while uninitialised)
//!     └── Vec<u64> + bump cursor
//! ```
//!
//! # Epochs
//!
//! A [`LimbHandle`] remembers the epoch it was issued in. After a recycle
//! or a teardown every older handle is stale: resolving it returns
//! [`ArenaError::StaleHandle`] instead of exposing memory that now
//! belongs to someone else.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod handle;
pub mod region;

pub use arena::{LimbArena, Release};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::LimbHandle;
