//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use lanecarry_core::Epoch;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The region has no room left for the request.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still free in the region.
        available: usize,
        /// Total capacity of the region.
        capacity: usize,
    },
    /// A handle from an epoch that has since been recycled or torn down.
    StaleHandle {
        /// The epoch recorded in the handle.
        handle_epoch: Epoch,
        /// The arena's current epoch.
        current_epoch: Epoch,
    },
    /// An operation was attempted before `init()` or after `teardown()`.
    Uninitialised,
    /// `init()` was called on an arena that is already initialised.
    AlreadyInitialised,
    /// A handle that does not describe a range inside the region.
    OutOfBounds {
        /// Start of the range in limbs.
        offset: usize,
        /// Length of the range in limbs.
        len: usize,
        /// Limbs currently allocated in the region.
        used: usize,
    },
    /// The output handle overlaps one of the input handles.
    Aliased,
    /// The epoch counter wrapped.
    EpochOverflow,
    /// Configuration rejected at construction.
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                available,
                capacity,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, \
                     {available} of {capacity} bytes free"
                )
            }
            Self::StaleHandle {
                handle_epoch,
                current_epoch,
            } => {
                write!(
                    f,
                    "stale handle: epoch {handle_epoch}, current epoch {current_epoch}"
                )
            }
            Self::Uninitialised => write!(f, "arena is not initialised"),
            Self::AlreadyInitialised => write!(f, "arena is already initialised"),
            Self::OutOfBounds { offset, len, used } => {
                write!(
                    f,
                    "handle range {offset}..{} outside the {used} allocated limbs",
                    offset + len
                )
            }
            Self::Aliased => write!(f, "output buffer overlaps an input buffer"),
            Self::EpochOverflow => write!(f, "arena epoch counter overflow"),
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_handle_display_names_both_epochs() {
        let e = ArenaError::StaleHandle {
            handle_epoch: Epoch(2),
            current_epoch: Epoch(5),
        };
        assert_eq!(e.to_string(), "stale handle: epoch 2, current epoch 5");
    }

    #[test]
    fn capacity_display() {
        let e = ArenaError::CapacityExceeded {
            requested: 128,
            available: 64,
            capacity: 1024,
        };
        assert_eq!(
            e.to_string(),
            "arena capacity exceeded: requested 128 bytes, 64 of 1024 bytes free"
        );
    }
}
