//! The facade error type.

use std::error::Error;
use std::fmt;

use lanecarry_arena::ArenaError;
use lanecarry_core::{KernelError, ParseError};

/// Any failure of a [`Session`](crate::Session) operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LimbError {
    /// Arena failure: exhaustion, a stale handle, or use outside a session.
    Arena(ArenaError),
    /// Kernel precondition violated.
    Kernel(KernelError),
    /// Malformed hex input.
    Parse(ParseError),
    /// A value of zero limbs was requested.
    ZeroSize,
}

impl fmt::Display for LimbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::Kernel(e) => write!(f, "kernel: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::ZeroSize => write!(f, "values must have at least one limb"),
        }
    }
}

impl Error for LimbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            Self::Kernel(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::ZeroSize => None,
        }
    }
}

impl From<ArenaError> for LimbError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<KernelError> for LimbError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}

impl From<ParseError> for LimbError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_layer() {
        let e: LimbError = ParseError::Empty.into();
        assert!(e.to_string().starts_with("parse: "));
        let e: LimbError = ArenaError::Uninitialised.into();
        assert!(e.to_string().starts_with("arena: "));
    }

    #[test]
    fn source_forwards_inner_error() {
        let e = LimbError::from(KernelError::LengthMismatch { lhs: 1, rhs: 2 });
        assert!(e.source().is_some());
        assert!(LimbError::ZeroSize.source().is_none());
    }
}
