//! Error types for the kernels and the hex codec.
//!
//! Organised by subsystem: precondition violations in the carry-chain
//! kernels, and malformed input in hex parsing. Arena errors live in
//! `lanecarry-arena`.

use std::error::Error;
use std::fmt;

/// Precondition violations detected by the carry-chain kernels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// The two operands have different limb counts. Callers must
    /// reconcile sizes before invoking a kernel.
    LengthMismatch {
        /// Limb count of the left operand.
        lhs: usize,
        /// Limb count of the right operand.
        rhs: usize,
    },
    /// The result buffer holds fewer limbs than the operands.
    ResultTooShort {
        /// Limbs required (the operand length).
        required: usize,
        /// Limbs available in the result buffer.
        available: usize,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { lhs, rhs } => {
                write!(f, "operand length mismatch: {lhs} limbs vs {rhs} limbs")
            }
            Self::ResultTooShort {
                required,
                available,
            } => {
                write!(
                    f,
                    "result buffer too short: need {required} limbs, have {available}"
                )
            }
        }
    }
}

impl Error for KernelError {}

/// Malformed hex-string input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The input string was empty.
    Empty,
    /// A sign (and possibly whitespace) was present but no digits followed.
    NoDigits,
    /// A character that is not a hex digit.
    InvalidDigit {
        /// The offending character.
        found: char,
        /// Byte offset of the character in the input.
        position: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty hex string"),
            Self::NoDigits => write!(f, "hex string has no digits"),
            Self::InvalidDigit { found, position } => {
                write!(f, "invalid hex digit {found:?} at byte {position}")
            }
        }
    }
}

impl Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_error_display() {
        let e = KernelError::LengthMismatch { lhs: 4, rhs: 8 };
        assert_eq!(e.to_string(), "operand length mismatch: 4 limbs vs 8 limbs");
        let e = KernelError::ResultTooShort {
            required: 8,
            available: 2,
        };
        assert!(e.to_string().contains("need 8 limbs"));
    }

    #[test]
    fn parse_error_display() {
        let e = ParseError::InvalidDigit {
            found: 'g',
            position: 3,
        };
        assert_eq!(e.to_string(), "invalid hex digit 'g' at byte 3");
        assert_eq!(ParseError::Empty.to_string(), "empty hex string");
    }
}
