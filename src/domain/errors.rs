//! Domain validation errors.

use std::fmt;

/// Why a raw cell could not be turned into a domain value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The cell is empty, blank, or the column is absent.
    Missing,

    /// The cleaned value has the wrong number of digits.
    WrongLength { expected: usize, actual: usize },

    /// The cleaned value does not have the expected shape.
    Format,

    /// The value is outside the accepted numeric range.
    OutOfRange,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::WrongLength { expected, actual } => {
                write!(f, "wrong length (expected {} digits, got {})", expected, actual)
            }
            Self::Format => write!(f, "invalid format"),
            Self::OutOfRange => write!(f, "out of range"),
        }
    }
}

impl std::error::Error for InvalidReason {}
