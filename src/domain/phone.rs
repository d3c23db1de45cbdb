//! PhoneNumber value object.

use super::cell::CellValue;
use super::digits_only;
use super::errors::InvalidReason;
use serde::{Serialize, Serializer};
use std::fmt;

/// Directory-assistance annotations appended to numbers by the data vendor.
///
/// Removed in this order, wherever they occur in the raw value.
pub const DIRECTORY_SUFFIXES: [&str; 6] = ["(1881)", "(18881)", "(881)", " 1881", " 18881", " 881"];

/// A Norwegian local phone number (eight digits, no country code).
///
/// # Example
///
/// ```
/// use contact_sync::domain::{CellValue, PhoneNumber};
///
/// let phone = PhoneNumber::normalize(&CellValue::from("12345678(1881)")).unwrap();
/// assert_eq!(phone.value(), 12345678);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhoneNumber(u32);

impl PhoneNumber {
    /// Number of digits in a valid phone number.
    pub const DIGITS: usize = 8;

    /// Smallest accepted number.
    pub const MIN: u32 = 10_000_000;

    /// Largest accepted number.
    pub const MAX: u32 = 99_999_999;

    /// Normalize a raw cell into a phone number.
    ///
    /// # Validation Rules
    ///
    /// - Directory suffixes (see [`DIRECTORY_SUFFIXES`]) are removed
    /// - All remaining non-digit characters are removed
    /// - Exactly eight digits must remain, within [`Self::MIN`]..=[`Self::MAX`]
    ///
    /// # Errors
    ///
    /// Returns `Missing`, `WrongLength`, `Format` or `OutOfRange`.
    pub fn normalize(raw: &CellValue) -> Result<Self, InvalidReason> {
        let mut text = raw.to_text().ok_or(InvalidReason::Missing)?;

        for suffix in DIRECTORY_SUFFIXES {
            text = text.replace(suffix, "");
        }

        let digits = digits_only(&text);
        if digits.len() != Self::DIGITS {
            tracing::debug!(raw = %raw, digits = %digits, "Invalid phone number length");
            return Err(InvalidReason::WrongLength {
                expected: Self::DIGITS,
                actual: digits.len(),
            });
        }

        let number = digits.parse::<u32>().map_err(|_| {
            tracing::debug!(raw = %raw, "Invalid phone number format");
            InvalidReason::Format
        })?;

        if !(Self::MIN..=Self::MAX).contains(&number) {
            tracing::debug!(raw = %raw, number, "Phone number out of valid range");
            return Err(InvalidReason::OutOfRange);
        }

        Ok(Self(number))
    }

    /// Get the numeric value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

// Serde support - serialize as a JSON integer
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
