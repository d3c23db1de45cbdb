//! OrganizationNumber value object.

use super::cell::CellValue;
use super::digits_only;
use super::errors::InvalidReason;
use serde::{Serialize, Serializer};
use std::fmt;

/// A Norwegian organization number (exactly nine digits).
///
/// Spreadsheet exports write these as `"123 456 789"`, `"NO123456789MVA"` or as
/// plain numbers, so everything that is not a digit is discarded before the
/// length check.
///
/// # Example
///
/// ```
/// use contact_sync::domain::{CellValue, OrganizationNumber};
///
/// let number = OrganizationNumber::normalize(&CellValue::from("123 456 789")).unwrap();
/// assert_eq!(number.value(), 123456789);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrganizationNumber(u32);

impl OrganizationNumber {
    /// Number of digits in a valid organization number.
    pub const DIGITS: usize = 9;

    /// Normalize a raw cell into an organization number.
    ///
    /// # Errors
    ///
    /// - `InvalidReason::Missing` for blank cells
    /// - `InvalidReason::WrongLength` unless exactly nine digits remain
    /// - `InvalidReason::Format` if the digits do not parse
    pub fn normalize(raw: &CellValue) -> Result<Self, InvalidReason> {
        let text = raw.to_text().ok_or(InvalidReason::Missing)?;
        let digits = digits_only(&text);

        if digits.len() != Self::DIGITS {
            tracing::debug!(raw = %text, "Invalid organization number length");
            return Err(InvalidReason::WrongLength {
                expected: Self::DIGITS,
                actual: digits.len(),
            });
        }

        digits.parse::<u32>().map(Self).map_err(|_| {
            tracing::debug!(raw = %text, "Invalid organization number format");
            InvalidReason::Format
        })
    }

    /// Get the numeric value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

// Serde support - serialize as a JSON integer
impl Serialize for OrganizationNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for OrganizationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:09}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> Result<OrganizationNumber, InvalidReason> {
        OrganizationNumber::normalize(&CellValue::from(raw))
    }

    #[test]
    fn test_org_number_strips_formatting() {
        assert_eq!(normalize("123 456 789").unwrap().value(), 123456789);
        assert_eq!(normalize("123.456.789").unwrap().value(), 123456789);
        assert_eq!(normalize("NO 987 654 321 MVA").unwrap().value(), 987654321);
    }

    #[test]
    fn test_org_number_from_numeric_cell() {
        let number = OrganizationNumber::normalize(&CellValue::Number(987654321.0)).unwrap();
        assert_eq!(number.value(), 987654321);
    }

    #[test]
    fn test_org_number_wrong_length() {
        assert_eq!(
            normalize("12-34"),
            Err(InvalidReason::WrongLength {
                expected: 9,
                actual: 4
            })
        );
        assert!(matches!(
            normalize("1234567890"),
            Err(InvalidReason::WrongLength { actual: 10, .. })
        ));
        assert!(matches!(
            normalize("no digits here"),
            Err(InvalidReason::WrongLength { actual: 0, .. })
        ));
    }

    #[test]
    fn test_org_number_missing() {
        assert_eq!(
            OrganizationNumber::normalize(&CellValue::Empty),
            Err(InvalidReason::Missing)
        );
        assert_eq!(normalize("   "), Err(InvalidReason::Missing));
    }

    #[test]
    fn test_org_number_keeps_leading_zero_digits() {
        let number = normalize("012 345 678").unwrap();
        assert_eq!(number.value(), 12345678);
        assert_eq!(number.to_string(), "012345678");
    }

    #[test]
    fn test_org_number_serializes_as_integer() {
        let number = normalize("123456789").unwrap();
        assert_eq!(serde_json::to_string(&number).unwrap(), "123456789");
    }
}
