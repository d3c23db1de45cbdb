//! EmailAddress value object.

use super::cell::CellValue;
use super::errors::InvalidReason;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Failed to compile email regex")
});

/// A validated, lower-cased email address.
///
/// # Example
///
/// ```
/// use contact_sync::domain::{CellValue, EmailAddress};
///
/// let email = EmailAddress::normalize(&CellValue::from(" Kari@Example.NO ")).unwrap();
/// assert_eq!(email.as_str(), "kari@example.no");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalize a raw cell into an email address.
    ///
    /// Surrounding whitespace is trimmed before matching and the result is
    /// lower-cased, so normalizing an already normalized address is a no-op.
    ///
    /// # Errors
    ///
    /// - `InvalidReason::Missing` for blank cells
    /// - `InvalidReason::Format` if the trimmed value is not an address
    pub fn normalize(raw: &CellValue) -> Result<Self, InvalidReason> {
        let text = raw.to_text().ok_or(InvalidReason::Missing)?;
        let trimmed = text.trim();

        if !EMAIL_REGEX.is_match(trimmed) {
            tracing::debug!(raw = %trimmed, "Invalid email format");
            return Err(InvalidReason::Format);
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as string
impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
