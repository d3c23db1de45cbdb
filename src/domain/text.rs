//! Plain text fields: names and positions.

use super::cell::CellValue;
use super::errors::InvalidReason;

/// Placeholder position used when a row carries no job title.
pub const DEFAULT_POSITION: &str = "Unknown position";

/// Normalize a required text field (organization or contact name).
///
/// # Errors
///
/// Returns `InvalidReason::Missing` if the cell is empty or blank.
pub fn normalize_text(raw: &CellValue) -> Result<String, InvalidReason> {
    raw.to_text()
        .map(|text| text.trim().to_string())
        .ok_or(InvalidReason::Missing)
}

/// A normalized position and whether the default was substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub name: String,
    pub defaulted: bool,
}

/// Normalize the position field. Never fails: blanks become `default`.
pub fn normalize_position(raw: &CellValue, default: &str) -> Position {
    match raw.to_text() {
        Some(text) => Position {
            name: text.trim().to_string(),
            defaulted: false,
        },
        None => Position {
            name: default.to_string(),
            defaulted: true,
        },
    }
}
