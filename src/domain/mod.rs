//! Domain value objects and field normalizers.
//!
//! Every spreadsheet field has one normalizer here that maps a raw
//! [`CellValue`] to either a typed value or an [`InvalidReason`]. The
//! normalizers are pure apart from debug-level diagnostics.

pub mod cell;
pub mod email;
pub mod errors;
pub mod org_number;
pub mod phone;
pub mod text;

pub use cell::CellValue;
pub use email::EmailAddress;
pub use errors::InvalidReason;
pub use org_number::OrganizationNumber;
pub use phone::{PhoneNumber, DIRECTORY_SUFFIXES};
pub use text::{normalize_position, normalize_text, Position, DEFAULT_POSITION};

/// Keep only ASCII digits.
pub(crate) fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}
