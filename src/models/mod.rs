//! Data models for rows read from the spreadsheet and records sent to the backend.

pub mod contact;
pub mod organization;
pub mod row;

pub use contact::{Contact, CreateContactRequest};
pub use organization::{CreateOrganizationRequest, Organization};
pub use row::RawRow;
