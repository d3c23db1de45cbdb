//! Contact model and its API payload.

use crate::domain::{EmailAddress, OrganizationNumber, PhoneNumber};
use serde::Serialize;

/// A contact person belonging to an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Trimmed, non-empty full name
    pub name: String,

    /// Local phone number
    pub phone: PhoneNumber,

    /// Number of the organization this contact belongs to
    pub organization_number: OrganizationNumber,

    /// Job title, or the default position placeholder
    pub position: String,

    /// Email address, if the row had a valid one
    pub email: Option<EmailAddress>,
}

/// Request body for `POST /add_contact`.
///
/// `Email` is always present and serializes as `null` when unknown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateContactRequest {
    name: String,
    phone: PhoneNumber,
    org_number: OrganizationNumber,
    position_name: String,
    email: Option<EmailAddress>,
}

impl From<&Contact> for CreateContactRequest {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: contact.phone,
            org_number: contact.organization_number,
            position_name: contact.position.clone(),
            email: contact.email.clone(),
        }
    }
}
