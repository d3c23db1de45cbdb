//! Record validation: one raw row in, a submittable record or a skip reason out.
//!
//! Checks run in a fixed order and the first failure wins: organization
//! number, organization name, phone, contact name. Position and email never
//! cause a skip.

use crate::config::ColumnMapping;
use crate::domain::{
    normalize_position, normalize_text, CellValue, EmailAddress, InvalidReason,
    OrganizationNumber, PhoneNumber, DEFAULT_POSITION,
};
use crate::models::{Contact, Organization, RawRow};
use std::fmt;

/// The row field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    OrganizationNumber,
    OrganizationName,
    Phone,
    ContactName,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OrganizationNumber => "organization number",
            Self::OrganizationName => "organization name",
            Self::Phone => "phone",
            Self::ContactName => "contact name",
        };
        write!(f, "{}", name)
    }
}

/// Why a row was not submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Organization number or name is unusable
    InvalidOrganization {
        field: Field,
        raw: CellValue,
        reason: InvalidReason,
    },

    /// The organization is valid but the contact's phone or name is not
    InvalidContact {
        organization_number: OrganizationNumber,
        field: Field,
        raw: CellValue,
        reason: InvalidReason,
    },
}

impl SkipReason {
    /// The field that failed.
    pub fn field(&self) -> Field {
        match self {
            Self::InvalidOrganization { field, .. } | Self::InvalidContact { field, .. } => *field,
        }
    }

    /// The field-level reason.
    pub fn reason(&self) -> &InvalidReason {
        match self {
            Self::InvalidOrganization { reason, .. } | Self::InvalidContact { reason, .. } => {
                reason
            }
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrganization { field, raw, reason } => write!(
                f,
                "invalid organization data: {} {} ({})",
                field, reason, raw
            ),
            Self::InvalidContact {
                organization_number,
                field,
                raw,
                reason,
            } => write!(
                f,
                "invalid contact data for org {}: {} {} ({})",
                organization_number, field, reason, raw
            ),
        }
    }
}

/// A row that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub organization: Organization,
    pub contact: Contact,

    /// The row had no job title and the default position was used
    pub position_defaulted: bool,
}

/// Validates raw rows against a column mapping.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    columns: ColumnMapping,
    default_position: String,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new(ColumnMapping::default(), DEFAULT_POSITION)
    }
}

impl RecordValidator {
    /// Create a validator for the given columns and default position.
    pub fn new(columns: ColumnMapping, default_position: impl Into<String>) -> Self {
        Self {
            columns,
            default_position: default_position.into(),
        }
    }

    /// The column mapping in use.
    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    /// Validate only the organization part of a row.
    pub fn validate_organization(&self, row: &RawRow) -> Result<Organization, SkipReason> {
        let invalid = |field: Field, column: &str, reason: InvalidReason| {
            SkipReason::InvalidOrganization {
                field,
                raw: row.get(column).clone(),
                reason,
            }
        };

        let number_column = &self.columns.org_number;
        let number = OrganizationNumber::normalize(row.get(number_column))
            .map_err(|reason| invalid(Field::OrganizationNumber, number_column, reason))?;

        let name_column = &self.columns.org_name;
        let name = normalize_text(row.get(name_column))
            .map_err(|reason| invalid(Field::OrganizationName, name_column, reason))?;

        Ok(Organization::new(name, number))
    }

    /// Validate a full row into an (organization, contact) record.
    pub fn validate(&self, row: &RawRow) -> Result<ValidatedRecord, SkipReason> {
        let organization = self.validate_organization(row)?;

        let invalid = |field: Field, column: &str, reason: InvalidReason| {
            SkipReason::InvalidContact {
                organization_number: organization.number,
                field,
                raw: row.get(column).clone(),
                reason,
            }
        };

        let phone_column = &self.columns.phone;
        let phone = PhoneNumber::normalize(row.get(phone_column))
            .map_err(|reason| invalid(Field::Phone, phone_column, reason))?;

        let name_column = &self.columns.contact_name;
        let name = normalize_text(row.get(name_column))
            .map_err(|reason| invalid(Field::ContactName, name_column, reason))?;

        let position = normalize_position(row.get(&self.columns.position), &self.default_position);
        let email = self.email(row);

        let contact = Contact {
            name,
            phone,
            organization_number: organization.number,
            position: position.name,
            email,
        };

        Ok(ValidatedRecord {
            organization,
            contact,
            position_defaulted: position.defaulted,
        })
    }

    fn email(&self, row: &RawRow) -> Option<EmailAddress> {
        let column = self.columns.email.as_deref()?;
        match EmailAddress::normalize(row.get(column)) {
            Ok(email) => Some(email),
            Err(InvalidReason::Missing) => None,
            Err(reason) => {
                tracing::debug!(row = row.index, %reason, "Ignoring invalid email");
                None
            }
        }
    }
}
