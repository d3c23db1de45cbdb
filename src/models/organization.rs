//! Organization model and its API payload.

use crate::domain::OrganizationNumber;
use serde::Serialize;

/// An organization ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// Trimmed, non-empty organization name
    pub name: String,

    /// Registry number; the backend deduplicates on it
    pub number: OrganizationNumber,
}

impl Organization {
    /// Create a new organization.
    pub fn new(name: impl Into<String>, number: OrganizationNumber) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}

/// Request body for `POST /add_organization`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateOrganizationRequest {
    organization_name: String,
    org_number: OrganizationNumber,
}

impl From<&Organization> for CreateOrganizationRequest {
    fn from(organization: &Organization) -> Self {
        Self {
            organization_name: organization.name.clone(),
            org_number: organization.number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;

    #[test]
    fn test_request_serialization() {
        let number = OrganizationNumber::normalize(&CellValue::from("123456789")).unwrap();
        let organization = Organization::new("Acme AS", number);

        let json = serde_json::to_value(CreateOrganizationRequest::from(&organization)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"OrganizationName": "Acme AS", "OrgNumber": 123456789})
        );
    }
}
