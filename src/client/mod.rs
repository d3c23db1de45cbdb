//! Submission client for the CRM backend.
//!
//! Each accepted row becomes two requests: the organization first, then the
//! contact. An organization that already exists (409) is as good as a fresh
//! one. A contact is only sent once its organization has been accepted, and
//! failures never escape as panics, so a bad row cannot stop the batch.

mod transport;
pub use transport::{HttpResponse, HttpTransport, UreqTransport};

use crate::config::Config;
use crate::error::{SubmitFailure, SubmitStage, TransportError};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{Contact, CreateContactRequest, CreateOrganizationRequest, Organization};
use serde::Serialize;
use std::time::Duration;

/// Path of the organization endpoint, relative to the base URL.
pub const ORGANIZATION_PATH: &str = "add_organization";

/// Path of the contact endpoint, relative to the base URL.
pub const CONTACT_PATH: &str = "add_contact";

/// How the backend accepted an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationOutcome {
    /// 200 or 201
    Created,

    /// 409: the organization number is already registered
    AlreadyExists,
}

/// A row whose organization and contact were both accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submitted {
    pub organization: OrganizationOutcome,
}

fn encode<S: Serialize>(stage: SubmitStage, request: S) -> Result<serde_json::Value, SubmitFailure> {
    serde_json::to_value(request).map_err(|e| SubmitFailure::Transport {
        stage,
        source: TransportError::Other(format!("Failed to encode request: {}", e)),
    })
}

/// Client for the organization and contact endpoints.
pub struct SubmissionClient<T: HttpTransport> {
    /// Base URL for the backend API
    base_url: String,

    transport: T,

    /// Metrics collector
    metrics: Metrics,
}

impl SubmissionClient<UreqTransport> {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Self {
        let transport = UreqTransport::new(Duration::from_secs(config.request_timeout));
        Self::with_transport(config.api_base_url.clone(), transport)
    }
}

impl<T: HttpTransport> SubmissionClient<T> {
    /// Create a client on top of any transport.
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// POST a payload and time it; transport failures are tagged with the stage.
    fn post(
        &self,
        stage: SubmitStage,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, SubmitFailure> {
        let url = self.build_url(path);
        let timer = HttpTimer::new(self.metrics.clone());

        tracing::debug!(%url, %body, "POST");

        match self.transport.post_json(&url, body) {
            Ok(response) => {
                timer.complete();
                tracing::debug!(%url, status = response.status, "POST completed");
                Ok(response)
            }
            Err(source) => {
                timer.complete_with_error();
                tracing::error!(%url, error = %source, "POST failed");
                Err(SubmitFailure::Transport { stage, source })
            }
        }
    }

    fn rejected(&self, stage: SubmitStage, response: HttpResponse) -> SubmitFailure {
        self.metrics.record_rejection();
        SubmitFailure::Rejected {
            stage,
            status: response.status,
            body: response.body,
        }
    }

    /// Create the organization, tolerating "already exists".
    pub fn upsert_organization(
        &self,
        organization: &Organization,
    ) -> Result<OrganizationOutcome, SubmitFailure> {
        let stage = SubmitStage::Organization;
        let body = encode(stage, CreateOrganizationRequest::from(organization))?;

        let response = self.post(stage, ORGANIZATION_PATH, &body)?;
        match response.status {
            200 | 201 => Ok(OrganizationOutcome::Created),
            409 => {
                self.metrics.record_conflict();
                Ok(OrganizationOutcome::AlreadyExists)
            }
            _ => Err(self.rejected(stage, response)),
        }
    }

    /// Create the contact. Only 200 counts as success.
    pub fn create_contact(&self, contact: &Contact) -> Result<(), SubmitFailure> {
        let stage = SubmitStage::Contact;
        let body = encode(stage, CreateContactRequest::from(contact))?;

        let response = self.post(stage, CONTACT_PATH, &body)?;
        match response.status {
            200 => Ok(()),
            _ => Err(self.rejected(stage, response)),
        }
    }

    /// Submit an organization and then its contact.
    ///
    /// The contact request is never sent if the organization was not accepted.
    pub fn submit(
        &self,
        organization: &Organization,
        contact: &Contact,
    ) -> Result<Submitted, SubmitFailure> {
        let outcome = self.upsert_organization(organization)?;
        tracing::debug!(
            organization = %organization.name,
            number = %organization.number,
            ?outcome,
            "Organization accepted"
        );

        self.create_contact(contact)?;
        Ok(Submitted {
            organization: outcome,
        })
    }
}
