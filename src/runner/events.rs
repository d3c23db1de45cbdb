//! Diagnostic events emitted by the batch runner.
//!
//! The runner never prints. It hands each event to a [`DiagnosticSink`];
//! [`TracingSink`] turns them into log lines and [`RecordingSink`] keeps them
//! for inspection.

use super::stats::RunStatistics;
use crate::client::OrganizationOutcome;
use crate::domain::OrganizationNumber;
use crate::error::SubmitFailure;
use crate::validation::SkipReason;

/// Something worth reporting during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    /// The row failed validation and was not submitted
    RowSkipped { row: usize, reason: SkipReason },

    /// Organizations-only mode: the organization was accepted
    OrganizationAccepted {
        row: usize,
        name: String,
        number: OrganizationNumber,
        outcome: OrganizationOutcome,
    },

    /// Organizations-only mode: the number was already submitted in this run
    DuplicateOrganization {
        row: usize,
        number: OrganizationNumber,
    },

    /// Organization and contact were both accepted
    ContactAdded {
        row: usize,
        name: String,
        organization: String,
        organization_outcome: OrganizationOutcome,
        default_position: bool,
    },

    /// Dry run: the row would have been submitted
    WouldSubmit {
        row: usize,
        name: String,
        organization: String,
    },

    /// Organizations-only dry run: the organization would have been submitted
    WouldSubmitOrganization {
        row: usize,
        name: String,
        number: OrganizationNumber,
    },

    /// A request was rejected or could not be sent
    SubmitFailed { row: usize, failure: SubmitFailure },

    /// Periodic running totals
    Progress {
        processed: usize,
        total_rows: usize,
        successful: usize,
    },

    /// The run is over
    Finished(RunStatistics),
}

/// Receiver for diagnostic events.
pub trait DiagnosticSink {
    fn emit(&mut self, event: &DiagnosticEvent);
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::RowSkipped { row, reason } => {
                tracing::warn!(
                    row,
                    field = %reason.field(),
                    reason = %reason.reason(),
                    "⚠️ Skipping row: {}",
                    reason
                );
            }
            DiagnosticEvent::OrganizationAccepted {
                row,
                name,
                number,
                outcome,
            } => {
                let status = match outcome {
                    OrganizationOutcome::Created => "added",
                    OrganizationOutcome::AlreadyExists => "already exists",
                };
                tracing::info!(row, %number, "✅ Organization {}: {} ({})", status, name, number);
            }
            DiagnosticEvent::DuplicateOrganization { row, number } => {
                tracing::debug!(row, %number, "Organization already submitted in this run");
            }
            DiagnosticEvent::ContactAdded {
                row,
                name,
                organization,
                organization_outcome,
                default_position,
            } => {
                let position_status = if *default_position {
                    " (default position)"
                } else {
                    ""
                };
                tracing::info!(
                    row,
                    ?organization_outcome,
                    "✅ Contact added: {} for {}{}",
                    name,
                    organization,
                    position_status
                );
            }
            DiagnosticEvent::WouldSubmit {
                row,
                name,
                organization,
            } => {
                tracing::info!(row, "✅ [dry run] Would add {} for {}", name, organization);
            }
            DiagnosticEvent::WouldSubmitOrganization { row, name, number } => {
                tracing::info!(row, %number, "✅ [dry run] Would add organization {} ({})", name, number);
            }
            DiagnosticEvent::SubmitFailed { row, failure } => {
                if failure.is_transport() {
                    tracing::error!(row, stage = %failure.stage(), "❌ API error: {}", failure);
                } else {
                    tracing::warn!(
                        row,
                        stage = %failure.stage(),
                        status = failure.status(),
                        "⚠️ Failed to submit: {}",
                        failure
                    );
                }
            }
            DiagnosticEvent::Progress {
                processed,
                total_rows,
                successful,
            } => {
                tracing::info!(
                    "Progress: {}/{} rows processed ({} successful)",
                    processed,
                    total_rows,
                    successful
                );
            }
            DiagnosticEvent::Finished(stats) => {
                tracing::info!(
                    total = stats.total,
                    successful = stats.successful,
                    failed = stats.failed(),
                    invalid_organization = stats.invalid_organization,
                    invalid_phone = stats.invalid_phone,
                    default_position = stats.default_position,
                    "Processing complete"
                );
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<DiagnosticEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows reported as skipped, in order.
    pub fn skipped_rows(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::RowSkipped { row, .. } => Some(*row),
                _ => None,
            })
            .collect()
    }

    /// Number of progress events.
    pub fn progress_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DiagnosticEvent::Progress { .. }))
            .count()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&mut self, event: &DiagnosticEvent) {
        self.events.push(event.clone());
    }
}
