//! Batch runner: walks the rows in order and drives validation and submission.
//!
//! Rows are processed strictly one at a time. A row that fails validation is
//! counted and skipped without any request; a row whose submission fails is
//! logged and the run moves on.

pub mod events;
pub mod stats;

pub use events::{DiagnosticEvent, DiagnosticSink, RecordingSink, TracingSink};
pub use stats::RunStatistics;

use crate::client::{HttpTransport, OrganizationOutcome, SubmissionClient};
use crate::domain::OrganizationNumber;
use crate::models::RawRow;
use crate::validation::{RecordValidator, SkipReason};
use chrono::Utc;
use std::collections::HashSet;

/// What to submit for each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Organization and contact for every valid row
    #[default]
    Contacts,

    /// Each distinct organization once, no contacts
    OrganizationsOnly,
}

/// Options for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: RunMode,

    /// Validate and report without sending any request
    pub dry_run: bool,

    /// Emit a progress event every this many rows
    pub progress_interval: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Contacts,
            dry_run: false,
            progress_interval: 100,
        }
    }
}

/// Runs one pass over a set of rows.
pub struct BatchRunner<T: HttpTransport, S: DiagnosticSink> {
    validator: RecordValidator,
    client: SubmissionClient<T>,
    sink: S,
    options: RunOptions,
}

impl<T: HttpTransport, S: DiagnosticSink> BatchRunner<T, S> {
    /// Create a runner.
    pub fn new(
        validator: RecordValidator,
        client: SubmissionClient<T>,
        sink: S,
        options: RunOptions,
    ) -> Self {
        Self {
            validator,
            client,
            sink,
            options,
        }
    }

    /// The submission client (for its metrics).
    pub fn client(&self) -> &SubmissionClient<T> {
        &self.client
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the runner and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Process every row in order and return the final counters.
    pub fn run(&mut self, rows: &[RawRow]) -> RunStatistics {
        let mut stats = RunStatistics {
            started_at: Some(Utc::now()),
            ..Default::default()
        };
        let mut seen_organizations = HashSet::new();
        let interval = self.options.progress_interval.max(1);

        tracing::info!(
            rows = rows.len(),
            mode = ?self.options.mode,
            dry_run = self.options.dry_run,
            "Starting run"
        );

        for row in rows {
            stats.total += 1;

            match self.options.mode {
                RunMode::Contacts => self.process_contact_row(row, &mut stats),
                RunMode::OrganizationsOnly => {
                    self.process_organization_row(row, &mut stats, &mut seen_organizations)
                }
            }

            if stats.total % interval == 0 {
                self.sink.emit(&DiagnosticEvent::Progress {
                    processed: stats.total,
                    total_rows: rows.len(),
                    successful: stats.successful,
                });
            }
        }

        stats.finished_at = Some(Utc::now());
        self.sink.emit(&DiagnosticEvent::Finished(stats.clone()));
        stats
    }

    fn skip(&mut self, row: &RawRow, reason: SkipReason, stats: &mut RunStatistics) {
        match reason {
            SkipReason::InvalidOrganization { .. } => stats.invalid_organization += 1,
            SkipReason::InvalidContact { .. } => stats.invalid_phone += 1,
        }
        self.sink.emit(&DiagnosticEvent::RowSkipped {
            row: row.index,
            reason,
        });
    }

    fn process_contact_row(&mut self, row: &RawRow, stats: &mut RunStatistics) {
        let record = match self.validator.validate(row) {
            Ok(record) => record,
            Err(reason) => return self.skip(row, reason, stats),
        };

        if self.options.dry_run {
            stats.successful += 1;
            if record.position_defaulted {
                stats.default_position += 1;
            }
            self.sink.emit(&DiagnosticEvent::WouldSubmit {
                row: row.index,
                name: record.contact.name,
                organization: record.organization.name,
            });
            return;
        }

        match self.client.submit(&record.organization, &record.contact) {
            Ok(submitted) => {
                stats.successful += 1;
                if record.position_defaulted {
                    stats.default_position += 1;
                }
                self.sink.emit(&DiagnosticEvent::ContactAdded {
                    row: row.index,
                    name: record.contact.name,
                    organization: record.organization.name,
                    organization_outcome: submitted.organization,
                    default_position: record.position_defaulted,
                });
            }
            Err(failure) => {
                self.sink.emit(&DiagnosticEvent::SubmitFailed {
                    row: row.index,
                    failure,
                });
            }
        }
    }

    fn process_organization_row(
        &mut self,
        row: &RawRow,
        stats: &mut RunStatistics,
        seen: &mut HashSet<OrganizationNumber>,
    ) {
        let organization = match self.validator.validate_organization(row) {
            Ok(organization) => organization,
            Err(reason) => return self.skip(row, reason, stats),
        };

        if !seen.insert(organization.number) {
            stats.duplicates_skipped += 1;
            self.sink.emit(&DiagnosticEvent::DuplicateOrganization {
                row: row.index,
                number: organization.number,
            });
            return;
        }

        if self.options.dry_run {
            stats.successful += 1;
            self.sink.emit(&DiagnosticEvent::WouldSubmitOrganization {
                row: row.index,
                name: organization.name,
                number: organization.number,
            });
            return;
        }

        match self.client.upsert_organization(&organization) {
            Ok(outcome) => {
                stats.successful += 1;
                match outcome {
                    OrganizationOutcome::Created => stats.organizations_created += 1,
                    OrganizationOutcome::AlreadyExists => stats.organizations_existing += 1,
                }
                self.sink.emit(&DiagnosticEvent::OrganizationAccepted {
                    row: row.index,
                    name: organization.name,
                    number: organization.number,
                    outcome,
                });
            }
            Err(failure) => {
                self.sink.emit(&DiagnosticEvent::SubmitFailed {
                    row: row.index,
                    failure,
                });
            }
        }
    }
}
