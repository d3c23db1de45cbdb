//! contact-sync - batch import of organizations and contacts into the CRM backend.
//!
//! Reads a spreadsheet export, normalizes each row's organization number,
//! phone, email, names and position, and submits every valid row as an
//! organization followed by its contact. Re-running an import is safe: an
//! organization that already exists is treated as accepted.
//!
//! # Architecture
//!
//! - **domain**: Field normalizers and value objects
//! - **models**: Raw rows and the records sent to the backend
//! - **validation**: Per-row skip/submit decision
//! - **client**: Two-phase, duplicate-tolerant submission over HTTP
//! - **runner**: Sequential batch loop, counters and diagnostics
//! - **source**: Spreadsheet and CSV loading
//! - **config**: Configuration from environment variables
//! - **error**: Error types
//! - **metrics**: HTTP request counters

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod runner;
pub mod source;
pub mod validation;

pub use client::{
    HttpResponse, HttpTransport, OrganizationOutcome, SubmissionClient, Submitted, UreqTransport,
};
pub use config::{ColumnMapping, Config};
pub use domain::{CellValue, EmailAddress, InvalidReason, OrganizationNumber, PhoneNumber};
pub use error::{ConfigError, SourceError, SubmitFailure, SubmitStage, TransportError};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{Contact, Organization, RawRow};
pub use runner::{
    BatchRunner, DiagnosticEvent, DiagnosticSink, RecordingSink, RunMode, RunOptions,
    RunStatistics, TracingSink,
};
pub use source::load_rows;
pub use validation::{Field, RecordValidator, SkipReason, ValidatedRecord};
