//! Error types for contact-sync.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field-level validation failures live in [`crate::domain::InvalidReason`] and
//! record-level skips in [`crate::validation::SkipReason`]; neither ever aborts a run.

use std::fmt;
use thiserror::Error;

/// Which of the two remote calls a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    Organization,
    Contact,
}

impl fmt::Display for SubmitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Organization => write!(f, "organization"),
            Self::Contact => write!(f, "contact"),
        }
    }
}

/// Transport-level failure: no HTTP response was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Could not connect to the backend
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Network timeout or IO error while talking to the backend
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Failed to read the response body
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Any other transport problem
    #[error("HTTP request failed: {0}")]
    Other(String),
}

/// A row whose records were not (fully) accepted by the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// The backend answered with a status that is not accepted for this stage
    #[error("{stage} rejected (status {status}): {body}")]
    Rejected {
        stage: SubmitStage,
        status: u16,
        body: String,
    },

    /// No response was received
    #[error("{stage} request failed: {source}")]
    Transport {
        stage: SubmitStage,
        #[source]
        source: TransportError,
    },
}

impl SubmitFailure {
    /// The stage the failure happened in.
    pub fn stage(&self) -> SubmitStage {
        match self {
            Self::Rejected { stage, .. } | Self::Transport { stage, .. } => *stage,
        }
    }

    /// The HTTP status, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }

    /// Whether this is a transport failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that prevent the row source from being loaded. Always fatal.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to read the input file
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("Invalid CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to open or read the workbook
    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    /// The requested worksheet does not exist
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// The input has no header row
    #[error("Input has no header row")]
    Empty,

    /// The file extension is not a supported format
    #[error("Unsupported input format: {0} (expected .xlsx, .xlsm, .xls, .xlsb, .ods, .csv or .txt)")]
    UnsupportedFormat(String),
}

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SourceError
pub type SourceResult<T> = Result<T, SourceError>;
