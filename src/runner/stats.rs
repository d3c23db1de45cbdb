//! Run counters.

use chrono::{DateTime, Utc};
use std::fmt;

/// Counters for one run, owned by the batch runner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    /// Rows seen
    pub total: usize,

    /// Rows fully accepted by the backend
    pub successful: usize,

    /// Rows skipped for an invalid organization number or name
    pub invalid_organization: usize,

    /// Rows skipped for invalid contact data (phone or contact name)
    pub invalid_phone: usize,

    /// Successful rows that used the default position
    pub default_position: usize,

    /// Organizations-only mode: newly created organizations
    pub organizations_created: usize,

    /// Organizations-only mode: organizations the backend already knew
    pub organizations_existing: usize,

    /// Organizations-only mode: repeated organization numbers not resubmitted
    pub duplicates_skipped: usize,

    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunStatistics {
    /// Rows that were neither successful nor deliberately skipped as duplicates.
    pub fn failed(&self) -> usize {
        self.total
            .saturating_sub(self.successful)
            .saturating_sub(self.duplicates_skipped)
    }

    /// Wall-clock duration of the run, once finished.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing complete!")?;
        writeln!(f, "Total rows: {}", self.total)?;
        writeln!(f, "Successful: {}", self.successful)?;
        writeln!(f, "Failed: {}", self.failed())?;
        writeln!(f, "Invalid organization data: {}", self.invalid_organization)?;
        writeln!(f, "Invalid phone/contact data: {}", self.invalid_phone)?;
        write!(f, "Contacts with default position: {}", self.default_position)?;

        if self.organizations_created + self.organizations_existing + self.duplicates_skipped > 0 {
            write!(
                f,
                "\nOrganizations created: {}\nOrganizations already existing: {}\nDuplicate rows skipped: {}",
                self.organizations_created, self.organizations_existing, self.duplicates_skipped
            )?;
        }

        if let Some(elapsed) = self.elapsed() {
            write!(f, "\nElapsed: {:.1}s", elapsed.num_milliseconds() as f64 / 1000.0)?;
        }

        Ok(())
    }
}
