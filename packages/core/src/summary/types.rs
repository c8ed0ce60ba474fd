//! Core data types for shortage lookups and the summary report

use std::fmt;

/// Identifier of one drug-shortage record in the remote database.
pub type TrackedKey = u64;

/// The only status with special handling.
pub const RESOLVED_STATUS: &str = "Resolved";

pub const UNKNOWN_NAME: &str = "Unknown Name";
pub const UNKNOWN_DATE: &str = "Unknown Date";
pub const UNKNOWN_STATUS: &str = "Unknown Status";

/// Latest state of one shortage, as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortageRecord {
    pub name: String,
    pub created: String,
    pub status: String,
}

impl ShortageRecord {
    pub fn new(
        name: impl Into<String>,
        created: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            created: created.into(),
            status: status.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == RESOLVED_STATUS
    }

    /// Report line for this record, e.g.
    /// `DrugA (Key: 101, Created: 2024-01-01, Type: Active)`.
    pub fn entry(&self, key: TrackedKey) -> String {
        format!(
            "{} (Key: {}, Created: {}, Type: {})",
            self.name, key, self.created, self.status
        )
    }
}

/// Result of looking up a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Success(ShortageRecord),
    NotFound,
    HttpError { status: u16, body: String },
    TransportException(String),
}

impl QueryOutcome {
    /// Short description used in the report for anything but a record.
    pub fn failure_description(&self) -> Option<String> {
        match self {
            QueryOutcome::Success(_) => None,
            QueryOutcome::NotFound => Some("Not Found".to_string()),
            QueryOutcome::HttpError { status, .. } => Some(format!("Error: {}", status)),
            QueryOutcome::TransportException(message) => {
                Some(format!("Exception: {}", message))
            }
        }
    }
}

/// Which half of the report an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Active,
    Resolved,
}

/// The rendered weekly summary, kept as its two ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryReport {
    pub active: Vec<String>,
    pub resolved: Vec<String>,
}

impl SummaryReport {
    pub fn push(&mut self, section: Section, entry: String) {
        match section {
            Section::Active => self.active.push(entry),
            Section::Resolved => self.resolved.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, entries: &[String]) -> fmt::Result {
    if entries.is_empty() {
        f.write_str("None\n")
    } else {
        f.write_str(&entries.join("\n"))
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Weekly Drug Shortages Summary:\n\n")?;
        f.write_str("Shortages (Active, Not Found, or Other):\n")?;
        write_section(f, &self.active)?;
        f.write_str("\n\nResolved Shortages:\n")?;
        write_section(f, &self.resolved)
    }
}
