use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// A job record exactly as the backend returns it.
///
/// Field names and value types vary (option sets come back as numbers,
/// formatted variants are added under `<field>@OData...` keys), so the record
/// is kept as a JSON object and read through [`RawJob::text`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawJob(pub Map<String, Value>);

impl RawJob {
    /// Reads a field as text. Numbers and booleans are stringified; null,
    /// arrays and objects read as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<Value> for RawJob {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RawJob(map),
            _ => RawJob::default(),
        }
    }
}

/// The paged list shape returned by the jobs endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobsPage {
    #[serde(default)]
    pub value: Vec<RawJob>,
}

/// Flat, display-oriented job row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListItem {
    pub id: String,
    pub job_number: String,
    pub date: String,
    pub mechanic: String,
    pub model: String,
    pub fleet_number: String,
    pub company_name: String,
    pub description: String,
    pub site_address: String,
    pub site_suburb: String,
    pub site_city: String,
    pub customer_po: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub status: String,
}

impl JobListItem {
    pub fn job_status(&self) -> Option<JobStatus> {
        self.status.parse().ok()
    }

    /// `address, suburb, city` with blank parts skipped.
    pub fn full_address(&self) -> String {
        [&self.site_address, &self.site_suburb, &self.site_city]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The states offered by the status selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Created,
    Allocated,
    InProgress,
    Done,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Created,
        JobStatus::Allocated,
        JobStatus::InProgress,
        JobStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Created => "created",
            JobStatus::Allocated => "allocated",
            JobStatus::InProgress => "in_progress",
            JobStatus::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Created => "Created",
            JobStatus::Allocated => "Allocated",
            JobStatus::InProgress => "In Progress",
            JobStatus::Done => "Done",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::new(format!(
                    "Unknown status '{}'. Expected one of: created, allocated, in_progress, done.",
                    s.trim()
                ))
            })
    }
}
