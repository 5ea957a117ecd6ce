use std::fmt;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{
    CreateContactPayload, CreateContactResponse, CreateJobPayload, CreateJobResponse,
    CreateMachinePayload, CreateMachineResponse, MachineLookupResponse, RawJob, UpdateJobPayload,
};

/// Correlates the machine, contact and job calls of one job submission.
///
/// Sent with each creation call so the backend can recognise a retried
/// submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The workflow endpoints, as seen by the form and board logic.
///
/// Every call is a single attempt. Implementations must fail with
/// [`ApiError::MissingEndpoint`] before any I/O when the endpoint is not
/// configured.
#[async_trait]
pub trait FlowBackend: Send + Sync {
    /// Looks up a machine and its contacts (newest first) by fleet number.
    async fn lookup_machine(&self, fleet_number: &str) -> Result<MachineLookupResponse, ApiError>;

    /// Creates or updates the machine identified by the payload's fleet number.
    async fn create_machine(
        &self,
        payload: &CreateMachinePayload,
        submission: Option<&SubmissionId>,
    ) -> Result<CreateMachineResponse, ApiError>;

    async fn create_contact(
        &self,
        payload: &CreateContactPayload,
        submission: Option<&SubmissionId>,
    ) -> Result<CreateContactResponse, ApiError>;

    async fn create_job(
        &self,
        payload: &CreateJobPayload,
        submission: Option<&SubmissionId>,
    ) -> Result<CreateJobResponse, ApiError>;

    /// Sends a partial job update. Success is signalled by status only.
    async fn update_job(&self, payload: &UpdateJobPayload) -> Result<(), ApiError>;

    /// Fetches the raw job records for the list and board views.
    async fn list_jobs(&self) -> Result<Vec<RawJob>, ApiError>;
}
