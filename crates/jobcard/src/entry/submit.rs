//! The job submission sequence: ensure machine, ensure contact, create job.
//!
//! The steps are not transactional. A failure after the machine or contact
//! was written leaves those records in place; [`SubmitFailure`] names them.

use std::fmt;

use log::{debug, error, info};
use serde::Serialize;
use tracing::{info_span, Instrument};

use crate::api::{FlowBackend, SubmissionId};
use crate::error::JobcardError;

use super::form::JobEntryForm;
use super::lookup::MachineContacts;
use super::progress::{SubmitEvent, SubmitProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStep {
    Validate,
    EnsureMachine,
    EnsureContact,
    CreateJob,
}

impl SubmitStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitStep::Validate => "validate",
            SubmitStep::EnsureMachine => "ensure_machine",
            SubmitStep::EnsureContact => "ensure_contact",
            SubmitStep::CreateJob => "create_job",
        }
    }
}

impl fmt::Display for SubmitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub submission_id: String,
    pub machine_id: String,
    pub contact_id: Option<String>,
    pub job_id: String,
    pub machine_created: Option<bool>,
    pub machine_updated: Option<bool>,
}

/// A failed submission and the records it had already written.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct SubmitFailure {
    pub step: SubmitStep,
    #[source]
    pub error: JobcardError,
    pub machine_id: Option<String>,
    pub contact_id: Option<String>,
}

impl SubmitFailure {
    fn at(step: SubmitStep, error: impl Into<JobcardError>) -> Self {
        Self {
            step,
            error: error.into(),
            machine_id: None,
            contact_id: None,
        }
    }

    fn with_machine(mut self, machine_id: &str) -> Self {
        self.machine_id = Some(machine_id.to_string());
        self
    }

    fn with_contact(mut self, contact_id: Option<String>) -> Self {
        self.contact_id = contact_id;
        self
    }

    /// True when the failure left a machine or contact behind.
    pub fn has_partial_writes(&self) -> bool {
        self.machine_id.is_some() || self.contact_id.is_some()
    }
}

pub struct SubmissionPipeline<'a, B: FlowBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: FlowBackend + ?Sized> SubmissionPipeline<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Submits the form as a new job.
    ///
    /// Validation runs before any call. A newly created contact is recorded
    /// in `contacts` even when the final step fails.
    pub async fn run(
        &self,
        form: &JobEntryForm,
        contacts: &mut MachineContacts,
        progress: &dyn SubmitProgress,
    ) -> Result<SubmitOutcome, SubmitFailure> {
        let submission = SubmissionId::new();
        let span = info_span!(
            "submission",
            submission_id = %submission,
            fleet_number = %form.fleet_number.trim(),
        );

        self.run_steps(form, contacts, progress, submission)
            .instrument(span)
            .await
            .inspect_err(|failure| {
                progress.report(SubmitEvent::Failed {
                    step: failure.step,
                    error: failure.to_string(),
                });
                if failure.has_partial_writes() {
                    error!(
                        "Submission failed at {} after writing machine {:?} contact {:?}; not rolled back",
                        failure.step, failure.machine_id, failure.contact_id
                    );
                }
            })
    }

    async fn run_steps(
        &self,
        form: &JobEntryForm,
        contacts: &mut MachineContacts,
        progress: &dyn SubmitProgress,
        submission: SubmissionId,
    ) -> Result<SubmitOutcome, SubmitFailure> {
        // Step 1: Validate
        form.validate()
            .map_err(|e| SubmitFailure::at(SubmitStep::Validate, e))?;

        // Step 2: Create or update the machine
        progress.report(SubmitEvent::Step {
            step: SubmitStep::EnsureMachine,
            message: "Saving machine...".to_string(),
        });
        let machine = self
            .backend
            .create_machine(&form.machine_payload(), Some(&submission))
            .instrument(info_span!("ensure_machine"))
            .await
            .map_err(|e| SubmitFailure::at(SubmitStep::EnsureMachine, e))?;
        info!("Ensured machine {}", machine.machine_id);

        // Step 3: Resolve the contact
        progress.report(SubmitEvent::Step {
            step: SubmitStep::EnsureContact,
            message: "Resolving site contact...".to_string(),
        });
        let contact_id = contacts
            .ensure_contact_id(self.backend, form, &machine.machine_id, Some(&submission))
            .instrument(info_span!("ensure_contact"))
            .await
            .map_err(|e| {
                SubmitFailure::at(SubmitStep::EnsureContact, e).with_machine(&machine.machine_id)
            })?;
        debug!("Contact for job: {:?}", contact_id);

        // Step 4: Create the job
        progress.report(SubmitEvent::Step {
            step: SubmitStep::CreateJob,
            message: "Creating job...".to_string(),
        });
        let payload = form.job_payload(&machine.machine_id, contact_id.as_deref());
        let job = self
            .backend
            .create_job(&payload, Some(&submission))
            .instrument(info_span!("create_job"))
            .await
            .map_err(|e| {
                SubmitFailure::at(SubmitStep::CreateJob, e)
                    .with_machine(&machine.machine_id)
                    .with_contact(contact_id.clone())
            })?;

        info!("Created job {}", job.job_id);
        progress.report(SubmitEvent::Completed {
            job_id: job.job_id.clone(),
        });

        Ok(SubmitOutcome {
            submission_id: submission.to_string(),
            machine_id: machine.machine_id,
            contact_id,
            job_id: job.job_id,
            machine_created: machine.created,
            machine_updated: machine.updated,
        })
    }
}
