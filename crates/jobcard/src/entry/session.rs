use log::{error, info, warn};
use serde::Serialize;

use crate::api::FlowBackend;
use crate::error::ValidationError;
use crate::tsv::{self, CopyOutcome};

use super::form::{FormField, FormSection, JobEntryForm, JobType};
use super::lookup::MachineContacts;
use super::paste::{self, FormPatch};
use super::progress::SubmitProgress;
use super::submit::{SubmissionPipeline, SubmitOutcome};

/// One job-entry page: the form plus its lookup and submission state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntrySession {
    pub form: JobEntryForm,
    pub machine: MachineContacts,
    pub submitting: bool,
    pub submit_error: Option<String>,
    pub lookup_error: Option<String>,
    /// Shows the scheduling section.
    pub scheduled: bool,
    /// Text last pasted from the spreadsheet.
    pub paste_text: String,
}

impl Default for JobEntrySession {
    fn default() -> Self {
        Self {
            form: JobEntryForm::default(),
            machine: MachineContacts::default(),
            submitting: false,
            submit_error: None,
            lookup_error: None,
            scheduled: true,
            paste_text: String::new(),
        }
    }
}

impl JobEntrySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a form field. Editing a contact field switches to manual entry.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        if field.is_contact_field() {
            self.machine.mark_manual_entry();
        }
    }

    pub fn set_tyres_covered(&mut self, covered: Option<bool>) {
        self.form.tyres_covered_in_rental_agreement = covered;
    }

    pub fn select_contact(&mut self, contact_id: Option<&str>) -> Result<(), ValidationError> {
        self.machine.select_contact(contact_id, &mut self.form)
    }

    /// Sections to show, in order. Tyres only for tyre jobs.
    pub fn visible_sections(&self) -> Vec<FormSection> {
        let mut sections = vec![
            FormSection::JobDetails,
            FormSection::Machine,
            FormSection::Customer,
            FormSection::SiteContact,
        ];
        if self.form.job_type() == Some(JobType::Tyres) {
            sections.push(FormSection::Tyres);
        }
        if self.scheduled {
            sections.push(FormSection::Scheduling);
        }
        sections
    }

    /// Looks up the current fleet number and hydrates the form.
    ///
    /// Returns whether a machine was found. Failures are kept in
    /// `lookup_error` and also returned.
    pub async fn lookup_fleet<B>(&mut self, backend: &B) -> Result<bool, String>
    where
        B: FlowBackend + ?Sized,
    {
        self.lookup_error = None;
        match self
            .machine
            .lookup_and_hydrate(backend, &mut self.form)
            .await
        {
            Ok(machine) => Ok(machine.is_some()),
            Err(e) => {
                let message = e.to_string();
                error!("Fleet lookup failed: {}", message);
                self.lookup_error = Some(message.clone());
                Err(message)
            }
        }
    }

    /// Applies pasted spreadsheet text to the form.
    ///
    /// When the row carries a fleet number, a lookup follows; its failure is
    /// recorded in `lookup_error` and does not undo the paste.
    pub async fn paste_from_excel<B>(&mut self, backend: &B, text: &str) -> Option<FormPatch>
    where
        B: FlowBackend + ?Sized,
    {
        if text.is_empty() {
            return None;
        }
        self.paste_text = text.to_string();

        let patch = paste::parse_excel_row(text)?;
        patch.apply(&mut self.form);
        info!("Pasted {} field(s) from spreadsheet", patch.len());
        self.paste_text.clear();

        if patch.fleet_number().is_some() {
            // Error already recorded on the session.
            let _ = self.lookup_fleet(backend).await;
        }
        Some(patch)
    }

    /// Validates and submits the form.
    ///
    /// On success the form and lookup state reset. On failure the message is
    /// kept in `submit_error` and the form is left for correction.
    pub async fn submit<B>(
        &mut self,
        backend: &B,
        progress: &dyn SubmitProgress,
    ) -> Result<SubmitOutcome, String>
    where
        B: FlowBackend + ?Sized,
    {
        self.submit_error = None;
        self.submitting = true;

        let result = SubmissionPipeline::new(backend)
            .run(&self.form, &mut self.machine, progress)
            .await;
        self.submitting = false;

        match result {
            Ok(outcome) => {
                self.form = JobEntryForm::default();
                self.machine.reset();
                Ok(outcome)
            }
            Err(failure) => {
                let message = failure.to_string();
                warn!("Job submission failed at {}: {}", failure.step, message);
                self.submit_error = Some(message.clone());
                Err(message)
            }
        }
    }

    pub fn export_row(&self) -> Vec<String> {
        self.form.export_row()
    }

    pub async fn copy_to_clipboard(&self) -> CopyOutcome {
        tsv::copy_row_to_clipboard(&self.export_row()).await
    }
}
