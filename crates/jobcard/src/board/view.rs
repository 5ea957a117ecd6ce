//! The job list and ops board view model.

use log::{debug, error, info, warn};
use serde::Serialize;
use tracing::{info_span, Instrument};

use crate::api::FlowBackend;
use crate::error::ValidationError;
use crate::mapping;
use crate::model::{JobListItem, JobStatus, UpdateJobPayload};

use super::columns::{self, JobField};
use super::editor::{JobPatch, TableEditor};

/// A status bucket on the ops board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lane {
    pub status: JobStatus,
    pub title: &'static str,
    /// Whether rows in this lane can enter row-edit mode.
    pub editable: bool,
}

/// Board lanes, left to right. Done jobs are not shown on the board.
pub const LANES: [Lane; 3] = [
    Lane {
        status: JobStatus::Created,
        title: "Created",
        editable: false,
    },
    Lane {
        status: JobStatus::Allocated,
        title: "Allocated",
        editable: true,
    },
    Lane {
        status: JobStatus::InProgress,
        title: "In Progress",
        editable: true,
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct LaneView<'a> {
    #[serde(flatten)]
    pub lane: Lane,
    pub jobs: Vec<&'a JobListItem>,
}

/// Jobs loaded from the backend plus the shared editing state.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBoard {
    jobs: Vec<JobListItem>,
    pub loading: bool,
    pub error: Option<String>,
    pub save_error: Option<String>,
    editor: TableEditor,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[JobListItem] {
        &self.jobs
    }

    pub fn job(&self, id: &str) -> Option<&JobListItem> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn editor(&self) -> &TableEditor {
        &self.editor
    }

    /// Fetches all jobs. On failure the previous rows stay and `error` is set.
    pub async fn load<B>(&mut self, backend: &B) -> Result<usize, String>
    where
        B: FlowBackend + ?Sized,
    {
        self.loading = true;
        self.error = None;
        let result = backend
            .list_jobs()
            .instrument(info_span!("load_jobs"))
            .await;
        self.loading = false;

        match result {
            Ok(raw) => {
                self.jobs = mapping::map_raw_jobs(&raw);
                debug!("Board holds {} jobs", self.jobs.len());
                Ok(self.jobs.len())
            }
            Err(e) => {
                let message = e.to_string();
                error!("Failed to load jobs: {}", message);
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    pub fn jobs_with_status(&self, status: JobStatus) -> Vec<&JobListItem> {
        self.jobs
            .iter()
            .filter(|job| job.status == status.as_str())
            .collect()
    }

    pub fn lanes(&self) -> Vec<LaneView<'_>> {
        LANES
            .iter()
            .map(|lane| LaneView {
                lane: *lane,
                jobs: self.jobs_with_status(lane.status),
            })
            .collect()
    }

    /// Whether the job's lane allows row editing. Jobs outside the board
    /// lanes (the full list) are editable.
    pub fn is_editable(&self, job: &JobListItem) -> bool {
        LANES
            .iter()
            .find(|lane| job.status == lane.status.as_str())
            .is_none_or(|lane| lane.editable)
    }

    /// Enters row-edit mode for a job.
    ///
    /// Returns `Ok(false)` when another row is already editing or the job's
    /// lane is read-only.
    pub fn begin_edit(&mut self, id: &str) -> Result<bool, ValidationError> {
        let job = self
            .job(id)
            .ok_or_else(|| ValidationError::new(format!("Job '{}' not found", id)))?;
        if !self.is_editable(job) {
            debug!("Job {} is in a read-only lane", id);
            return Ok(false);
        }
        let job = job.clone();
        Ok(self.editor.begin_edit(&job))
    }

    pub fn activate_cell(&mut self, id: &str, field: JobField) -> bool {
        self.editor.activate_cell(id, field)
    }

    pub fn input(&mut self, value: impl Into<String>) -> bool {
        self.editor.input(value)
    }

    pub fn blur(&mut self) {
        self.editor.blur();
    }

    pub fn set_cell(&mut self, id: &str, field: JobField, value: impl Into<String>) -> bool {
        self.editor.set_cell(id, field, value)
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Saves the editing row. Returns whether an update was sent.
    pub async fn save_edit<B>(&mut self, backend: &B) -> Result<bool, String>
    where
        B: FlowBackend + ?Sized,
    {
        match self.editor.finish() {
            Some(patch) => self.save_patch(backend, patch).await,
            None => {
                debug!("Nothing changed, skipping update");
                Ok(false)
            }
        }
    }

    /// Changes a job's status straight away, whether or not a row is editing.
    pub async fn set_status<B>(&mut self, backend: &B, id: &str, status: &str) -> Result<bool, String>
    where
        B: FlowBackend + ?Sized,
    {
        let status: JobStatus = status.parse().map_err(|e: ValidationError| e.to_string())?;
        if self.job(id).is_none() {
            return Err(format!("Job '{}' not found", id));
        }
        let patch = JobPatch::new(id).with(JobField::Status, status.as_str());
        self.save_patch(backend, patch).await
    }

    /// Applies a patch locally, sends it and reloads.
    ///
    /// The reload happens whether or not the update succeeded, so the rows
    /// always end up matching the backend.
    async fn save_patch<B>(&mut self, backend: &B, patch: JobPatch) -> Result<bool, String>
    where
        B: FlowBackend + ?Sized,
    {
        self.save_error = None;
        if let Some(job) = self.jobs.iter_mut().find(|job| job.id == patch.id) {
            patch.apply_to(job);
        }

        let payload = UpdateJobPayload::from_patch(&patch);
        if payload.is_empty() {
            debug!("No backend fields changed for job {}", patch.id);
            return Ok(false);
        }

        let span = info_span!("save_job", job_id = %patch.id);
        match backend.update_job(&payload).instrument(span).await {
            Ok(()) => {
                info!("Updated job {}", patch.id);
                // A failed reload is reported through `error`.
                let _ = self.load(backend).await;
                Ok(true)
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Update of job {} failed: {}", patch.id, message);
                self.save_error = Some(message.clone());
                let _ = self.load(backend).await;
                Err(message)
            }
        }
    }

    /// Job book row of the ops board for one job.
    pub fn export_row(&self, id: &str) -> Option<Vec<String>> {
        self.job(id).map(columns::board_export_row)
    }

    /// Job book row of the full list, with contact details.
    pub fn export_full_row(&self, id: &str) -> Option<Vec<String>> {
        self.job(id).map(columns::full_export_row)
    }
}

#[cfg(test)]
impl JobBoard {
    pub(crate) fn with_jobs(jobs: Vec<JobListItem>) -> Self {
        Self {
            jobs,
            ..Default::default()
        }
    }
}
