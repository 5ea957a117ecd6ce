//! In-memory implementation of the workflow endpoints.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use jobcard::api::{FlowBackend, SubmissionId};
use jobcard::model::{
    CreateContactPayload, CreateContactResponse, CreateJobPayload, CreateJobResponse,
    CreateMachinePayload, CreateMachineResponse, MachineLookupResponse, RawJob, UpdateJobPayload,
};
use jobcard::ApiError;

/// One recorded call against the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Lookup(String),
    CreateMachine {
        payload: CreateMachinePayload,
        submission: Option<String>,
    },
    CreateContact {
        payload: CreateContactPayload,
        submission: Option<String>,
    },
    CreateJob {
        payload: CreateJobPayload,
        submission: Option<String>,
    },
    UpdateJob(UpdateJobPayload),
    ListJobs,
}

impl Call {
    pub fn operation(&self) -> &'static str {
        match self {
            Call::Lookup(_) => "Lookup",
            Call::CreateMachine { .. } => "CreateMachine",
            Call::CreateContact { .. } => "CreateContact",
            Call::CreateJob { .. } => "CreateJob",
            Call::UpdateJob(_) => "UpdateJob",
            Call::ListJobs => "LoadJobs",
        }
    }

    pub fn submission(&self) -> Option<&str> {
        match self {
            Call::CreateMachine { submission, .. }
            | Call::CreateContact { submission, .. }
            | Call::CreateJob { submission, .. } => submission.as_deref(),
            _ => None,
        }
    }
}

struct FakeState {
    lookup: MachineLookupResponse,
    machine_id: String,
    contact_id: String,
    job_id: String,
    jobs: Vec<RawJob>,
    failing: HashSet<&'static str>,
    calls: Vec<Call>,
}

/// Backend double. Update calls are applied to the stored job records so a
/// reload sees them, like the real flow.
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

/// Update payload keys and the raw job fields they write.
const UPDATE_FIELDS: [(&str, &str); 12] = [
    ("status", "gr_status"),
    ("jobNumber", "gr_jobnumber"),
    ("date", "gr_date"),
    ("technician", "gr_technician"),
    ("model", "gr_modelsnap"),
    ("fleetNumber", "gr_fleetnumbersnap"),
    ("customer", "gr_customersnap"),
    ("description", "gr_description"),
    ("siteAddress", "gr_siteaddresssnap"),
    ("siteSuburb", "gr_sitesuburbsnap"),
    ("siteCity", "gr_sitecitysnap"),
    ("customerPo", "gr_customerpo"),
];

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                lookup: MachineLookupResponse::default(),
                machine_id: "machine-1".to_string(),
                contact_id: "contact-new".to_string(),
                job_id: "job-1".to_string(),
                jobs: Vec::new(),
                failing: HashSet::new(),
                calls: Vec::new(),
            }),
        }
    }

    pub fn with_lookup(self, lookup: MachineLookupResponse) -> Self {
        self.state.lock().unwrap().lookup = lookup;
        self
    }

    pub fn with_machine_id(self, id: &str) -> Self {
        self.state.lock().unwrap().machine_id = id.to_string();
        self
    }

    pub fn with_contact_id(self, id: &str) -> Self {
        self.state.lock().unwrap().contact_id = id.to_string();
        self
    }

    pub fn with_jobs(self, jobs: Vec<RawJob>) -> Self {
        self.state.lock().unwrap().jobs = jobs;
        self
    }

    /// Makes every call of the named operation fail with HTTP 500.
    pub fn failing(self, operation: &'static str) -> Self {
        self.state.lock().unwrap().failing.insert(operation);
        self
    }

    pub fn recover(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.remove(operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::operation).collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        let operation = call.operation();
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(operation) {
            return Err(ApiError::Http {
                operation,
                status: 500,
                body: "flow exploded".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FlowBackend for FakeBackend {
    async fn lookup_machine(&self, fleet_number: &str) -> Result<MachineLookupResponse, ApiError> {
        self.record(Call::Lookup(fleet_number.to_string()))?;
        Ok(self.state.lock().unwrap().lookup.clone())
    }

    async fn create_machine(
        &self,
        payload: &CreateMachinePayload,
        submission: Option<&SubmissionId>,
    ) -> Result<CreateMachineResponse, ApiError> {
        self.record(Call::CreateMachine {
            payload: payload.clone(),
            submission: submission.map(|s| s.to_string()),
        })?;
        Ok(CreateMachineResponse {
            machine_id: self.state.lock().unwrap().machine_id.clone(),
            created: Some(false),
            updated: Some(true),
        })
    }

    async fn create_contact(
        &self,
        payload: &CreateContactPayload,
        submission: Option<&SubmissionId>,
    ) -> Result<CreateContactResponse, ApiError> {
        self.record(Call::CreateContact {
            payload: payload.clone(),
            submission: submission.map(|s| s.to_string()),
        })?;
        Ok(CreateContactResponse {
            contact_id: self.state.lock().unwrap().contact_id.clone(),
        })
    }

    async fn create_job(
        &self,
        payload: &CreateJobPayload,
        submission: Option<&SubmissionId>,
    ) -> Result<CreateJobResponse, ApiError> {
        self.record(Call::CreateJob {
            payload: payload.clone(),
            submission: submission.map(|s| s.to_string()),
        })?;
        Ok(CreateJobResponse {
            job_id: self.state.lock().unwrap().job_id.clone(),
        })
    }

    async fn update_job(&self, payload: &UpdateJobPayload) -> Result<(), ApiError> {
        self.record(Call::UpdateJob(payload.clone()))?;

        let Value::Object(update) = serde_json::to_value(payload).unwrap() else {
            unreachable!("update payload serializes to an object");
        };
        let mut state = self.state.lock().unwrap();
        if let Some(job) = state
            .jobs
            .iter_mut()
            .find(|job| job.text("gr_jobsid").as_deref() == Some(payload.id.as_str()))
        {
            for (key, field) in UPDATE_FIELDS {
                if let Some(value) = update.get(key) {
                    job.0.insert(field.to_string(), value.clone());
                    job.0
                        .remove(&format!("{}@OData.Community.Display.V1.FormattedValue", field));
                }
            }
        }
        Ok(())
    }

    async fn list_jobs(&self) -> Result<Vec<RawJob>, ApiError> {
        self.record(Call::ListJobs)?;
        Ok(self.state.lock().unwrap().jobs.clone())
    }
}
