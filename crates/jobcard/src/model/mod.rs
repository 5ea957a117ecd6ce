//! Backend wire types and the flat display model.

pub mod job;
pub mod machine;
pub mod payload;

pub use job::{JobListItem, JobStatus, JobsPage, RawJob};
pub use machine::{MachineLookupResponse, MachineRow, SiteContactRow};
pub use payload::{
    ContactDetails, CreateContactPayload, CreateContactResponse, CreateJobPayload,
    CreateJobResponse, CreateMachinePayload, CreateMachineResponse, JobDetails, MachineDetails,
    UpdateJobPayload,
};
