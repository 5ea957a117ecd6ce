pub mod api;
pub mod board;
pub mod config;
pub mod dates;
pub mod entry;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod sanitize;
pub mod tsv;

pub use api::{FlowBackend, FlowClient, SubmissionId};
pub use board::{JobBoard, JobColumn, JobField, JobPatch, TableEditor};
pub use config::{load_config, Config};
pub use entry::{
    FormField, JobEntryForm, JobEntrySession, MachineContacts, SubmissionPipeline, SubmitOutcome,
};
pub use error::{ApiError, ConfigError, JobcardError, Result, ValidationError};
pub use model::{JobListItem, JobStatus, MachineRow, RawJob, SiteContactRow};
