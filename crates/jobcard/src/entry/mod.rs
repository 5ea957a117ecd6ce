//! Job entry: the form, machine/contact hydration, spreadsheet paste and
//! the submission pipeline.

pub mod form;
pub mod lookup;
pub mod paste;
pub mod progress;
pub mod session;
pub mod submit;

pub use form::{FormField, FormSection, JobEntryForm, JobType};
pub use lookup::MachineContacts;
pub use paste::{parse_excel_row, FormPatch};
pub use progress::{LogProgress, NoopProgress, SubmitEvent, SubmitProgress};
pub use session::JobEntrySession;
pub use submit::{SubmissionPipeline, SubmitFailure, SubmitOutcome, SubmitStep};
