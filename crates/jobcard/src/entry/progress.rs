use log::{error, info};

use super::submit::SubmitStep;

/// Events emitted while a job is being submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitEvent {
    Step {
        step: SubmitStep,
        message: String,
    },
    Completed {
        job_id: String,
    },
    Failed {
        step: SubmitStep,
        error: String,
    },
}

pub trait SubmitProgress: Send + Sync {
    fn report(&self, event: SubmitEvent);
}

/// No-op reporter for tests and callers that only want the outcome.
pub struct NoopProgress;

impl SubmitProgress for NoopProgress {
    fn report(&self, _event: SubmitEvent) {}
}

/// Writes each event to the log.
pub struct LogProgress;

impl SubmitProgress for LogProgress {
    fn report(&self, event: SubmitEvent) {
        match event {
            SubmitEvent::Step { step, message } => info!("[{}] {}", step, message),
            SubmitEvent::Completed { job_id } => info!("Job {} created", job_id),
            SubmitEvent::Failed { step, error } => error!("[{}] failed: {}", step, error),
        }
    }
}
