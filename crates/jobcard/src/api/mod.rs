//! Calls against the workflow backend.

pub mod backend;
pub mod client;

pub use backend::{FlowBackend, SubmissionId};
pub use client::FlowClient;
