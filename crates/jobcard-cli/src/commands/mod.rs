//! Subcommand handlers.
//!
//! Commands are organized by page:
//! - `entry`: Fleet lookup and the job entry form
//! - `jobs`: Job list, ops board and inline edits

pub mod entry;
pub mod jobs;

use anyhow::{anyhow, Result};
use serde::Serialize;

/// Response wrapper for `--json` output.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Prints a command result either as JSON or through `human`, and turns a
/// failure into the process error.
pub fn emit<T, F>(result: std::result::Result<T, String>, json: bool, human: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match result {
        Ok(data) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&ApiResponse::ok(data))?);
            } else {
                human(&data);
            }
            Ok(())
        }
        Err(message) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&ApiResponse::<()>::err(message.clone()))?
                );
            }
            Err(anyhow!(message))
        }
    }
}
