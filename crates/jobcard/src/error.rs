use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobcardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Errors raised by calls against the workflow endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The endpoint URL for this call is not configured. Raised before any I/O.
    #[error("Missing endpoint configuration: {name}")]
    MissingEndpoint { name: &'static str },

    /// The endpoint answered with a non-2xx status.
    #[error("{operation} failed ({status}): {body}")]
    Http {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned an unreadable response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

/// A user input problem caught before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JobcardError>;
