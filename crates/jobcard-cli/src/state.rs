//! Application state for the command-line front-end.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use jobcard::config::{load_config, Endpoint};
use jobcard::FlowClient;

pub struct AppState {
    /// Client for the workflow endpoints.
    pub backend: FlowClient,
}

impl AppState {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path).context("Failed to load configuration")?;

        for endpoint in Endpoint::ALL {
            if !config.endpoints.is_configured(endpoint) {
                debug!(
                    "{} is not set; {} calls will fail",
                    endpoint.env_var(),
                    endpoint.operation()
                );
            }
        }

        let backend = FlowClient::new(config).context("Failed to create HTTP client")?;
        Ok(Self { backend })
    }
}
