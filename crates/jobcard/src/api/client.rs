//! HTTP implementation of [`FlowBackend`].

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info_span, Instrument};

use super::backend::{FlowBackend, SubmissionId};
use crate::config::{Config, Endpoint, EndpointConfig, HttpConfig};
use crate::error::ApiError;
use crate::model::{
    CreateContactPayload, CreateContactResponse, CreateJobPayload, CreateJobResponse,
    CreateMachinePayload, CreateMachineResponse, JobsPage, MachineLookupResponse, RawJob,
    UpdateJobPayload,
};
use crate::sanitize;

/// Header carrying the submission correlation id.
pub const SUBMISSION_HEADER: &str = "x-jobcard-submission";

/// Maximum length of a response body kept in log lines.
const MAX_LOGGED_BODY: usize = 200;

fn create_http_client(http: &HttpConfig) -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .timeout(Duration::from_secs(http.request_timeout_secs))
        .build()
        .map_err(|e| ApiError::ClientBuild(e.to_string()))
}

/// Normalises a fleet number the way the lookup flow expects it.
pub fn normalize_fleet_number(fleet_number: &str) -> String {
    fleet_number.trim().to_uppercase()
}

pub struct FlowClient {
    client: Client,
    endpoints: EndpointConfig,
}

impl FlowClient {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        Ok(Self {
            client: create_http_client(&config.http)?,
            endpoints: config.endpoints,
        })
    }

    fn url(&self, endpoint: Endpoint) -> Result<&SecretString, ApiError> {
        self.endpoints
            .get(endpoint)
            .ok_or(ApiError::MissingEndpoint {
                name: endpoint.env_var(),
            })
    }

    async fn post_json<B, R>(
        &self,
        endpoint: Endpoint,
        body: &B,
        submission: Option<&SubmissionId>,
    ) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint)?;
        let mut request = self
            .client
            .post(url.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        if let Some(id) = submission {
            request = request.header(SUBMISSION_HEADER, id.as_str());
        }

        let response = self.send(endpoint, url, request).await?;
        decode(endpoint, response).await
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        url: &SecretString,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let operation = endpoint.operation();
        let span = info_span!(
            "flow_call",
            operation,
            url = %sanitize::redact_flow_url(url.expose_secret()),
        );

        async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::Transport {
                    operation,
                    source: e.without_url(),
                })?;

            let status = response.status();
            debug!("{} responded {}", operation, status);

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                error!(
                    "{} failed ({}): {}",
                    operation,
                    status.as_u16(),
                    sanitize::truncate_body(&body, MAX_LOGGED_BODY)
                );
                return Err(ApiError::Http {
                    operation,
                    status: status.as_u16(),
                    body,
                });
            }

            Ok(response)
        }
        .instrument(span)
        .await
    }
}

async fn decode<R: DeserializeOwned>(
    endpoint: Endpoint,
    response: reqwest::Response,
) -> Result<R, ApiError> {
    let operation = endpoint.operation();
    let bytes = response.bytes().await.map_err(|e| ApiError::Transport {
        operation,
        source: e.without_url(),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
        operation,
        message: e.to_string(),
    })
}

#[async_trait]
impl FlowBackend for FlowClient {
    async fn lookup_machine(&self, fleet_number: &str) -> Result<MachineLookupResponse, ApiError> {
        // Configuration is checked even when there is nothing to look up.
        self.url(Endpoint::LookupMachine)?;

        let fleet_number = normalize_fleet_number(fleet_number);
        if fleet_number.is_empty() {
            return Ok(MachineLookupResponse::default());
        }

        let body = serde_json::json!({ "fleetNumber": fleet_number });
        self.post_json(Endpoint::LookupMachine, &body, None).await
    }

    async fn create_machine(
        &self,
        payload: &CreateMachinePayload,
        submission: Option<&SubmissionId>,
    ) -> Result<CreateMachineResponse, ApiError> {
        self.post_json(Endpoint::CreateMachine, payload, submission)
            .await
    }

    async fn create_contact(
        &self,
        payload: &CreateContactPayload,
        submission: Option<&SubmissionId>,
    ) -> Result<CreateContactResponse, ApiError> {
        self.post_json(Endpoint::CreateContact, payload, submission)
            .await
    }

    async fn create_job(
        &self,
        payload: &CreateJobPayload,
        submission: Option<&SubmissionId>,
    ) -> Result<CreateJobResponse, ApiError> {
        self.post_json(Endpoint::CreateJob, payload, submission).await
    }

    async fn update_job(&self, payload: &UpdateJobPayload) -> Result<(), ApiError> {
        let url = self.url(Endpoint::UpdateJob)?;
        let request = self
            .client
            .post(url.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .json(payload);
        self.send(Endpoint::UpdateJob, url, request).await?;
        Ok(())
    }

    async fn list_jobs(&self) -> Result<Vec<RawJob>, ApiError> {
        let url = self.url(Endpoint::JobsList)?;
        let cache_buster = chrono::Utc::now().timestamp_millis().to_string();
        let request = self
            .client
            .get(url.expose_secret())
            .query(&[("t", cache_buster.as_str())])
            .header(CACHE_CONTROL, "no-store");

        let response = self.send(Endpoint::JobsList, url, request).await?;
        let page: JobsPage = decode(Endpoint::JobsList, response).await?;
        debug!("Loaded {} jobs", page.value.len());
        Ok(page.value)
    }
}
